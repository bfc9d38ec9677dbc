// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
#![allow(missing_docs)]

use std::str::Utf8Error;

/// Type alias around a result.
pub type Result<T> = std::result::Result<T, Error>;

/// An error, tagged with the byte offset the cursor had reached when it occurred.
///
/// The format has no record framing, so the offset is usually the only lead you
/// get when a file refuses to parse.
#[derive(Debug, thiserror::Error)]
#[error("{kind} (at byte {position})")]
pub struct Error {
    #[source]
    pub kind: Kind,
    pub position: usize,
}

/// Error type for this crate.
#[derive(Debug, thiserror::Error)]
pub enum Kind {
    /// End of input.
    #[error("Unexpected end of stream")]
    Eof,
    /// A string or list length was negative when it should not have been.
    #[error("Unexpected negative length {0}")]
    UnexpectedNegativeLength(i32),
    /// A string was invalid utf8. The format is written by .NET, so all strings should be valid.
    #[error("String is invalid utf8 {0}")]
    StringInvalidUtf8(Utf8Error),
    /// An enum was stored under a name that no known variant matches.
    #[error("Unknown variant {name:?} of {class}")]
    UnknownVariant { class: &'static str, name: String },
    /// An enum was stored under an integer that no known variant matches.
    #[error("Unknown discriminant {value} of {class}")]
    UnknownDiscriminant { class: &'static str, value: i32 },
    /// A record declared a version newer than this crate knows how to read.
    ///
    /// Records carry no length prefix, so the unknown trailing fields can't be
    /// skipped and every read afterwards would be misaligned. We bail instead.
    #[error("{class} version {version} is newer than {max}, refusing to desync the stream")]
    UnsupportedVersion {
        class: &'static str,
        version: i32,
        max: i32,
    },
}
