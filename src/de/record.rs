// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Deserializer, Kind, Result};

/// One version-gated field reader.
pub(crate) type Reader<T> = fn(&mut T, &mut Deserializer<'_, '_>) -> Result<()>;

/// The record protocol every composite entity in the format follows.
///
/// A record starts with an i32 version, then carries the fields of every
/// schema revision up to and including that version, back to back. Nothing is
/// tagged and nothing is length-prefixed, so the only way to read a record is
/// to replay the field groups in the order the table declares them.
///
/// Fields whose version was never reached keep the type's [`Default`] values.
// The `'static` bound lets `READERS` mention `Self`; every record type owns
// its data anyway.
pub(crate) trait Versioned: Default + Sized + 'static {
    /// The type name, for error reporting.
    const CLASS: &'static str;

    /// Field readers keyed by the version that introduced them, ascending.
    const READERS: &'static [(i32, Reader<Self>)];

    /// Called with the declared version before any reader runs.
    ///
    /// [`crate::MapData`] keeps it; its first field group changed shape at
    /// version 20 and the reader has to know which side of that line it's on.
    fn version_hint(&mut self, _version: i32) {}

    /// Trailing fields the writer emits outside the version gate.
    fn finish(&mut self, _de: &mut Deserializer<'_, '_>) -> Result<()> {
        Ok(())
    }
}

impl Deserializer<'_, '_> {
    /// Read one versioned record.
    ///
    /// A record declaring a version beyond the reader table is fatal: with no
    /// framing there is no way to skip the fields we don't know about.
    pub(crate) fn read_record<T: Versioned>(&mut self) -> Result<T> {
        let version = self.read_i32()?;
        let max = T::READERS.last().map_or(0, |&(introduced, _)| introduced);
        if version > max {
            return Err(self.error(Kind::UnsupportedVersion {
                class: T::CLASS,
                version,
                max,
            }));
        }

        let mut record = T::default();
        record.version_hint(version);
        for &(introduced, read) in T::READERS {
            if version >= introduced {
                read(&mut record, self)?;
            }
        }
        record.finish(self)?;
        Ok(record)
    }
}
