// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod deserializer;
mod error;
mod record;

pub use deserializer::{Deserializer, NamedEnum, ValueEnum};
pub use error::{Error, Kind, Result};
pub(crate) use record::{Reader, Versioned};
