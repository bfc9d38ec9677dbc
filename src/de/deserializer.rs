// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{Error, Kind, Result};
use crate::game_data::GameData;
use crate::map::{Color, GridPoint, Vector2};

/// The caelmap deserializer.
///
/// A cursor over a map file's bytes, paired with the [`GameData`] tables the
/// loaders consult when screening things. Every multi-byte value in the format
/// is little endian, and nothing is tagged: the cursor only moves forward, one
/// field at a time, in exactly the order the game's writer emitted them.
pub struct Deserializer<'de, 'data> {
    cursor: Cursor<'de>,
    pub(crate) game_data: &'data dyn GameData,
}

struct Cursor<'de> {
    input: &'de [u8],
    position: usize,
}

impl<'de> Cursor<'de> {
    fn new(input: &'de [u8]) -> Self {
        Self { input, position: 0 }
    }

    fn eof(&self) -> Error {
        Error {
            kind: Kind::Eof,
            position: self.position,
        }
    }

    fn next_byte(&mut self) -> Result<u8> {
        let byte = self
            .input
            .get(self.position)
            .copied()
            .ok_or_else(|| self.eof())?;
        self.position += 1;
        Ok(byte)
    }

    fn next_bytes_dyn(&mut self, length: usize) -> Result<&'de [u8]> {
        if self.input.len() - self.position < length {
            return Err(self.eof());
        }

        let ret = &self.input[self.position..self.position + length];
        self.position += length;
        Ok(ret)
    }

    fn next_bytes<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.next_bytes_dyn(N).map(|bytes| {
            let mut array = [0; N];
            array.copy_from_slice(bytes);
            array
        })
    }
}

/// A closed enumeration the format stores by variant name.
///
/// See the `named_enum!` macro, which is where every implementation comes from.
pub trait NamedEnum: Sized {
    /// The type name, for error reporting.
    const CLASS: &'static str;
    /// Looks up the variant stored under `name`.
    fn from_name(name: &str) -> Option<Self>;
}

/// A closed enumeration the format stores by integer discriminant.
pub trait ValueEnum: Sized {
    /// The type name, for error reporting.
    const CLASS: &'static str;
    /// Looks up the variant stored as `value`.
    fn from_value(value: i32) -> Option<Self>;
}

impl<'de, 'data> Deserializer<'de, 'data> {
    /// Create a new deserializer over the given input.
    ///
    /// `game_data` answers the existence queries the loaders use to screen
    /// things; pass [`crate::AllPresent`] if you don't have the real tables.
    pub fn new(input: &'de [u8], game_data: &'data dyn GameData) -> Self {
        Self {
            cursor: Cursor::new(input),
            game_data,
        }
    }

    /// The current byte offset into the input. Diagnostics only.
    pub fn position(&self) -> usize {
        self.cursor.position
    }

    pub(crate) fn error(&self, kind: Kind) -> Error {
        Error {
            kind,
            position: self.cursor.position,
        }
    }

    /// Read a single byte as a bool. Any nonzero value is true.
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.cursor.next_byte()? != 0)
    }

    /// Read a little endian i32.
    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.cursor.next_bytes()?))
    }

    /// Read a little endian i64.
    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.cursor.next_bytes()?))
    }

    /// Read a little endian IEEE-754 binary32 float.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.cursor.next_bytes()?))
    }

    /// Read an i32 that prefixes a string or a list, rejecting negatives.
    pub(crate) fn read_len(&mut self) -> Result<usize> {
        let raw_length = self.read_i32()?;
        raw_length
            .try_into()
            .map_err(|_| self.error(Kind::UnexpectedNegativeLength(raw_length)))
    }

    /// Read a length-prefixed string, borrowing it from the input.
    pub fn read_str(&mut self) -> Result<&'de str> {
        let length = self.read_len()?;
        let out = self.cursor.next_bytes_dyn(length)?;

        std::str::from_utf8(out).map_err(|err| self.error(Kind::StringInvalidUtf8(err)))
    }

    /// Read a length-prefixed string into an owned [`String`].
    pub fn read_string(&mut self) -> Result<String> {
        self.read_str().map(str::to_owned)
    }

    /// Read a count-prefixed list of i32s.
    pub fn read_int_list(&mut self) -> Result<Vec<i32>> {
        let count = self.read_len()?;
        let mut list = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        for _ in 0..count {
            list.push(self.read_i32()?);
        }
        Ok(list)
    }

    /// Read a count-prefixed list of strings.
    pub fn read_string_list(&mut self) -> Result<Vec<String>> {
        let count = self.read_len()?;
        let mut list = Vec::with_capacity(count.min(MAX_PREALLOCATION));
        for _ in 0..count {
            list.push(self.read_string()?);
        }
        Ok(list)
    }

    /// Read a color.
    ///
    /// The writer stores the four channels in the physical order b, g, r, a.
    /// That cross-wiring is part of the format; reproduce it, don't fix it.
    pub fn read_color(&mut self) -> Result<Color> {
        let [b, g, r, a] = self.cursor.next_bytes()?;
        Ok(Color { r, g, b, a })
    }

    /// Read a pair of i32 grid coordinates.
    pub fn read_point(&mut self) -> Result<GridPoint> {
        Ok((self.read_i32()?, self.read_i32()?))
    }

    /// Read a pair of f32s.
    pub fn read_vector(&mut self) -> Result<Vector2> {
        Ok((self.read_f32()?, self.read_f32()?))
    }

    /// Read a string and resolve it to a variant of `T`.
    pub fn read_enum<T: NamedEnum>(&mut self) -> Result<T> {
        let name = self.read_str()?;
        T::from_name(name).ok_or_else(|| {
            self.error(Kind::UnknownVariant {
                class: T::CLASS,
                name: name.to_owned(),
            })
        })
    }

    /// Read an i32 and resolve it to a variant of `T`.
    pub fn read_enum_value<T: ValueEnum>(&mut self) -> Result<T> {
        let value = self.read_i32()?;
        T::from_value(value).ok_or_else(|| {
            self.error(Kind::UnknownDiscriminant {
                class: T::CLASS,
                value,
            })
        })
    }
}

// Counts come straight off the wire, so don't let a corrupt file reserve gigabytes.
const MAX_PREALLOCATION: usize = 1024;

impl std::fmt::Debug for Deserializer<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deserializer")
            .field("position", &self.cursor.position)
            .field("input_len", &self.cursor.input.len())
            .finish_non_exhaustive()
    }
}
