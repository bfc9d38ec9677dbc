// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod bloom;
mod data;
mod group;
mod spawn;
mod terrain;
mod thing;

pub use bloom::BloomSettings;
pub use data::{MapData, Placement, TerrainTileType};
pub use group::MapThingGroup;
pub use spawn::{SpawnData, SpawnPointData, SpawnScale, SpawnWaveData};
pub use terrain::{BlendFilter, Shader, TerrainLayerData};
pub use thing::{DataType, DrawLayer, MapThing};

/// Integer grid coordinates, x then y.
pub type GridPoint = (i32, i32);

/// A pair of f32s, x then y.
pub type Vector2 = (f32, f32);

/// An rgba color, one byte per channel, as .NET's `Color` lays it out.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[allow(missing_docs)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque white, the stand-in the loaders use for "untinted".
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Declares a closed enum the format stores by variant name, along with its
/// on-disk names, and wires it up to [`crate::de::NamedEnum`].
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ident:ident {
            $($(#[$vmeta:meta])* $variant:ident = $name:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $ident {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::de::NamedEnum for $ident {
            const CLASS: &'static str = stringify!($ident);

            fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl $ident {
            /// The name this variant is stored under on disk.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

/// Declares a closed enum the format stores by integer discriminant and wires
/// it up to [`crate::de::ValueEnum`].
macro_rules! value_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $ident:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $ident {
            $($(#[$vmeta])* $variant),+
        }

        impl $crate::de::ValueEnum for $ident {
            const CLASS: &'static str = stringify!($ident);

            fn from_value(value: i32) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use {named_enum, value_enum};
