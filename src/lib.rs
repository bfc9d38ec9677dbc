#![warn(rust_2018_idioms, clippy::all, clippy::pedantic)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::all
)]
#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap
)]

//! caelmap
//!
//! caelmap decodes Bastion's binary map files into an owned scene graph of
//! typed entities: things, thing groups, terrain layers, spawn points, and
//! the map-wide settings around them.
//!
//! The format is entirely untagged. There are no record markers and no length
//! prefixes; the only framing is a per-record version integer, and a record
//! simply carries the fields of every schema revision up to its declared
//! version, back to back. Decoding therefore has to consume exactly the
//! fields the writer emitted, in exactly the writer's order, and a single
//! misread desynchronizes everything after it. Records declaring a version
//! newer than this crate knows are rejected outright for the same reason —
//! there is no way to skip fields we can't name.
//!
//! The format also has its quirks, which are reproduced rather than repaired:
//! colors are stored in b, g, r, a channel order; a map's terrain-layer list
//! is flattened exactly one level (children sit next to their parents,
//! grandchildren stay nested); and a thing group reads its visibility flags
//! outside its own version gate.
//!
//! Map files reference game data (units, obstacles, generators, loot tables)
//! by name only. Loaders screen things against a [`GameData`] implementation
//! you inject — things whose names don't resolve are silently dropped, and
//! generators without generator data fall back to obstacles. If you don't
//! have the real tables, [`AllPresent`] accepts everything:
//!
//! ```
//! // The smallest possible map: a root record declaring version 0.
//! let map = caelmap::from_bytes(&0i32.to_le_bytes(), &caelmap::AllPresent).unwrap();
//! assert!(map.things.is_empty());
//! ```
//!
//! Some common terminology:
//! - thing: a placeable map entity ([`MapThing`]) — a unit, obstacle,
//!   generator, decoration, and so on.
//! - thing group: a named, id-deduplicated collection of things.
//! - linked layer: a terrain layer nested under another, forming a tree.
//! - version: the gate integer deciding how many field groups a record
//!   carries.

// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Deserialization framework: the cursor, the record protocol and the errors.
pub mod de;

mod game_data;
mod map;

#[doc(inline)]
pub use de::{Deserializer, Error, Kind, Result};

pub use game_data::{AllPresent, GameData, Validation};
#[doc(inline)]
pub use map::{
    BlendFilter, BloomSettings, Color, DataType, DrawLayer, GridPoint, MapData, MapThing,
    MapThingGroup, Placement, Shader, SpawnData, SpawnPointData, SpawnScale, SpawnWaveData,
    TerrainLayerData, TerrainTileType, Vector2,
};

/// Decode a map from some bytes.
/// It's a convenience function over [`Deserializer::new`] and [`MapData::load`].
///
/// `game_data` answers the existence queries used to screen things; see
/// [`GameData`].
pub fn from_bytes(data: &[u8], game_data: &dyn GameData) -> Result<MapData> {
    let mut deserializer = Deserializer::new(data, game_data);
    MapData::load(&mut deserializer)
}

#[cfg(test)]
mod support {
    /// Builds byte buffers shaped like the game's map writer output.
    #[derive(Default)]
    pub struct Writer {
        pub out: Vec<u8>,
    }

    impl Writer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn bool(&mut self, value: bool) -> &mut Self {
            self.out.push(u8::from(value));
            self
        }

        pub fn int(&mut self, value: i32) -> &mut Self {
            self.out.extend_from_slice(&value.to_le_bytes());
            self
        }

        pub fn long(&mut self, value: i64) -> &mut Self {
            self.out.extend_from_slice(&value.to_le_bytes());
            self
        }

        pub fn float(&mut self, value: f32) -> &mut Self {
            self.out.extend_from_slice(&value.to_le_bytes());
            self
        }

        pub fn string(&mut self, value: &str) -> &mut Self {
            self.int(value.len() as i32);
            self.out.extend_from_slice(value.as_bytes());
            self
        }

        pub fn str_list(&mut self, values: &[&str]) -> &mut Self {
            self.int(values.len() as i32);
            for value in values {
                self.string(value);
            }
            self
        }

        pub fn int_list(&mut self, values: &[i32]) -> &mut Self {
            self.int(values.len() as i32);
            for value in values {
                self.int(*value);
            }
            self
        }

        /// Takes logical rgba, stores the writer's physical b, g, r, a order.
        pub fn color(&mut self, r: u8, g: u8, b: u8, a: u8) -> &mut Self {
            self.out.extend_from_slice(&[b, g, r, a]);
            self
        }

        pub fn vector(&mut self, x: f32, y: f32) -> &mut Self {
            self.float(x).float(y)
        }
    }

    /// A version 1 thing: type, name and location, nothing else.
    pub fn thing_v1(w: &mut Writer, data_type: &str, name: &str, x: i32, y: i32) {
        w.int(1).string(data_type).string(name).int(x).int(y);
    }

    /// A version 9 thing: enough to carry an id and a group name.
    pub fn thing_v9(w: &mut Writer, data_type: &str, name: &str, id: i32, group: &str) {
        w.int(9)
            .string(data_type)
            .string(name)
            .int(0)
            .int(0) // location
            .bool(true)
            .bool(false) // active, activate when seen
            .int(0)
            .int(0) // end location
            .int(id)
            .int(0) // activate on enter id
            .string("") // activate on enter name
            .str_list(&[]) // activate on enter names
            .bool(false) // requires solid ground
            .string(group);
    }

    /// Game data tables backed by fixed name lists.
    #[derive(Default)]
    pub struct Tables {
        pub units: &'static [&'static str],
        pub obstacles: &'static [&'static str],
        pub generators: &'static [&'static str],
        pub loot_tables: &'static [&'static str],
    }

    impl crate::GameData for Tables {
        fn has_unit(&self, name: &str) -> bool {
            self.units.contains(&name)
        }

        fn has_obstacle(&self, name: &str) -> bool {
            self.obstacles.contains(&name)
        }

        fn has_generator(&self, name: &str) -> bool {
            self.generators.contains(&name)
        }

        fn has_loot_table(&self, name: &str) -> bool {
            self.loot_tables.contains(&name)
        }
    }
}


#[cfg(test)]
mod colors {
    use crate::{AllPresent, Color, Deserializer};

    #[test]
    fn channel_cross_wiring() {
        // Physical order on disk is b, g, r, a.
        let mut de = Deserializer::new(&[0x01, 0x02, 0x03, 0x04], &AllPresent);

        let color = de.read_color().unwrap();
        assert_eq!(
            color,
            Color {
                r: 0x03,
                g: 0x02,
                b: 0x01,
                a: 0x04
            }
        );
    }
}

#[cfg(test)]
mod enums {
    use crate::support::Writer;
    use crate::{AllPresent, DataType, Deserializer, DrawLayer, Kind, Shader};

    #[test]
    fn by_name() {
        let mut w = Writer::new();
        w.string("LOOT").string("SUBTITLES");

        let mut de = Deserializer::new(&w.out, &AllPresent);
        assert_eq!(de.read_enum::<DataType>().unwrap(), DataType::Loot);
        assert_eq!(de.read_enum::<DrawLayer>().unwrap(), DrawLayer::Subtitles);
    }

    #[test]
    fn unknown_name() {
        let mut w = Writer::new();
        w.string("DOODAD");

        let mut de = Deserializer::new(&w.out, &AllPresent);
        let err = de.read_enum::<DataType>().unwrap_err();
        assert!(matches!(
            err.kind,
            Kind::UnknownVariant { class: "DataType", ref name } if name == "DOODAD"
        ));
    }

    #[test]
    fn by_value() {
        let mut w = Writer::new();
        w.int(7);

        let mut de = Deserializer::new(&w.out, &AllPresent);
        assert_eq!(de.read_enum_value::<Shader>().unwrap(), Shader::GodRays);
    }

    #[test]
    fn unknown_discriminant() {
        let mut w = Writer::new();
        w.int(8);

        let mut de = Deserializer::new(&w.out, &AllPresent);
        let err = de.read_enum_value::<Shader>().unwrap_err();
        assert!(matches!(
            err.kind,
            Kind::UnknownDiscriminant {
                class: "Shader",
                value: 8
            }
        ));
    }
}


#[cfg(test)]
mod groups {
    use crate::support::{thing_v9, Tables, Writer};
    use crate::{AllPresent, DataType, Deserializer, MapThingGroup};

    #[test]
    fn first_id_wins() {
        let mut w = Writer::new();
        w.int(1).string("bravo").int(2);
        thing_v9(&mut w, "UNKNOWN", "rock", 7, "bravo");
        thing_v9(&mut w, "UNKNOWN", "tree", 7, "bravo");
        w.bool(true).bool(false); // trailing flags
        w.int(0x5eed);

        let mut de = Deserializer::new(&w.out, &AllPresent);
        let group = de.read_record::<MapThingGroup>().unwrap();

        assert_eq!(group.name, "bravo");
        assert_eq!(group.things.len(), 1);
        assert_eq!(group.things[&7].name, "rock");
        assert!(group.visible);
        assert!(!group.selectable);
        assert_eq!(de.read_i32().unwrap(), 0x5eed);
    }

    #[test]
    fn members_are_restamped() {
        let mut w = Writer::new();
        w.int(1).string("bravo").int(1);
        thing_v9(&mut w, "UNKNOWN", "rock", 1, "other");
        w.bool(true).bool(true);

        let mut de = Deserializer::new(&w.out, &AllPresent);
        let group = de.read_record::<MapThingGroup>().unwrap();

        let thing = &group.things[&1];
        assert_eq!(thing.group_name, "bravo");
        assert_eq!(thing.group_names, vec!["bravo"]);
    }

    #[test]
    fn members_are_screened() {
        let tables = Tables {
            units: &["squirt"],
            obstacles: &["windbag-den"],
            ..Tables::default()
        };

        let mut w = Writer::new();
        w.int(1).string("pack").int(4);
        thing_v9(&mut w, "UNIT", "squirt", 1, "pack");
        thing_v9(&mut w, "UNIT", "nobody", 2, "pack");
        thing_v9(&mut w, "GENERATOR", "windbag-den", 3, "pack");
        thing_v9(&mut w, "LOOT", "no-such-table", 4, "pack");
        w.bool(true).bool(true);

        let mut de = Deserializer::new(&w.out, &tables);
        let group = de.read_record::<MapThingGroup>().unwrap();

        assert_eq!(group.things.len(), 2);
        assert_eq!(group.things[&1].data_type, DataType::Unit);
        // No generator data, but obstacle data exists: reclassified, kept.
        assert_eq!(group.things[&3].data_type, DataType::Obstacle);
    }
}

#[cfg(test)]
mod validation {
    use crate::support::Tables;
    use crate::{AllPresent, DataType, Validation};

    #[test]
    fn rules() {
        let tables = Tables {
            units: &["squirt"],
            obstacles: &["windbag-den"],
            loot_tables: &["common"],
            ..Tables::default()
        };

        assert!(Validation::of(&tables, DataType::Unit, "squirt").is_accept());
        assert!(Validation::of(&tables, DataType::Unit, "nobody").is_reject());
        assert!(Validation::of(&tables, DataType::Obstacle, "windbag-den").is_accept());
        assert!(Validation::of(&tables, DataType::Obstacle, "nobody").is_reject());
        assert!(Validation::of(&tables, DataType::Loot, "common").is_accept());
        assert!(Validation::of(&tables, DataType::Loot, "rare").is_reject());

        // No generator table entries at all: fall back to the obstacle data.
        assert_eq!(
            Validation::of(&tables, DataType::Generator, "windbag-den"),
            Validation::Reclassify(DataType::Obstacle)
        );
        assert!(Validation::of(&tables, DataType::Generator, "nobody").is_reject());
    }

    #[test]
    fn other_types_skip_lookup() {
        // Empty tables reject everything they're asked about, so acceptance
        // here means no lookup happened.
        let tables = Tables::default();
        assert!(Validation::of(&tables, DataType::Unknown, "x").is_accept());
        assert!(Validation::of(&tables, DataType::Projectile, "x").is_accept());
        assert!(Validation::of(&tables, DataType::BackdropFlyer, "x").is_accept());
    }

    #[test]
    fn generator_with_data_stays_generator() {
        let tables = Tables {
            generators: &["core"],
            obstacles: &["core"],
            ..Tables::default()
        };
        assert!(Validation::of(&tables, DataType::Generator, "core").is_accept());

        assert!(Validation::of(&AllPresent, DataType::Generator, "anything").is_accept());
    }
}

#[cfg(test)]
mod terrain {
    use crate::support::{thing_v1, Tables, Writer};
    use crate::{AllPresent, BlendFilter, Color, Deserializer, Shader, TerrainLayerData};

    #[test]
    fn full_version() {
        let mut w = Writer::new();
        w.int(7)
            .string("base")
            .color(10, 20, 30, 255) // 1
            .int(1); // 2: one tile
        thing_v1(&mut w, "TERRAIN_TILE", "tile", 3, 4);
        w.int(0) // 3: no linked layers
            .bool(true) // 4
            .int(1) // 5: multiply
            .int(5) // 6: terrain shader
            .float(0.2)
            .float(0.4) // 7
            .int(0x5eed);

        let mut de = Deserializer::new(&w.out, &AllPresent);
        let layer = de.read_record::<TerrainLayerData>().unwrap();

        assert_eq!(layer.name, "base");
        assert_eq!(
            layer.color,
            Color {
                r: 10,
                g: 20,
                b: 30,
                a: 255
            }
        );
        assert_eq!(layer.tiles.len(), 1);
        assert_eq!(layer.tiles[0].location, (3, 4));
        assert!(layer.mask);
        assert_eq!(layer.blend_filter, BlendFilter::Multiply);
        assert_eq!(layer.shader, Shader::Terrain);
        assert!((layer.contrast - 0.2).abs() < f32::EPSILON);
        assert!((layer.saturation - 0.4).abs() < f32::EPSILON);
        assert_eq!(de.read_i32().unwrap(), 0x5eed);
    }

    #[test]
    fn old_version_keeps_defaults() {
        let mut w = Writer::new();
        w.int(1).string("bare").color(0, 0, 0, 0);

        let mut de = Deserializer::new(&w.out, &AllPresent);
        let layer = de.read_record::<TerrainLayerData>().unwrap();

        assert!(layer.tiles.is_empty());
        assert!(layer.linked_layers.is_empty());
        assert_eq!(layer.blend_filter, BlendFilter::None);
        assert_eq!(layer.shader, Shader::None);
        assert!((layer.saturation - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn tiles_skip_screening() {
        // A unit the tables have never heard of survives as a tile.
        let mut w = Writer::new();
        w.int(2).string("layer").color(0, 0, 0, 0).int(1);
        thing_v1(&mut w, "UNIT", "nobody", 0, 0);

        let tables = Tables::default();
        let mut de = Deserializer::new(&w.out, &tables);
        let layer = de.read_record::<TerrainLayerData>().unwrap();

        assert_eq!(layer.tiles.len(), 1);
        assert_eq!(layer.tiles[0].name, "nobody");
    }

    #[test]
    fn nested_layers() {
        let mut w = Writer::new();
        w.int(3).string("parent").color(0, 0, 0, 0).int(0).int(1); // one child
        w.int(3).string("child").color(0, 0, 0, 0).int(0).int(1); // one grandchild
        w.int(1).string("grandchild").color(0, 0, 0, 0);

        let mut de = Deserializer::new(&w.out, &AllPresent);
        let layer = de.read_record::<TerrainLayerData>().unwrap();

        assert_eq!(layer.linked_layers.len(), 1);
        assert_eq!(layer.linked_layers[0].name, "child");
        assert_eq!(layer.linked_layers[0].linked_layers[0].name, "grandchild");
    }
}
