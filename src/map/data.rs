// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
#![allow(missing_docs)]

use super::{
    named_enum, BloomSettings, Color, DataType, GridPoint, MapThing, MapThingGroup,
    SpawnPointData, TerrainLayerData, Vector2,
};
use crate::de::{Deserializer, Reader, Result, Versioned};

named_enum! {
    /// How the terrain behaves as the player uncovers it.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub enum TerrainTileType {
        #[default]
        Floatin = "FLOATIN",
        Hue = "HUE",
    }
}

/// A fully decoded map: the root of the scene graph.
///
/// The root record has been revised 32 times. The big break is version 20,
/// where the flat thing list stopped being written and things started arriving
/// inside [`MapThingGroup`]s instead; [`things`](MapData::things) is only
/// populated for files older than that.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct MapData {
    /// The version the file declared for the root record.
    pub version: i32,
    /// Flat thing list, format versions below 20 only. Screened against the
    /// game data tables.
    pub things: Vec<MapThing>,
    pub spawn_points: Vec<SpawnPointData>,
    pub starting_cash: i32,
    pub name: String,
    pub loot_table_name: String,
    pub pathfinder_bonus: f32,
    pub scroll_speed: f32,
    pub scroll_angle: f32,
    pub size: GridPoint,
    pub music_name: String,
    pub ambience_name: String,
    /// Terrain layers, flattened one level: each top-level layer's direct
    /// children sit next to it in this list, while also staying nested inside
    /// it. Grandchildren stay nested only. See [`MapData::placements`].
    pub terrain_layers: Vec<TerrainLayerData>,
    pub scripts: Vec<String>,
    pub backdrop_tiles: Vec<String>,
    pub backdrop_columns: i32,
    pub backdrop_color: Color,
    pub backdrop_flyers: Vec<String>,
    pub backdrop_flyer_interval_min: f32,
    pub backdrop_flyer_interval_max: f32,
    pub backdrop_flyer_speed_min: f32,
    pub backdrop_flyer_speed_max: f32,
    pub backdrop_flyer_color: Color,
    pub full_black_time: f32,
    pub fade_in_time: f32,
    pub backdrop_flyer_refract_rate: f32,
    pub backdrop_flyer_refract_amount: f32,
    pub backdrop_rows: i32,
    pub backdrop_tile_refract_rate: f32,
    pub backdrop_tile_refract_amount: f32,
    /// Flyers placed by hand in the editor. Not screened against the data
    /// tables, but entries decoding as [`DataType::Unknown`] are dropped.
    pub preplaced_backdrop_flyers: Vec<MapThing>,
    pub background_bloom: BloomSettings,
    pub terrain_bloom: BloomSettings,
    pub backdrop_flyer_parallax: f32,
    pub tile_assemble_sound: String,
    pub terrain_type: TerrainTileType,
    pub unexplored_color: Color,
    /// Thing groups, format versions 20 and up.
    pub thing_groups: Vec<MapThingGroup>,
    pub brightness: f32,
    pub player_start_fall: bool,
    pub unexplored_contrast: f32,
    pub unexplored_saturation: f32,
    pub tile_phase_in_time_min: f32,
    pub tile_phase_in_time_max: f32,
    pub terrain_light_texture: String,
    pub terrain_light_velocity: Vector2,
    pub keep_weapons: bool,
    pub can_plant_seeds: bool,
    pub title_id: String,
    pub no_weapons: bool,
    pub parallax: f32,
    pub backdrop_saturation: f32,
}

/// A thing's plot-friendly identity: where it sits, what it's called, what it
/// is. Borrowed from the [`MapData`] it came from.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Placement<'a> {
    pub x: i32,
    pub y: i32,
    pub name: &'a str,
    pub data_type: DataType,
}

impl MapData {
    /// Decode a map from `de`.
    pub fn load(de: &mut Deserializer<'_, '_>) -> Result<Self> {
        de.read_record()
    }

    /// Every placed thing in the map: the flat list, every group member, and
    /// every tile of every entry in the flattened terrain-layer list.
    ///
    /// Nothing is filtered out here. Renderers usually want to skip
    /// [`DataType::BackdropFlyer`] themselves.
    pub fn placements(&self) -> Vec<Placement<'_>> {
        let mut placements: Vec<Placement<'_>> = self.things.iter().map(placement).collect();
        for group in &self.thing_groups {
            placements.extend(group.things.values().map(placement));
        }
        for layer in &self.terrain_layers {
            placements.extend(layer.tiles.iter().map(placement));
        }
        placements
    }
}

fn placement(thing: &MapThing) -> Placement<'_> {
    Placement {
        x: thing.location.0,
        y: thing.location.1,
        name: &thing.name,
        data_type: thing.data_type,
    }
}

impl Versioned for MapData {
    const CLASS: &'static str = "MapData";

    fn version_hint(&mut self, version: i32) {
        self.version = version;
    }

    const READERS: &'static [(i32, Reader<Self>)] = &[
        (1, |map, de| {
            // Version 20 moved the flat thing list into thing groups; newer
            // files don't carry it at all, not even a count.
            if map.version < 20 {
                let count = de.read_len()?;
                for _ in 0..count {
                    let mut thing = de.read_record::<MapThing>()?;
                    if de.screen(&mut thing) {
                        map.things.push(thing);
                    }
                }
            }
            let count = de.read_len()?;
            for _ in 0..count {
                map.spawn_points.push(de.read_record::<SpawnPointData>()?);
            }
            map.starting_cash = de.read_i32()?;
            map.name = de.read_string()?;
            map.loot_table_name = de.read_string()?;
            Ok(())
        }),
        (2, |map, de| {
            map.pathfinder_bonus = de.read_f32()?;
            Ok(())
        }),
        (3, |map, de| {
            map.scroll_speed = de.read_f32()?;
            map.scroll_angle = de.read_f32()?;
            Ok(())
        }),
        (4, |map, de| {
            map.size = de.read_point()?;
            Ok(())
        }),
        (5, |map, de| {
            map.music_name = de.read_string()?;
            Ok(())
        }),
        (6, |map, de| {
            map.ambience_name = de.read_string()?;
            Ok(())
        }),
        (7, |map, de| {
            let count = de.read_len()?;
            for _ in 0..count {
                let layer = de.read_record::<TerrainLayerData>()?;
                // Direct children join the flat list as siblings of their
                // parent (and stay nested in it too). Grandchildren don't.
                // The game loads layers this way; keep the asymmetry.
                let linked = layer.linked_layers.clone();
                map.terrain_layers.push(layer);
                map.terrain_layers.extend(linked);
            }
            Ok(())
        }),
        (8, |map, de| {
            map.scripts = de.read_string_list()?;
            Ok(())
        }),
        (9, |map, de| {
            map.backdrop_tiles = de.read_string_list()?;
            map.backdrop_columns = de.read_i32()?;
            map.backdrop_color = de.read_color()?;
            Ok(())
        }),
        (10, |map, de| {
            map.backdrop_flyers = de.read_string_list()?;
            map.backdrop_flyer_interval_min = de.read_f32()?;
            map.backdrop_flyer_interval_max = de.read_f32()?;
            map.backdrop_flyer_speed_min = de.read_f32()?;
            map.backdrop_flyer_speed_max = de.read_f32()?;
            map.backdrop_flyer_color = de.read_color()?;
            Ok(())
        }),
        (11, |map, de| {
            map.full_black_time = de.read_f32()?;
            map.fade_in_time = de.read_f32()?;
            Ok(())
        }),
        (12, |map, de| {
            map.backdrop_flyer_refract_rate = de.read_f32()?;
            map.backdrop_flyer_refract_amount = de.read_f32()?;
            Ok(())
        }),
        (13, |map, de| {
            map.backdrop_rows = de.read_i32()?;
            Ok(())
        }),
        (14, |map, de| {
            map.backdrop_tile_refract_rate = de.read_f32()?;
            map.backdrop_tile_refract_amount = de.read_f32()?;
            Ok(())
        }),
        (15, |map, de| {
            let count = de.read_len()?;
            for _ in 0..count {
                let thing = de.read_record::<MapThing>()?;
                if thing.data_type != DataType::Unknown {
                    map.preplaced_backdrop_flyers.push(thing);
                }
            }
            Ok(())
        }),
        (16, |map, de| {
            map.background_bloom = BloomSettings::load(de)?;
            map.terrain_bloom = BloomSettings::load(de)?;
            Ok(())
        }),
        (17, |map, de| {
            map.backdrop_flyer_parallax = de.read_f32()?;
            Ok(())
        }),
        (18, |map, de| {
            map.tile_assemble_sound = de.read_string()?;
            Ok(())
        }),
        (19, |map, de| {
            map.terrain_type = de.read_enum()?;
            map.unexplored_color = de.read_color()?;
            Ok(())
        }),
        (20, |map, de| {
            let count = de.read_len()?;
            for _ in 0..count {
                map.thing_groups.push(de.read_record::<MapThingGroup>()?);
            }
            Ok(())
        }),
        (21, |map, de| {
            map.brightness = de.read_f32()?;
            Ok(())
        }),
        (22, |map, de| {
            map.player_start_fall = de.read_bool()?;
            Ok(())
        }),
        (23, |map, de| {
            map.unexplored_contrast = de.read_f32()?;
            map.unexplored_saturation = de.read_f32()?;
            Ok(())
        }),
        (24, |map, de| {
            map.tile_phase_in_time_min = de.read_f32()?;
            map.tile_phase_in_time_max = de.read_f32()?;
            Ok(())
        }),
        (25, |map, de| {
            map.terrain_light_texture = de.read_string()?;
            map.terrain_light_velocity = de.read_vector()?;
            Ok(())
        }),
        (26, |map, de| {
            map.keep_weapons = de.read_bool()?;
            Ok(())
        }),
        (27, |map, de| {
            map.can_plant_seeds = de.read_bool()?;
            Ok(())
        }),
        (28, |map, de| {
            map.title_id = de.read_string()?;
            Ok(())
        }),
        (29, |map, de| {
            map.no_weapons = de.read_bool()?;
            Ok(())
        }),
        (30, |map, de| {
            map.parallax = de.read_f32()?;
            Ok(())
        }),
        (31, |map, de| {
            map.backdrop_saturation = de.read_f32()?;
            Ok(())
        }),
        (32, |_, de| {
            // Editor camera state. Read to stay aligned, not kept.
            de.read_vector()?;
            de.read_f32()?;
            Ok(())
        }),
    ];
}
