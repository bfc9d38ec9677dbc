// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
#![allow(missing_docs)]

use super::{named_enum, Color, GridPoint};
use crate::de::{Reader, Versioned};

named_enum! {
    /// What kind of game object a [`MapThing`] stands for.
    ///
    /// The kind decides which data table the thing is checked against when the
    /// map is screened, and [`Generator`](DataType::Generator) things can come
    /// out the other side as [`Obstacle`](DataType::Obstacle); see
    /// [`crate::Validation`].
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub enum DataType {
        #[default]
        Unknown = "UNKNOWN",
        Obstacle = "OBSTACLE",
        Generator = "GENERATOR",
        Unit = "UNIT",
        Projectile = "PROJECTILE",
        DamageField = "DAMAGE_FIELD",
        SpawnPoint = "SPAWN_POINT",
        Loot = "LOOT",
        MapArea = "MAP_AREA",
        TerrainTile = "TERRAIN_TILE",
        BackdropFlyer = "BACKDROP_FLYER",
        Weapon = "WEAPON",
        Animation = "ANIMATION",
    }
}

named_enum! {
    /// Draw ordering bucket for a thing's sprite.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub enum DrawLayer {
        #[default]
        Background = "BACKGROUND",
        BackgroundHigh = "BACKGROUND_HIGH",
        Subterrain = "SUBTERRAIN",
        Terrain = "TERRAIN",
        Decal = "DECAL",
        DecalHigh = "DECAL_HIGH",
        Ground = "GROUND",
        Flying = "FLYING",
        Overlay = "OVERLAY",
        Subtitles = "SUBTITLES",
        Count = "COUNT",
    }
}

/// A placeable map entity: a unit, an obstacle, a decoration, anything that
/// occupies a grid cell.
///
/// Things have been revised 35 times over the format's life, so most of these
/// fields only exist in newer files. A field whose version a file never
/// reached keeps the default from [`MapThing::default`].
#[derive(Clone, PartialEq, Debug)]
pub struct MapThing {
    // v1
    pub data_type: DataType,
    pub name: String,
    pub location: GridPoint,
    // v2
    pub active: bool,
    pub activate_when_seen: bool,
    // v3
    pub end_location: GridPoint,
    // v4
    pub id: i32,
    // v5..=7: single-target activation first, superseded by the list forms,
    // but old files still carry both.
    pub activate_on_enter_id: i32,
    pub activate_on_enter_name: String,
    pub activate_on_enter_names: Vec<String>,
    // v8
    pub requires_solid_ground: bool,
    // v9
    pub group_name: String,
    // v10
    pub use_target_ai: bool,
    pub use_move_ai: bool,
    pub use_attack_ai: bool,
    /// Raw XNA `SpriteEffects` bits (v11). Kept as the wire integer.
    pub flip_effect: i32,
    // v12
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    // v13
    pub activate_on_enter_ids: Vec<i32>,
    // v14
    pub drop_loot: bool,
    // v15
    pub sort_modifier: i32,
    // v16
    pub color: Color,
    // v17
    pub scale: f32,
    // v18
    pub use_unexplored_hue: bool,
    // v19
    pub health_fraction: f32,
    // v20..=21
    pub walkable: bool,
    pub invulnerable: bool,
    // v22
    pub use_as_fx: bool,
    pub rotation_speed: f32,
    pub draw_layer: DrawLayer,
    // v23..=24
    pub offset_z: f32,
    pub angle: f32,
    // v25
    pub fall_in: bool,
    // v26
    pub attach_to_id: i32,
    // v27
    pub activation_range: f32,
    // v28
    pub help_text_id: String,
    // v29
    pub flying: bool,
    /// Every group this thing belongs to (v30). The primary [`group_name`]
    /// folds itself in here when the list is read.
    ///
    /// [`group_name`]: MapThing::group_name
    pub group_names: Vec<String>,
    // v31..=35
    pub give_xp: bool,
    pub friendly: bool,
    pub parallax: bool,
    pub ignore_grid_manager: bool,
    pub wobble: bool,
}

impl Default for MapThing {
    fn default() -> Self {
        Self {
            data_type: DataType::default(),
            name: String::new(),
            location: (0, 0),
            active: false,
            activate_when_seen: false,
            end_location: (0, 0),
            id: 0,
            activate_on_enter_id: 0,
            activate_on_enter_name: String::new(),
            activate_on_enter_names: Vec::new(),
            requires_solid_ground: false,
            group_name: String::new(),
            use_target_ai: false,
            use_move_ai: false,
            use_attack_ai: false,
            flip_effect: 0,
            flip_horizontal: false,
            flip_vertical: false,
            activate_on_enter_ids: Vec::new(),
            drop_loot: false,
            sort_modifier: 0,
            color: Color::WHITE,
            scale: 1.0,
            use_unexplored_hue: false,
            health_fraction: 1.0,
            walkable: false,
            invulnerable: false,
            use_as_fx: false,
            rotation_speed: 0.0,
            draw_layer: DrawLayer::default(),
            offset_z: 0.0,
            angle: 0.0,
            fall_in: false,
            attach_to_id: 0,
            activation_range: 0.0,
            help_text_id: String::new(),
            flying: false,
            group_names: Vec::new(),
            give_xp: false,
            friendly: false,
            parallax: false,
            ignore_grid_manager: false,
            wobble: false,
        }
    }
}

impl MapThing {
    /// The first group this thing lists itself under, if any.
    pub fn first_group_name(&self) -> Option<&str> {
        self.group_names.first().map(String::as_str)
    }

    /// Replaces every group membership with `name`.
    pub fn set_group_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.group_name.clone_from(&name);
        self.group_names = vec![name];
    }

    /// Adds a group membership. Empty names and repeats are no-ops.
    pub fn add_to_group(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() || self.group_names.contains(&name) {
            return;
        }
        self.group_names.push(name);
    }
}

impl Versioned for MapThing {
    const CLASS: &'static str = "MapThing";

    const READERS: &'static [(i32, Reader<Self>)] = &[
        (1, |thing, de| {
            thing.data_type = de.read_enum()?;
            thing.name = de.read_string()?;
            thing.location = de.read_point()?;
            Ok(())
        }),
        (2, |thing, de| {
            thing.active = de.read_bool()?;
            thing.activate_when_seen = de.read_bool()?;
            Ok(())
        }),
        (3, |thing, de| {
            thing.end_location = de.read_point()?;
            Ok(())
        }),
        (4, |thing, de| {
            thing.id = de.read_i32()?;
            Ok(())
        }),
        (5, |thing, de| {
            thing.activate_on_enter_id = de.read_i32()?;
            Ok(())
        }),
        (6, |thing, de| {
            thing.activate_on_enter_name = de.read_string()?;
            Ok(())
        }),
        (7, |thing, de| {
            thing.activate_on_enter_names = de.read_string_list()?;
            Ok(())
        }),
        (8, |thing, de| {
            thing.requires_solid_ground = de.read_bool()?;
            Ok(())
        }),
        (9, |thing, de| {
            thing.group_name = de.read_string()?;
            Ok(())
        }),
        (10, |thing, de| {
            thing.use_target_ai = de.read_bool()?;
            thing.use_move_ai = de.read_bool()?;
            thing.use_attack_ai = de.read_bool()?;
            Ok(())
        }),
        (11, |thing, de| {
            thing.flip_effect = de.read_i32()?;
            Ok(())
        }),
        (12, |thing, de| {
            thing.flip_horizontal = de.read_bool()?;
            thing.flip_vertical = de.read_bool()?;
            Ok(())
        }),
        (13, |thing, de| {
            thing.activate_on_enter_ids = de.read_int_list()?;
            Ok(())
        }),
        (14, |thing, de| {
            thing.drop_loot = de.read_bool()?;
            Ok(())
        }),
        (15, |thing, de| {
            thing.sort_modifier = de.read_i32()?;
            Ok(())
        }),
        (16, |thing, de| {
            thing.color = de.read_color()?;
            Ok(())
        }),
        (17, |thing, de| {
            thing.scale = de.read_f32()?;
            Ok(())
        }),
        (18, |thing, de| {
            thing.use_unexplored_hue = de.read_bool()?;
            Ok(())
        }),
        (19, |thing, de| {
            thing.health_fraction = de.read_f32()?;
            Ok(())
        }),
        (20, |thing, de| {
            thing.walkable = de.read_bool()?;
            Ok(())
        }),
        (21, |thing, de| {
            thing.invulnerable = de.read_bool()?;
            Ok(())
        }),
        (22, |thing, de| {
            thing.use_as_fx = de.read_bool()?;
            thing.rotation_speed = de.read_f32()?;
            thing.draw_layer = de.read_enum()?;
            Ok(())
        }),
        (23, |thing, de| {
            thing.offset_z = de.read_f32()?;
            Ok(())
        }),
        (24, |thing, de| {
            thing.angle = de.read_f32()?;
            Ok(())
        }),
        (25, |thing, de| {
            thing.fall_in = de.read_bool()?;
            Ok(())
        }),
        (26, |thing, de| {
            thing.attach_to_id = de.read_i32()?;
            Ok(())
        }),
        (27, |thing, de| {
            thing.activation_range = de.read_f32()?;
            Ok(())
        }),
        (28, |thing, de| {
            thing.help_text_id = de.read_string()?;
            Ok(())
        }),
        (29, |thing, de| {
            thing.flying = de.read_bool()?;
            Ok(())
        }),
        (30, |thing, de| {
            thing.group_names = de.read_string_list()?;
            // The primary name predates the list; fold it in.
            let primary = thing.group_name.clone();
            thing.add_to_group(primary);
            Ok(())
        }),
        (31, |thing, de| {
            thing.give_xp = de.read_bool()?;
            Ok(())
        }),
        (32, |thing, de| {
            thing.friendly = de.read_bool()?;
            Ok(())
        }),
        (33, |thing, de| {
            thing.parallax = de.read_bool()?;
            Ok(())
        }),
        (34, |thing, de| {
            thing.ignore_grid_manager = de.read_bool()?;
            Ok(())
        }),
        (35, |thing, de| {
            thing.wobble = de.read_bool()?;
            Ok(())
        }),
    ];
}
