// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The enemy spawn scheduling tree: a spawn point owns waves, a wave owns
//! named spawn counts. Pure data, nothing here is screened against the game
//! data tables.

use crate::de::{Reader, Versioned};

/// A named spawn within a wave: spawn `count` of `name`.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SpawnData {
    /// Unit name to spawn (v1).
    pub name: String,
    /// How many to spawn (v1).
    pub count: i32,
    /// How many placement attempts before giving up (v2).
    pub max_attempts: i32,
}

impl Versioned for SpawnData {
    const CLASS: &'static str = "SpawnData";

    const READERS: &'static [(i32, Reader<Self>)] = &[
        (1, |spawn, de| {
            spawn.name = de.read_string()?;
            spawn.count = de.read_i32()?;
            Ok(())
        }),
        (2, |spawn, de| {
            spawn.max_attempts = de.read_i32()?;
            Ok(())
        }),
    ];
}

/// Multipliers applied to a wave each time it repeats.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub struct SpawnScale {
    /// Scales the spawn counts.
    pub count_scalar: f32,
    /// Scales the intervals between spawns.
    pub interval_scalar: f32,
}

/// One wave of spawns, with its timing and loop-back behavior.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SpawnWaveData {
    /// Minimum seconds between spawns (v1).
    pub min_interval: f32,
    /// Maximum seconds between spawns (v1).
    pub max_interval: f32,
    /// What the wave spawns (v1).
    pub spawns: Vec<SpawnData>,
    /// Index of the wave to loop back to when this one finishes (v1).
    pub loop_to_wave: i32,
    /// How many times the loop repeats (v1).
    pub repeat_times: i32,
    /// Per-repeat scaling (v1).
    pub scale: SpawnScale,
    /// Override for the very first spawn's minimum interval (v2).
    pub first_spawn_min_interval: f32,
    /// Override for the very first spawn's maximum interval (v2).
    pub first_spawn_max_interval: f32,
}

impl Versioned for SpawnWaveData {
    const CLASS: &'static str = "SpawnWaveData";

    const READERS: &'static [(i32, Reader<Self>)] = &[
        (1, |wave, de| {
            wave.min_interval = de.read_f32()?;
            wave.max_interval = de.read_f32()?;
            let count = de.read_len()?;
            for _ in 0..count {
                wave.spawns.push(de.read_record::<SpawnData>()?);
            }
            wave.loop_to_wave = de.read_i32()?;
            wave.repeat_times = de.read_i32()?;
            wave.scale.count_scalar = de.read_f32()?;
            wave.scale.interval_scalar = de.read_f32()?;
            Ok(())
        }),
        (2, |wave, de| {
            wave.first_spawn_min_interval = de.read_f32()?;
            wave.first_spawn_max_interval = de.read_f32()?;
            Ok(())
        }),
    ];
}

/// A spawn point placed on the map, owning the waves it emits.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct SpawnPointData {
    /// Spawn point name (v1).
    pub name: String,
    /// Horizontal spawn offset bounds, in grid cells (v1).
    pub x_offset_min: i32,
    /// See [`x_offset_min`](SpawnPointData::x_offset_min).
    pub x_offset_max: i32,
    /// Vertical spawn offset bounds, in grid cells (v1).
    pub y_offset_min: i32,
    /// See [`y_offset_min`](SpawnPointData::y_offset_min).
    pub y_offset_max: i32,
    /// The waves this point runs, in order (v1).
    pub waves: Vec<SpawnWaveData>,
    /// Snap spawned units to the grid horizontally (v2).
    pub snap_horizontal: bool,
    /// Snap spawned units to the grid vertically (v2).
    pub snap_vertical: bool,
}

impl Versioned for SpawnPointData {
    const CLASS: &'static str = "SpawnPointData";

    const READERS: &'static [(i32, Reader<Self>)] = &[
        (1, |point, de| {
            point.name = de.read_string()?;
            point.x_offset_min = de.read_i32()?;
            point.x_offset_max = de.read_i32()?;
            point.y_offset_min = de.read_i32()?;
            point.y_offset_max = de.read_i32()?;
            let count = de.read_len()?;
            for _ in 0..count {
                point.waves.push(de.read_record::<SpawnWaveData>()?);
            }
            Ok(())
        }),
        (2, |point, de| {
            point.snap_horizontal = de.read_bool()?;
            point.snap_vertical = de.read_bool()?;
            Ok(())
        }),
    ];
}
