// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use enum_as_inner::EnumAsInner;

use crate::de::Deserializer;
use crate::map::{DataType, MapThing};

/// The game's data tables, as far as the map loader cares: four name-keyed
/// existence queries.
///
/// Map files reference units, obstacles, generators and loot tables by name
/// without carrying their definitions, so the loader asks these queries
/// whether a referenced name actually exists and silently drops things that
/// don't resolve. Implement this over your extracted game data, or use
/// [`AllPresent`] to skip the screening entirely.
pub trait GameData {
    /// Whether a unit named `name` exists.
    fn has_unit(&self, name: &str) -> bool;
    /// Whether an obstacle named `name` exists.
    fn has_obstacle(&self, name: &str) -> bool;
    /// Whether a generator named `name` exists.
    fn has_generator(&self, name: &str) -> bool;
    /// Whether a loot table named `name` exists.
    fn has_loot_table(&self, name: &str) -> bool;
}

/// [`GameData`] that claims every name exists.
///
/// Decodes any map without the real tables on hand: nothing gets dropped and
/// generators are never reclassified.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllPresent;

impl GameData for AllPresent {
    fn has_unit(&self, _name: &str) -> bool {
        true
    }

    fn has_obstacle(&self, _name: &str) -> bool {
        true
    }

    fn has_generator(&self, _name: &str) -> bool {
        true
    }

    fn has_loot_table(&self, _name: &str) -> bool {
        true
    }
}

/// The verdict on one thing, judged by declared type and name.
///
/// Screening is a normal part of loading, not an error: a rejected thing is
/// quietly left out of its collection.
#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumAsInner)]
pub enum Validation {
    /// The name resolves; keep the thing as declared.
    Accept,
    /// Keep the thing, but under a different type. Generators without
    /// generator data fall back to their obstacle entry.
    Reclassify(DataType),
    /// The name doesn't resolve; drop the thing.
    Reject,
}

impl Validation {
    /// Judge a thing of type `data_type` named `name` against the tables.
    pub fn of(game_data: &dyn GameData, data_type: DataType, name: &str) -> Self {
        match data_type {
            DataType::Unit if !game_data.has_unit(name) => Self::Reject,
            DataType::Obstacle if !game_data.has_obstacle(name) => Self::Reject,
            DataType::Generator if !game_data.has_generator(name) => {
                if game_data.has_obstacle(name) {
                    Self::Reclassify(DataType::Obstacle)
                } else {
                    Self::Reject
                }
            }
            DataType::Loot if !game_data.has_loot_table(name) => Self::Reject,
            _ => Self::Accept,
        }
    }
}

impl Deserializer<'_, '_> {
    /// Screen a freshly read thing, reclassifying it in place.
    /// Returns false when the thing should be dropped.
    pub(crate) fn screen(&self, thing: &mut MapThing) -> bool {
        match Validation::of(self.game_data, thing.data_type, &thing.name) {
            Validation::Accept => true,
            Validation::Reclassify(data_type) => {
                thing.data_type = data_type;
                true
            }
            Validation::Reject => false,
        }
    }
}
