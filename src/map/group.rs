// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use indexmap::IndexMap;

use super::MapThing;
use crate::de::{Deserializer, Reader, Result, Versioned};

/// A named collection of [`MapThing`]s, keyed by thing id.
///
/// Maps at format version 20 and newer stop carrying a flat thing list and
/// deliver every thing through one of these instead.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct MapThingGroup {
    /// The group's name, stamped onto every member.
    pub name: String,
    /// Members in the order they were read. When two members share an id the
    /// first one read wins and the rest are silently dropped.
    pub things: IndexMap<i32, MapThing>,
    /// Whether the group is shown in the editor.
    pub visible: bool,
    /// Whether the group is clickable in the editor.
    pub selectable: bool,
}

impl Versioned for MapThingGroup {
    const CLASS: &'static str = "MapThingGroup";

    const READERS: &'static [(i32, Reader<Self>)] = &[(1, |group, de| {
        group.name = de.read_string()?;
        let count = de.read_len()?;
        for _ in 0..count {
            let mut thing = de.read_record::<MapThing>()?;
            if thing.first_group_name() != Some(group.name.as_str()) {
                thing.set_group_name(group.name.clone());
            }
            if !de.screen(&mut thing) {
                continue;
            }
            group.things.entry(thing.id).or_insert(thing);
        }
        Ok(())
    })];

    // The writer emits these after the version gate, so they are present no
    // matter which version the record declared.
    fn finish(&mut self, de: &mut Deserializer<'_, '_>) -> Result<()> {
        self.visible = de.read_bool()?;
        self.selectable = de.read_bool()?;
        Ok(())
    }
}
