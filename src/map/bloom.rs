// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::de::{Deserializer, Result};

/// Bloom post-processing parameters for one render pass.
///
/// One of the few blocks in the format with no version gate: always a name
/// followed by six floats.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct BloomSettings {
    /// Preset name.
    pub name: String,
    /// Brightness cutoff below which pixels don't bloom.
    pub bloom_threshold: f32,
    /// Gaussian blur radius.
    pub blur_amount: f32,
    /// Intensity of the bloomed image.
    pub bloom_intensity: f32,
    /// Intensity of the base image.
    pub base_intensity: f32,
    /// Saturation of the bloomed image.
    pub bloom_saturation: f32,
    /// Saturation of the base image.
    pub base_saturation: f32,
}

impl BloomSettings {
    pub(crate) fn load(de: &mut Deserializer<'_, '_>) -> Result<Self> {
        Ok(Self {
            name: de.read_string()?,
            bloom_threshold: de.read_f32()?,
            blur_amount: de.read_f32()?,
            bloom_intensity: de.read_f32()?,
            base_intensity: de.read_f32()?,
            bloom_saturation: de.read_f32()?,
            base_saturation: de.read_f32()?,
        })
    }
}
