// Copyright (c) 2025 Lily Lyons
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
#![allow(missing_docs)]

use super::{value_enum, Color, MapThing};
use crate::de::{Reader, Versioned};

value_enum! {
    /// How a terrain layer blends over the layers below it.
    ///
    /// Stored by discriminant, unlike the name-keyed enums elsewhere in the
    /// format.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub enum BlendFilter {
        #[default]
        None = 0,
        Multiply = 1,
        Mask = 2,
    }
}

value_enum! {
    /// Post-process shader applied to a terrain layer. Stored by discriminant.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub enum Shader {
        #[default]
        None = 0,
        Refract = 1,
        Dissolve = 2,
        Contrast = 3,
        Saturate = 4,
        Terrain = 5,
        Outline = 6,
        GodRays = 7,
    }
}

/// One terrain layer: a tinted batch of tiles plus any layers linked under it.
///
/// Linked layers nest to arbitrary depth, each one a full record read with the
/// same loader. The format gives no cycle protection and none is attempted; a
/// well-formed file is a tree.
#[derive(Clone, PartialEq, Debug)]
pub struct TerrainLayerData {
    /// Layer name (v1).
    pub name: String,
    /// Tint applied to every tile in the layer (v1).
    pub color: Color,
    /// The layer's tiles (v2). Tiles skip the data-table screening that map
    /// things go through.
    pub tiles: Vec<MapThing>,
    /// Layers nested under this one (v3).
    pub linked_layers: Vec<TerrainLayerData>,
    /// Whether the layer masks the ones below it (v4).
    pub mask: bool,
    /// Blend mode over lower layers (v5).
    pub blend_filter: BlendFilter,
    /// Post-process shader (v6).
    pub shader: Shader,
    /// Contrast pushed through the shader (v6).
    pub contrast: f32,
    /// Saturation pushed through the shader (v7).
    pub saturation: f32,
}

impl Default for TerrainLayerData {
    fn default() -> Self {
        Self {
            name: String::new(),
            color: Color::WHITE,
            tiles: Vec::new(),
            linked_layers: Vec::new(),
            mask: false,
            blend_filter: BlendFilter::default(),
            shader: Shader::default(),
            contrast: 0.0,
            saturation: 0.3,
        }
    }
}

impl Versioned for TerrainLayerData {
    const CLASS: &'static str = "TerrainLayerData";

    const READERS: &'static [(i32, Reader<Self>)] = &[
        (1, |layer, de| {
            layer.name = de.read_string()?;
            layer.color = de.read_color()?;
            Ok(())
        }),
        (2, |layer, de| {
            let count = de.read_len()?;
            for _ in 0..count {
                layer.tiles.push(de.read_record::<MapThing>()?);
            }
            Ok(())
        }),
        (3, |layer, de| {
            let count = de.read_len()?;
            for _ in 0..count {
                layer.linked_layers.push(de.read_record::<TerrainLayerData>()?);
            }
            Ok(())
        }),
        (4, |layer, de| {
            layer.mask = de.read_bool()?;
            Ok(())
        }),
        (5, |layer, de| {
            layer.blend_filter = de.read_enum_value()?;
            Ok(())
        }),
        (6, |layer, de| {
            layer.shader = de.read_enum_value()?;
            layer.contrast = de.read_f32()?;
            Ok(())
        }),
        (7, |layer, de| {
            layer.saturation = de.read_f32()?;
            Ok(())
        }),
    ];
}
