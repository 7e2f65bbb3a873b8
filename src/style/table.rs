//! Per-biome base style table.
//!
//! Every [`BiomeType`] has a built-in style. A JSON file mapping biome names
//! to full style records can replace individual entries.

use std::collections::BTreeMap;
use std::path::Path;

use crate::core::types::Result;
use crate::style::biome_style::{
    AnimationProperties, BiomeStyle, FillPattern, StyleColors, TextureKind, TextureOverlay,
};
use crate::style::color::Rgba;
use crate::terrain::biome::BiomeType;

/// Lookup from biome type to its base render style
#[derive(Clone, Debug, PartialEq)]
pub struct StyleTable {
    // indexed by `BiomeType as usize`, declaration order of `BiomeType::ALL`
    styles: Vec<BiomeStyle>,
}

impl StyleTable {
    /// Base style of `biome`
    pub fn get(&self, biome: BiomeType) -> &BiomeStyle {
        &self.styles[biome as usize]
    }

    /// Replace the style of one biome
    pub fn set(&mut self, biome: BiomeType, style: BiomeStyle) {
        self.styles[biome as usize] = style;
    }

    /// Apply overrides from a JSON object keyed by biome name
    pub fn apply_json(&mut self, json: &str) -> Result<usize> {
        let overrides: BTreeMap<BiomeType, BiomeStyle> = serde_json::from_str(json)?;
        let count = overrides.len();
        for (biome, style) in overrides {
            self.set(biome, style);
        }
        Ok(count)
    }

    /// Built-in table with overrides from `path` applied
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let mut table = Self::default();
        let count = table.apply_json(&json)?;
        log::info!("Loaded {} biome style overrides from {}", count, path.display());
        Ok(table)
    }

    /// Serialize the full table as a JSON object keyed by biome name
    pub fn to_json(&self) -> Result<String> {
        let map: BTreeMap<BiomeType, &BiomeStyle> =
            BiomeType::ALL.iter().map(|&b| (b, self.get(b))).collect();
        Ok(serde_json::to_string_pretty(&map)?)
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self {
            styles: BiomeType::ALL.iter().map(|&b| builtin_style(b)).collect(),
        }
    }
}

const fn hex(v: u32) -> Rgba {
    Rgba::rgb((v >> 16) as u8, (v >> 8 & 0xff) as u8, (v & 0xff) as u8)
}

#[allow(clippy::too_many_arguments)]
fn style(
    name: &str,
    colors: [u32; 3],
    roughness: f32,
    bowing: f32,
    fill_pattern: FillPattern,
    hachure_angle: f32,
    hachure_gap: f32,
    stroke_width: f32,
) -> BiomeStyle {
    BiomeStyle {
        name: name.to_string(),
        colors: StyleColors {
            primary: hex(colors[0]),
            secondary: hex(colors[1]),
            border: hex(colors[2]),
        },
        roughness,
        bowing,
        fill_pattern,
        hachure_angle,
        hachure_gap,
        stroke_width,
        texture: None,
        animation: None,
    }
}

impl BiomeStyle {
    fn with_texture(mut self, kind: TextureKind, density: f32, size: f32) -> Self {
        self.texture = Some(TextureOverlay { kind, density, size });
        self
    }

    fn with_animation(mut self, breathing_intensity: f32, color_pulse: f32, roughness_variation: f32) -> Self {
        self.animation = Some(AnimationProperties {
            breathing_intensity,
            color_pulse,
            roughness_variation,
        });
        self
    }
}

/// Built-in style for one biome
pub fn builtin_style(biome: BiomeType) -> BiomeStyle {
    match biome {
        BiomeType::Grassland => style("Grassland", [0x90EE90, 0x7CFC00, 0x228B22], 1.2, 0.8, FillPattern::ZigzagLine, 45.0, 4.0, 1.5)
            .with_texture(TextureKind::Trees, 0.05, 8.0),
        BiomeType::Forest => style("Forest", [0x228B22, 0x006400, 0x000000], 1.5, 1.0, FillPattern::Hachure, -45.0, 5.0, 2.0)
            .with_texture(TextureKind::Trees, 0.2, 10.0),
        BiomeType::Desert => style("Desert", [0xF4A460, 0xD2B48C, 0x8B4513], 0.8, 0.2, FillPattern::Dots, 0.0, 10.0, 1.0),
        BiomeType::Wasteland => style("Wasteland", [0xA9A9A9, 0x808080, 0x696969], 2.5, 2.0, FillPattern::CrossHatch, 45.0, 8.0, 2.0)
            .with_texture(TextureKind::Rocks, 0.1, 6.0),
        BiomeType::ToxicZone => style("Toxic Zone", [0x7FFF00, 0xADFF2F, 0x32CD32], 3.0, 2.5, FillPattern::Solid, 0.0, 0.0, 1.0)
            .with_animation(0.3, 0.5, 1.5),
        BiomeType::RadiationField => style("Radiation Field", [0xFFFF00, 0xFFD700, 0xDAA520], 1.0, 3.0, FillPattern::ZigzagLine, 0.0, 6.0, 2.0)
            .with_animation(0.5, 0.8, 2.0),
        BiomeType::CrystalGarden => style("Crystal Garden", [0xAFEEEE, 0x40E0D0, 0x00CED1], 0.5, 0.5, FillPattern::Hachure, 60.0, 3.0, 1.0)
            .with_texture(TextureKind::Crystals, 0.15, 12.0)
            .with_animation(0.1, 0.2, 0.5),
        BiomeType::UrbanRuins => style("Urban Ruins", [0x696969, 0x808080, 0x000000], 2.0, 0.2, FillPattern::CrossHatch, 90.0, 10.0, 2.5)
            .with_texture(TextureKind::Ruins, 0.08, 15.0),
        BiomeType::InfectedNormal => style("Infected Territory", [0xE6E6FA, 0xD8BFD8, 0x8A2BE2], 3.5, 4.0, FillPattern::Hachure, 15.0, 7.0, 2.0)
            .with_texture(TextureKind::Corruption, 0.1, 5.0)
            .with_animation(0.7, 0.3, 2.5),
        BiomeType::InfectedHeavy => style("Heavily Infected Territory", [0xDDA0DD, 0xDA70D6, 0xBA55D3], 4.5, 5.0, FillPattern::CrossHatch, 30.0, 6.0, 2.5)
            .with_texture(TextureKind::Corruption, 0.25, 8.0)
            .with_animation(1.0, 0.5, 3.5),
        BiomeType::InfectedCore => style("Infection Core", [0x9932CC, 0x8B008B, 0x4B0082], 6.0, 7.0, FillPattern::Solid, 0.0, 0.0, 3.0)
            .with_texture(TextureKind::Corruption, 0.5, 12.0)
            .with_animation(1.5, 1.0, 5.0),
        BiomeType::Water => style("Water", [0x1E90FF, 0x4169E1, 0x00008B], 0.5, 2.0, FillPattern::Solid, 0.0, 0.0, 1.0),
        BiomeType::Ocean => style("Ocean", [0x0000CD, 0x000080, 0x000000], 1.0, 3.0, FillPattern::Solid, 0.0, 0.0, 1.0),
        BiomeType::River => style("River", [0x87CEEB, 0x00BFFF, 0x1E90FF], 0.2, 4.0, FillPattern::Solid, 0.0, 0.0, 1.0),
        BiomeType::MountainPeak => style("Mountain Peak", [0xDCDCDC, 0xFFFFFF, 0x808080], 4.0, 1.0, FillPattern::Hachure, 45.0, 10.0, 3.0),
        BiomeType::Mountain => style("Mountain", [0xA9A9A9, 0x808080, 0x696969], 3.0, 1.0, FillPattern::CrossHatch, 45.0, 12.0, 2.5),
        BiomeType::Hills => style("Hills", [0xBDB76B, 0xF0E68C, 0x8B4513], 1.5, 0.5, FillPattern::Hachure, 20.0, 6.0, 1.5),
        BiomeType::Snow => style("Snow", [0xFFFAFA, 0xF5F5F5, 0xD3D3D3], 0.8, 0.8, FillPattern::Solid, 0.0, 0.0, 1.0),
        BiomeType::Ice => style("Ice", [0xF0FFFF, 0xE0FFFF, 0xAFEEEE], 0.3, 0.2, FillPattern::CrossHatch, 45.0, 15.0, 0.8),
        BiomeType::SnowyHills => style("Snowy Hills", [0xE6E6FA, 0xFFFFFF, 0xB0C4DE], 1.8, 1.0, FillPattern::Hachure, -20.0, 8.0, 1.5),
        BiomeType::Dunes => style("Dunes", [0xFFE4B5, 0xFFDAB9, 0xCD853F], 1.0, 1.5, FillPattern::ZigzagLine, 0.0, 8.0, 1.2),
        BiomeType::Oasis => style("Oasis", [0x20B2AA, 0x3CB371, 0x2E8B57], 0.7, 1.0, FillPattern::Solid, 0.0, 0.0, 1.0)
            .with_texture(TextureKind::Trees, 0.3, 7.0),
        BiomeType::Sand => style("Sand", [0xF5DEB3, 0xDEB887, 0xD2B48C], 0.5, 0.5, FillPattern::Dots, 0.0, 15.0, 1.0),
        BiomeType::DenseJungle => style("Dense Jungle", [0x008000, 0x006400, 0x2F4F4F], 2.2, 1.8, FillPattern::Hachure, -55.0, 4.0, 2.5)
            .with_texture(TextureKind::Trees, 0.4, 12.0),
        BiomeType::Jungle => style("Jungle", [0x2E8B57, 0x3CB371, 0x6B8E23], 1.8, 1.5, FillPattern::Hachure, -50.0, 5.0, 2.0)
            .with_texture(TextureKind::Trees, 0.25, 10.0),
        BiomeType::DeepWater => style("Deep Water", [0x000080, 0x191970, 0x000000], 1.2, 3.5, FillPattern::Solid, 0.0, 0.0, 1.0),
        BiomeType::Marsh => style("Marsh", [0x556B2F, 0x6B8E23, 0x808000], 1.3, 2.0, FillPattern::ZigzagLine, 10.0, 7.0, 1.5),
        BiomeType::Swamp => style("Swamp", [0x808000, 0x556B2F, 0x2F4F4F], 1.6, 2.5, FillPattern::CrossHatch, 80.0, 9.0, 1.8),
        BiomeType::DenseForest => style("Dense Forest", [0x006400, 0x004D00, 0x000000], 2.0, 1.2, FillPattern::Hachure, -45.0, 4.0, 2.2)
            .with_texture(TextureKind::Trees, 0.35, 11.0),
        BiomeType::Clearing => style("Clearing", [0xD2B48C, 0xDEB887, 0x8B4513], 0.7, 0.4, FillPattern::Solid, 0.0, 0.0, 1.0),
        BiomeType::RollingHills => style("Rolling Hills", [0xB8860B, 0xDAA520, 0x808000], 1.4, 0.8, FillPattern::Hachure, 10.0, 7.0, 1.3),
        BiomeType::FlowerField => style("Flower Field", [0xFFB6C1, 0xFF69B4, 0xC71585], 0.6, 0.6, FillPattern::ZigzagLine, 45.0, 5.0, 1.0)
            .with_texture(TextureKind::Trees, 0.02, 5.0),
        BiomeType::RoughTerrain => style("Rough Terrain", [0xA0522D, 0x8B4513, 0x5A2D0C], 2.8, 1.5, FillPattern::CrossHatch, 45.0, 8.0, 2.2)
            .with_texture(TextureKind::Rocks, 0.15, 7.0),
        BiomeType::AncientRuins => style("Ancient Ruins", [0x778899, 0x708090, 0x2F4F4F], 2.1, 0.3, FillPattern::CrossHatch, 90.0, 12.0, 2.5)
            .with_texture(TextureKind::Ruins, 0.12, 18.0),
        BiomeType::Plain => style("Plain", [0x98FB98, 0x90EE90, 0x3CB371], 1.0, 0.5, FillPattern::Solid, 0.0, 0.0, 1.0),
    }
}
