//! Closed style records shared by base biome styles and blended styles.

use serde::{Deserialize, Serialize};

use crate::style::color::Rgba;
use crate::style::lerp::Lerp;

/// Fill pattern understood by the drawing surface
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillPattern {
    #[default]
    Solid,
    Hachure,
    CrossHatch,
    ZigzagLine,
    Dots,
}

/// Decoration scattered over a biome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    Trees,
    Rocks,
    Crystals,
    Ruins,
    Corruption,
}

/// Texture overlay parameters of a biome
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureOverlay {
    pub kind: TextureKind,
    /// Points per unit area; sampling distance is `1 / density`
    pub density: f32,
    /// Base decoration size in pixels
    pub size: f32,
}

/// Time-varying style perturbation of a biome
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationProperties {
    pub breathing_intensity: f32,
    pub color_pulse: f32,
    pub roughness_variation: f32,
}

/// Colour triple used by every biome style
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleColors {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub border: Rgba,
}

/// Base render style of one biome type
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BiomeStyle {
    pub name: String,
    pub colors: StyleColors,
    pub roughness: f32,
    pub bowing: f32,
    pub fill_pattern: FillPattern,
    pub hachure_angle: f32,
    pub hachure_gap: f32,
    pub stroke_width: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<TextureOverlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationProperties>,
}

/// Result of blending two base styles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlendedStyle {
    pub colors: StyleColors,
    pub roughness: f32,
    pub stroke_width: f32,
}

impl BiomeStyle {
    /// Blend towards `other` by `ratio`.
    ///
    /// Colours interpolate channel-wise in RGB and take the fixed `alpha`;
    /// roughness and stroke width interpolate linearly.
    pub fn blend(&self, other: &BiomeStyle, ratio: f32, alpha: f32) -> BlendedStyle {
        let t = ratio.clamp(0.0, 1.0);
        BlendedStyle {
            colors: StyleColors {
                primary: self.colors.primary.mix(&other.colors.primary, t, alpha),
                secondary: self.colors.secondary.mix(&other.colors.secondary, t, alpha),
                border: self.colors.border.mix(&other.colors.border, t, alpha),
            },
            roughness: self.roughness.lerp(&other.roughness, t),
            stroke_width: self.stroke_width.lerp(&other.stroke_width, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(primary: &str, roughness: f32, stroke_width: f32) -> BiomeStyle {
        let c = Rgba::from_hex(primary).unwrap();
        BiomeStyle {
            name: "test".to_string(),
            colors: StyleColors { primary: c, secondary: c, border: Rgba::BLACK },
            roughness,
            bowing: 1.0,
            fill_pattern: FillPattern::Hachure,
            hachure_angle: 45.0,
            hachure_gap: 4.0,
            stroke_width,
            texture: None,
            animation: None,
        }
    }

    #[test]
    fn test_blend_midpoint() {
        let a = style("#90EE90", 1.2, 1.5);
        let b = style("#228B22", 1.5, 2.0);
        let blended = a.blend(&b, 0.5, 0.5);
        assert_eq!(blended.colors.primary, Rgba::new(89, 189, 89, 0.5));
        assert!((blended.roughness - 1.35).abs() < 1e-6);
        assert!((blended.stroke_width - 1.75).abs() < 1e-6);
    }

    #[test]
    fn test_blend_commutative_at_half() {
        let a = style("#1E90FF", 0.5, 1.0);
        let b = style("#F4A460", 0.8, 1.0);
        let ab = a.blend(&b, 0.5, 0.5);
        let ba = b.blend(&a, 0.5, 0.5);
        assert_eq!(ab.colors, ba.colors);
        assert!((ab.roughness - ba.roughness).abs() < 1e-6);
    }

    #[test]
    fn test_blend_endpoints() {
        let a = style("#000000", 0.0, 1.0);
        let b = style("#FFFFFF", 4.0, 3.0);
        let at_a = a.blend(&b, 0.0, 0.5);
        assert_eq!((at_a.colors.primary.r, at_a.roughness), (0, 0.0));
        let at_b = a.blend(&b, 1.0, 0.5);
        assert_eq!((at_b.colors.primary.r, at_b.roughness), (255, 4.0));
    }

    #[test]
    fn test_fill_pattern_serde() {
        let json = serde_json::to_string(&FillPattern::ZigzagLine).unwrap();
        assert_eq!(json, "\"zigzag-line\"");
    }
}
