//! Region fill with time-animated base styles.
//!
//! Each region is drawn as one polygon along its traced outline using the
//! region's base style.
//! Biomes with [`AnimationProperties`](crate::style::AnimationProperties)
//! breathe: roughness wanders with 2D Perlin noise, bowing follows a sine,
//! and the primary colour pulses towards the secondary.

use noise::{NoiseFn, Perlin};

use crate::render::draw::{DrawStyle, DrawSurface};
use crate::style::BiomeStyle;
use crate::core::types::Vec2;
use crate::terrain::Region;

/// Clock units per animation time unit
const CLOCK_SCALE: f32 = 100.0;

/// Per-region animation seed in `[-1, 1]`, derived from the region's first cell
pub fn region_seed(region: &Region) -> f32 {
    region.seed_hash() as f32 / u32::MAX as f32 * 2.0 - 1.0
}

/// Draws region fills
#[derive(Clone, Debug)]
pub struct RegionFiller {
    noise: Perlin,
}

impl Default for RegionFiller {
    fn default() -> Self {
        Self::new(0)
    }
}

impl RegionFiller {
    pub fn new(noise_seed: u32) -> Self {
        Self {
            noise: Perlin::new(noise_seed),
        }
    }

    /// Fill style of `style` at `clock` for a region with animation `seed`
    pub fn fill_style(&self, style: &BiomeStyle, clock: f32, seed: f32) -> DrawStyle {
        let mut primary = style.colors.primary;
        let mut roughness = style.roughness;
        let mut bowing = style.bowing;

        if let Some(anim) = &style.animation {
            let time = clock / CLOCK_SCALE;
            if anim.roughness_variation != 0.0 {
                let n = self.noise.get([seed as f64, time as f64]) as f32;
                roughness += n * anim.roughness_variation;
            }
            if anim.breathing_intensity != 0.0 {
                bowing += (time + seed).sin() * anim.breathing_intensity;
            }
            if anim.color_pulse != 0.0 {
                let pulse = ((time * 2.0 + seed).sin() + 1.0) / 2.0;
                primary = primary.mix(&style.colors.secondary, pulse * anim.color_pulse, primary.a);
            }
        }

        DrawStyle {
            fill: Some(primary),
            fill_style: Some(style.fill_pattern),
            stroke: Some(style.colors.border),
            stroke_width: Some(style.stroke_width),
            roughness: Some(roughness.max(0.0)),
            bowing: Some(bowing),
            hachure_angle: Some(style.hachure_angle),
            hachure_gap: Some(style.hachure_gap),
        }
    }

    /// Draw `region` as one polygon along `outline` (see
    /// [`trace_outline`](crate::terrain::trace_outline)). Returns false when
    /// the outline has fewer than three vertices.
    pub fn fill_region(
        &self,
        region: &Region,
        outline: &[Vec2],
        style: &BiomeStyle,
        clock: f32,
        surface: &mut dyn DrawSurface,
    ) -> bool {
        if outline.len() < 3 {
            return false;
        }
        surface.polygon(outline, &self.fill_style(style, clock, region_seed(region)));
        true
    }
}
