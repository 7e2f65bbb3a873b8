//! Corruption overlay: animated growths scattered inside a region.
//!
//! Growth positions come from Poisson-disk sampling over the region's
//! bounding box; samples landing on cells outside the region are dropped.
//! Spacing tightens and styling intensifies with the corruption level.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::{Result, Vec2};
use crate::render::draw::{DrawStyle, DrawSurface};
use crate::sampling::PoissonDiskSampler;
use crate::style::{FillPattern, Rgba};
use crate::terrain::Region;

/// Growth fill colour (dark violet); alpha comes from the chaos level
const GROWTH_FILL: Rgba = Rgba::rgb(148, 0, 211);
/// Growth outline colour (indigo)
const GROWTH_STROKE: Rgba = Rgba::rgb(75, 0, 130);

/// Tunables of the corruption overlay
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorruptionParams {
    /// Intensities below this draw nothing
    pub threshold: f32,
    /// `chaos = min(intensity * chaos_scale, chaos_cap)`
    pub chaos_scale: f32,
    pub chaos_cap: f32,
    /// `min_distance = min_distance_base - chaos * min_distance_per_chaos`
    pub min_distance_base: f32,
    pub min_distance_per_chaos: f32,
    /// `max_distance = max_distance_base - chaos * max_distance_per_chaos`
    pub max_distance_base: f32,
    pub max_distance_per_chaos: f32,
    pub tries: u32,
    /// Base growth size is `(size_min + rand * size_range) * intensity`
    pub size_min: f32,
    pub size_range: f32,
    /// Size pulse: `size * (1 + sin(clock * pulse_speed + x) * pulse_amount)`
    pub pulse_speed: f32,
    pub pulse_amount: f32,
}

impl Default for CorruptionParams {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            chaos_scale: 5.0,
            chaos_cap: 8.0,
            min_distance_base: 30.0,
            min_distance_per_chaos: 2.0,
            max_distance_base: 100.0,
            max_distance_per_chaos: 5.0,
            tries: 10,
            size_min: 5.0,
            size_range: 10.0,
            pulse_speed: 0.1,
            pulse_amount: 0.2,
        }
    }
}

/// Corruption intensities must be finite and in `[0, 1]`
pub fn check_intensity(intensity: f32) -> Result<()> {
    if !intensity.is_finite() || !(0.0..=1.0).contains(&intensity) {
        return Err(Error::invalid_input(format!("corruption intensity must be in [0, 1], got {}", intensity)));
    }
    Ok(())
}

/// Points of a Poisson-disk fill over `region`'s bounding box (scaled by
/// `tile_size`) whose floored cell is a member of the region.
pub(crate) fn scatter_in_region<R: Rng>(
    region: &Region,
    tile_size: f32,
    sampler: PoissonDiskSampler,
    rng: &mut R,
) -> Vec<Vec2> {
    if region.is_empty() || !(tile_size > 0.0) {
        return Vec::new();
    }
    let origin = Vec2::new(region.bounds.min_x as f32, region.bounds.min_y as f32) * tile_size;
    let mask = region.mask();
    sampler
        .fill(rng)
        .into_iter()
        .map(|p| p + origin)
        .filter(|p| mask.contains_point(p.x / tile_size, p.y / tile_size))
        .collect()
}

/// Draws corruption growths over regions
#[derive(Clone, Debug)]
pub struct CorruptionOverlay {
    params: CorruptionParams,
    tile_size: f32,
    max_points: usize,
}

impl Default for CorruptionOverlay {
    fn default() -> Self {
        Self::new(CorruptionParams::default())
    }
}

impl CorruptionOverlay {
    /// Overlay working in cell units (`tile_size = 1`)
    pub fn new(params: CorruptionParams) -> Self {
        Self {
            params,
            tile_size: 1.0,
            max_points: usize::MAX,
        }
    }

    /// World units per cell; growth positions are scaled accordingly
    pub fn with_tile_size(mut self, tile_size: f32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Point budget per call; larger fills are thinned uniformly
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn params(&self) -> &CorruptionParams {
        &self.params
    }

    /// Chaos multiplier for a corruption intensity
    pub fn chaos(&self, intensity: f32) -> f32 {
        (intensity * self.params.chaos_scale).min(self.params.chaos_cap)
    }

    /// Sampler spacing for a chaos level, never below a small positive floor
    fn sampler_for(&self, region: &Region, chaos: f32) -> PoissonDiskSampler {
        let p = &self.params;
        let min_d = (p.min_distance_base - chaos * p.min_distance_per_chaos).max(1.0);
        let max_d = (p.max_distance_base - chaos * p.max_distance_per_chaos).max(min_d);
        PoissonDiskSampler::new(
            region.bounds.width() as f32 * self.tile_size,
            region.bounds.height() as f32 * self.tile_size,
            min_d,
        )
        .with_max_distance(max_d)
        .with_tries(p.tries)
        .with_max_points(self.max_points)
    }

    /// Draw style of one growth of diameter `size`
    pub fn growth_style(&self, size: f32, chaos: f32, hachure_angle: f32) -> DrawStyle {
        DrawStyle {
            fill: Some(GROWTH_FILL.with_alpha(0.3 + chaos / 10.0)),
            fill_style: Some(FillPattern::ZigzagLine),
            hachure_angle: Some(hachure_angle),
            hachure_gap: Some((size / 4.0) * (1.0 / (chaos / 4.0 + 1.0))),
            roughness: Some(2.0 + chaos),
            stroke: Some(GROWTH_STROKE.with_alpha(0.5 + chaos / 10.0)),
            stroke_width: Some(1.0 + chaos / 4.0),
            ..Default::default()
        }
    }

    /// Scatter growths over `region` and draw them.
    ///
    /// `intensity` must be finite and in `[0, 1]`. Returns the number of
    /// growths drawn.
    pub fn apply<R: Rng>(
        &self,
        region: &Region,
        intensity: f32,
        clock: f32,
        surface: &mut dyn DrawSurface,
        rng: &mut R,
    ) -> Result<usize> {
        check_intensity(intensity)?;
        if intensity < self.params.threshold {
            return Ok(0);
        }

        let chaos = self.chaos(intensity);
        let points = scatter_in_region(region, self.tile_size, self.sampler_for(region, chaos), rng);

        let p = &self.params;
        let mut drawn = 0;
        for point in points {
            let size = (p.size_min + rng.r#gen::<f32>() * p.size_range) * intensity;
            let size = size * (1.0 + (clock * p.pulse_speed + point.x).sin() * p.pulse_amount);
            let hachure_angle = rng.r#gen::<f32>() * 180.0;
            if !(size > 0.0) {
                continue;
            }
            surface.circle(point.x, point.y, size, &self.growth_style(size, chaos, hachure_angle));
            drawn += 1;
        }

        log::debug!(
            "Corruption overlay on region {:?}: intensity {:.2}, chaos {:.2}, {} growths",
            region.id,
            intensity,
            chaos,
            drawn
        );
        Ok(drawn)
    }
}

/// Draw corruption growths over `region` with the default overlay parameters
pub fn apply_corruption_effects<R: Rng>(
    region: &Region,
    intensity: f32,
    clock: f32,
    surface: &mut dyn DrawSurface,
    rng: &mut R,
) -> Result<usize> {
    CorruptionOverlay::default().apply(region, intensity, clock, surface, rng)
}
