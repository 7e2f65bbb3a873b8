//! Per-frame biome rendering pipeline.
//!
//! grid → segmentation → viewport culling → region fills → transitions →
//! texture decorations → corruption growths, all emitted on a
//! [`DrawSurface`]. Segmentation and outline tracing run only when the grid
//! changes; the cell→region lookup is cached per segmentation generation.

use std::time::Instant;

use rand::Rng;

use crate::core::time::AnimationClock;
use crate::core::types::{Result, Vec2};
use crate::math::Viewport;
use crate::render::config::RenderConfig;
use crate::render::culling::ViewportCuller;
use crate::render::decoration::TextureDecorator;
use crate::render::draw::DrawSurface;
use crate::render::fill::RegionFiller;
use crate::render::overlay::{check_intensity, CorruptionOverlay};
use crate::render::profiler::{FrameCounts, RenderStats, RenderingProfiler};
use crate::render::transition::TransitionBlender;
use crate::style::StyleTable;
use crate::terrain::{trace_outline, BiomeGrid, Region, RegionLookup, RegionSegmenter};

/// Draws segmented biome grids frame by frame
pub struct BiomeRenderer {
    config: RenderConfig,
    styles: StyleTable,
    segmenter: RegionSegmenter,
    culler: ViewportCuller,
    blender: TransitionBlender,
    filler: RegionFiller,
    decorator: TextureDecorator,
    corruption: CorruptionOverlay,
    profiler: RenderingProfiler,

    regions: Vec<Region>,
    /// Fill polygon per region, parallel to `regions`
    outlines: Vec<Vec<Vec2>>,
    /// Bumped on every re-segmentation
    generation: u64,
    lookup: Option<(u64, RegionLookup)>,
}

impl BiomeRenderer {
    pub fn new(config: RenderConfig, styles: StyleTable) -> Result<Self> {
        config.validate()?;
        let blender = TransitionBlender::new(config.tile_size)?
            .with_blend_ratio(config.transition_blend_ratio)
            .with_alpha(config.transition_alpha)
            .with_width_factor(config.transition_width_factor)
            .with_dedup(config.dedup_transitions);

        let max_points = config.max_overlay_points.unwrap_or(usize::MAX);
        Ok(Self {
            culler: ViewportCuller::new(config.viewport_buffer),
            filler: RegionFiller::new(config.noise_seed),
            decorator: TextureDecorator::new(config.tile_size).with_max_points(max_points),
            corruption: CorruptionOverlay::new(config.corruption.clone())
                .with_tile_size(config.tile_size)
                .with_max_points(max_points),
            profiler: RenderingProfiler::new(config.profiler_history),
            segmenter: RegionSegmenter::new(),
            blender,
            config,
            styles,
            regions: Vec::new(),
            outlines: Vec::new(),
            generation: 0,
            lookup: None,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn styles(&self) -> &StyleTable {
        &self.styles
    }

    pub fn styles_mut(&mut self) -> &mut StyleTable {
        &mut self.styles
    }

    /// Replace the world grid and re-segment it
    pub fn set_grid(&mut self, grid: &BiomeGrid) {
        self.regions = self.segmenter.segment(grid);
        let tile_size = self.config.tile_size;
        self.outlines = self.regions.iter().map(|r| trace_outline(r, tile_size)).collect();
        self.generation += 1;
        log::info!(
            "World grid {}x{} segmented into {} regions (generation {})",
            grid.width(),
            grid.height(),
            self.regions.len(),
            self.generation
        );
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Traced fill outline of each region, in world units
    pub fn outlines(&self) -> &[Vec<Vec2>] {
        &self.outlines
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cell→region lookup of the current segmentation, rebuilt only after
    /// the grid changed
    pub fn lookup(&mut self) -> &RegionLookup {
        let generation = self.generation;
        if !matches!(&self.lookup, Some((g, _)) if *g == generation) {
            self.lookup = None;
        }
        let regions = &self.regions;
        &self
            .lookup
            .get_or_insert_with(|| {
                log::debug!("Rebuilding region lookup for generation {}", generation);
                (generation, RegionLookup::build(regions))
            })
            .1
    }

    pub fn profiler(&self) -> &RenderingProfiler {
        &self.profiler
    }

    /// Render one frame.
    ///
    /// `viewport` is in cell coordinates. `corruption_level` in `[0, 1]`
    /// drives the corruption overlay on infected regions; an invalid level
    /// fails before anything is drawn.
    pub fn render_frame<R: Rng>(
        &mut self,
        viewport: &Viewport,
        clock: &AnimationClock,
        corruption_level: f32,
        surface: &mut dyn DrawSurface,
        rng: &mut R,
    ) -> Result<RenderStats> {
        check_intensity(corruption_level)?;
        let start = Instant::now();
        self.lookup();

        let Self {
            culler,
            regions,
            outlines,
            lookup,
            blender,
            filler,
            decorator,
            corruption,
            styles,
            config,
            profiler,
            ..
        } = self;
        let Some((_, lookup)) = &*lookup else {
            return Ok(profiler.latest());
        };

        let regions: &[Region] = regions;
        let t = clock.value();
        let indices = culler.visible_indices(regions, viewport);
        for &i in indices {
            let region = &regions[i];
            filler.fill_region(region, &outlines[i], styles.get(region.biome), t, surface);
        }
        let visible: Vec<&Region> = indices.iter().map(|&i| &regions[i]).collect();

        let transitions = blender.compute_with_lookup(visible.iter().copied(), lookup, styles);
        blender.render(&transitions, surface);

        let mut entities = 0;
        if config.draw_textures {
            for region in &visible {
                if let Some(texture) = &styles.get(region.biome).texture {
                    entities += decorator.apply(region, texture, t, surface, rng);
                }
            }
        }

        for region in visible.iter().filter(|r| r.biome.is_infected()) {
            entities += corruption.apply(region, corruption_level, t, surface, rng)?;
        }

        let counts = FrameCounts {
            regions: visible.len(),
            entities,
        };
        let now = Instant::now();
        Ok(profiler.record(now.duration_since(start), now, counts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::render::draw::{DrawCall, RecordingSurface};
    use crate::terrain::BiomeType;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn renderer() -> BiomeRenderer {
        let config = RenderConfig {
            tile_size: 10.0,
            viewport_buffer: 0.0,
            draw_textures: false,
            ..Default::default()
        };
        BiomeRenderer::new(config, StyleTable::default()).unwrap()
    }

    #[test]
    fn test_render_two_cells() {
        let mut r = renderer();
        r.set_grid(&BiomeGrid::from_rows(vec![vec![BiomeType::Grassland, BiomeType::Forest]]).unwrap());
        let mut surface = RecordingSurface::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let vp = Viewport::from_bounds(-1.0, -1.0, 3.0, 2.0);
        let stats = r.render_frame(&vp, &AnimationClock::new(), 0.0, &mut surface, &mut rng).unwrap();

        assert_eq!(stats.regions_rendered, 2);
        assert_eq!(stats.entities_rendered, 0);
        let fills = surface.calls.iter().filter(|c| matches!(c, DrawCall::Polygon { .. })).count();
        assert_eq!(fills, 2);
        assert_eq!(surface.polylines().count(), 2);
        // fills come before transitions
        assert!(matches!(surface.calls[1], DrawCall::Polygon { .. }));
        assert!(matches!(surface.calls[3], DrawCall::Polyline { .. }));
    }

    #[test]
    fn test_one_fill_per_region() {
        // 40x40 cells split into two large regions draw two polygons, not 1600 rects
        let mut grid = BiomeGrid::new(40, 40, BiomeType::Grassland);
        for y in 0..40 {
            for x in 20..40 {
                grid.set(x, y, BiomeType::Desert);
            }
        }
        let mut r = renderer();
        r.set_grid(&grid);
        assert_eq!(r.outlines().len(), 2);

        let mut surface = RecordingSurface::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let vp = Viewport::from_bounds(0.0, 0.0, 40.0, 40.0);
        r.render_frame(&vp, &AnimationClock::new(), 0.0, &mut surface, &mut rng).unwrap();
        assert_eq!(surface.calls.iter().filter(|c| matches!(c, DrawCall::Polygon { .. })).count(), 2);
        assert!(!surface.calls.iter().any(|c| matches!(c, DrawCall::Rectangle { .. })));
    }

    #[test]
    fn test_lookup_cached_per_generation() {
        let mut r = renderer();
        r.set_grid(&BiomeGrid::new(4, 4, BiomeType::Plain));
        assert_eq!(r.generation(), 1);
        assert_eq!(r.lookup().owned_cells(), 16);

        r.set_grid(&BiomeGrid::new(2, 2, BiomeType::Plain));
        assert_eq!(r.generation(), 2);
        assert_eq!(r.lookup().owned_cells(), 4, "Lookup rebuilt after re-segmentation");
    }

    #[test]
    fn test_offscreen_regions_not_drawn() {
        let mut r = renderer();
        r.set_grid(&BiomeGrid::new(4, 4, BiomeType::Desert));
        let mut surface = RecordingSurface::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let vp = Viewport::from_bounds(100.0, 100.0, 110.0, 110.0);
        let stats = r.render_frame(&vp, &AnimationClock::new(), 0.0, &mut surface, &mut rng).unwrap();
        assert_eq!(stats.regions_rendered, 0);
        assert!(surface.is_empty());
    }

    #[test]
    fn test_corruption_on_infected_regions() {
        let mut r = renderer();
        r.set_grid(&BiomeGrid::new(60, 60, BiomeType::InfectedHeavy));
        let vp = Viewport::from_bounds(0.0, 0.0, 60.0, 60.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let mut calm = RecordingSurface::new();
        let stats = r.render_frame(&vp, &AnimationClock::new(), 0.05, &mut calm, &mut rng).unwrap();
        assert_eq!(stats.entities_rendered, 0);

        let mut wild = RecordingSurface::new();
        let stats = r.render_frame(&vp, &AnimationClock::new(), 0.9, &mut wild, &mut rng).unwrap();
        assert!(stats.entities_rendered > 0);
        assert_eq!(wild.circles().count(), stats.entities_rendered);
    }

    #[test]
    fn test_invalid_corruption_level() {
        let mut grid = BiomeGrid::new(4, 4, BiomeType::Grassland);
        grid.set(1, 1, BiomeType::InfectedCore);
        let vp = Viewport::from_bounds(0.0, 0.0, 4.0, 4.0);
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let mut r = renderer();
        r.set_grid(&grid);
        let mut surface = RecordingSurface::new();
        let result = r.render_frame(&vp, &AnimationClock::new(), 1.5, &mut surface, &mut rng);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
        assert!(surface.is_empty(), "Nothing drawn before the level is rejected");
        assert_eq!(r.profiler().frames_recorded(), 0);

        // Rejected even when no infected region is visible
        let mut clean = renderer();
        clean.set_grid(&BiomeGrid::new(4, 4, BiomeType::Grassland));
        for bad in [1.5, -0.2, f32::NAN] {
            let result = clean.render_frame(&vp, &AnimationClock::new(), bad, &mut surface, &mut rng);
            assert!(matches!(result, Err(Error::InvalidInput(_))), "Level {} accepted", bad);
        }
        assert!(surface.is_empty());
    }

    #[test]
    fn test_textures_drawn_when_enabled() {
        let config = RenderConfig { tile_size: 8.0, ..Default::default() };
        let mut r = BiomeRenderer::new(config, StyleTable::default()).unwrap();
        r.set_grid(&BiomeGrid::new(20, 20, BiomeType::Forest));
        let mut surface = RecordingSurface::new();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let vp = Viewport::from_bounds(0.0, 0.0, 20.0, 20.0);
        let stats = r.render_frame(&vp, &AnimationClock::new(), 0.0, &mut surface, &mut rng).unwrap();
        assert!(stats.entities_rendered > 0);
        assert!(surface.calls.iter().any(|c| matches!(c, DrawCall::Line { .. })), "Tree trunks drawn");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = RenderConfig { tile_size: 0.0, ..Default::default() };
        assert!(matches!(BiomeRenderer::new(config, StyleTable::default()), Err(Error::Config(_))));
    }
}
