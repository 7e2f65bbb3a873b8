//! Texture decorations: trees, rocks, crystals, ruins and corruption blots
//! scattered over biomes that carry a [`TextureOverlay`].

use rand::Rng;

use crate::core::types::Vec2;
use crate::render::draw::{DrawStyle, DrawSurface};
use crate::render::overlay::scatter_in_region;
use crate::sampling::PoissonDiskSampler;
use crate::style::{FillPattern, Rgba, TextureKind, TextureOverlay};
use crate::terrain::Region;

const TRUNK: Rgba = Rgba::rgb(0x8b, 0x45, 0x13);
const FOLIAGE: Rgba = Rgba::rgb(0x22, 0x8b, 0x22);
const FOLIAGE_EDGE: Rgba = Rgba::rgb(0x00, 0x64, 0x00);
const ROCK: Rgba = Rgba::rgb(0x80, 0x80, 0x80);
const ROCK_EDGE: Rgba = Rgba::rgb(0x69, 0x69, 0x69);
const CRYSTAL: Rgba = Rgba::new(0, 255, 255, 0.6);
const CRYSTAL_EDGE: Rgba = Rgba::rgb(0, 255, 255);
const RUIN: Rgba = Rgba::rgb(0x69, 0x69, 0x69);
const BLOT: Rgba = Rgba::rgb(0x94, 0x00, 0xd3);
const BLOT_EDGE: Rgba = Rgba::rgb(0x4b, 0x00, 0x82);

/// Rock outline as multiples of the decoration size
const ROCK_OUTLINE: [(f32, f32); 5] = [(-0.8, 0.3), (-0.2, -0.7), (0.7, -0.1), (0.6, 0.6), (-0.5, 0.8)];

/// Scatters and draws texture decorations
#[derive(Clone, Debug)]
pub struct TextureDecorator {
    tile_size: f32,
    max_points: usize,
    tries: u32,
}

impl Default for TextureDecorator {
    fn default() -> Self {
        Self {
            tile_size: 1.0,
            max_points: usize::MAX,
            tries: 10,
        }
    }
}

impl TextureDecorator {
    pub fn new(tile_size: f32) -> Self {
        Self { tile_size, ..Default::default() }
    }

    /// Point budget per region; larger fills are thinned uniformly
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    /// Decorate `region` according to `overlay`. Returns the number of
    /// decorations drawn.
    pub fn apply<R: Rng>(
        &self,
        region: &Region,
        overlay: &TextureOverlay,
        clock: f32,
        surface: &mut dyn DrawSurface,
        rng: &mut R,
    ) -> usize {
        if !(overlay.density > 0.0) || !overlay.density.is_finite() {
            log::warn!("Skipping {:?} texture with density {}", overlay.kind, overlay.density);
            return 0;
        }

        let min_d = 1.0 / overlay.density;
        let sampler = PoissonDiskSampler::new(
            region.bounds.width() as f32 * self.tile_size,
            region.bounds.height() as f32 * self.tile_size,
            min_d,
        )
        .with_max_distance(2.0 * min_d)
        .with_tries(self.tries)
        .with_max_points(self.max_points);

        let mut drawn = 0;
        for p in scatter_in_region(region, self.tile_size, sampler, rng) {
            let size = overlay.size * (1.0 + (clock * 0.05 + p.x + p.y).sin() * 0.1);
            if !(size > 0.0) {
                continue;
            }
            match overlay.kind {
                TextureKind::Trees => draw_tree(surface, p, size),
                TextureKind::Rocks => draw_rock(surface, p, size),
                TextureKind::Crystals => draw_crystal(surface, p, size),
                TextureKind::Ruins => draw_ruins(surface, p, size),
                TextureKind::Corruption => draw_blot(surface, p, size, rng.r#gen::<f32>() * 180.0),
            }
            drawn += 1;
        }
        drawn
    }
}

fn draw_tree(surface: &mut dyn DrawSurface, p: Vec2, s: f32) {
    let trunk_height = s * 1.5;
    let top = p.y - trunk_height;
    surface.line(p.x, p.y, p.x, top, &DrawStyle {
        stroke: Some(TRUNK),
        stroke_width: Some(s / 4.0),
        ..Default::default()
    });
    surface.circle(p.x, top, s * 1.2, &DrawStyle {
        fill: Some(FOLIAGE),
        fill_style: Some(FillPattern::Hachure),
        hachure_angle: Some(60.0),
        hachure_gap: Some(s / 4.0),
        roughness: Some(1.5),
        stroke: Some(FOLIAGE_EDGE),
        ..Default::default()
    });
}

fn draw_rock(surface: &mut dyn DrawSurface, p: Vec2, s: f32) {
    let outline: Vec<Vec2> = ROCK_OUTLINE.iter().map(|&(dx, dy)| p + Vec2::new(dx, dy) * s).collect();
    surface.polygon(&outline, &DrawStyle {
        fill: Some(ROCK),
        fill_style: Some(FillPattern::Solid),
        roughness: Some(2.5),
        stroke: Some(ROCK_EDGE),
        stroke_width: Some(1.5),
        ..Default::default()
    });
}

fn draw_crystal(surface: &mut dyn DrawSurface, p: Vec2, s: f32) {
    let height = s * 1.8;
    let half_base = s * 0.4;
    let outline = [
        Vec2::new(p.x, p.y - height),
        Vec2::new(p.x + half_base, p.y),
        Vec2::new(p.x - half_base, p.y),
    ];
    surface.polygon(&outline, &DrawStyle {
        fill: Some(CRYSTAL),
        fill_style: Some(FillPattern::Solid),
        stroke: Some(CRYSTAL_EDGE),
        stroke_width: Some(2.0),
        roughness: Some(1.0),
        ..Default::default()
    });
}

fn draw_ruins(surface: &mut dyn DrawSurface, p: Vec2, s: f32) {
    surface.rectangle(p.x - s / 2.0, p.y - s, s, s, &DrawStyle {
        roughness: Some(2.8),
        fill: Some(RUIN),
        fill_style: Some(FillPattern::CrossHatch),
        hachure_gap: Some(s / 3.0),
        hachure_angle: Some(45.0),
        stroke: Some(Rgba::BLACK),
        stroke_width: Some(2.0),
        ..Default::default()
    });
    // broken pillar
    surface.rectangle(p.x, p.y - s / 2.0, s / 3.0, s / 2.0, &DrawStyle {
        roughness: Some(2.0),
        stroke: Some(Rgba::BLACK),
        stroke_width: Some(1.0),
        ..Default::default()
    });
}

fn draw_blot(surface: &mut dyn DrawSurface, p: Vec2, s: f32, hachure_angle: f32) {
    surface.circle(p.x, p.y, s, &DrawStyle {
        fill: Some(BLOT),
        fill_style: Some(FillPattern::ZigzagLine),
        hachure_gap: Some(s / 4.0),
        hachure_angle: Some(hachure_angle),
        roughness: Some(3.0),
        stroke: Some(BLOT_EDGE),
        stroke_width: Some(2.0),
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::draw::{DrawCall, RecordingSurface};
    use crate::terrain::{segment_regions, BiomeGrid, BiomeType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn region(w: usize, h: usize) -> Region {
        segment_regions(&BiomeGrid::new(w, h, BiomeType::Forest)).remove(0)
    }

    fn overlay(kind: TextureKind) -> TextureOverlay {
        TextureOverlay { kind, density: 0.2, size: 10.0 }
    }

    #[test]
    fn test_trees_draw_trunk_and_foliage() {
        let mut surface = RecordingSurface::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let drawn = TextureDecorator::default().apply(&region(40, 40), &overlay(TextureKind::Trees), 0.0, &mut surface, &mut rng);
        assert!(drawn > 0);
        assert_eq!(surface.len(), drawn * 2);
        assert!(matches!(surface.calls[0], DrawCall::Line { .. }));
        match &surface.calls[1] {
            DrawCall::Circle { style, .. } => {
                assert_eq!(style.fill, Some(FOLIAGE));
                assert_eq!(style.hachure_angle, Some(60.0));
            }
            other => panic!("Expected foliage circle, got {:?}", other),
        }
    }

    #[test]
    fn test_rocks_are_pentagons() {
        let mut surface = RecordingSurface::new();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        TextureDecorator::default().apply(&region(30, 30), &overlay(TextureKind::Rocks), 0.0, &mut surface, &mut rng);
        assert!(!surface.is_empty());
        for call in &surface.calls {
            let DrawCall::Polygon { points, .. } = call else {
                panic!("Unexpected call {:?}", call);
            };
            assert_eq!(points.len(), 5);
        }
    }

    #[test]
    fn test_crystal_and_ruins_shapes() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut crystals = RecordingSurface::new();
        TextureDecorator::default().apply(&region(30, 30), &overlay(TextureKind::Crystals), 0.0, &mut crystals, &mut rng);
        assert!(crystals.calls.iter().all(|c| matches!(c, DrawCall::Polygon { points, .. } if points.len() == 3)));

        let mut ruins = RecordingSurface::new();
        let drawn = TextureDecorator::default().apply(&region(30, 30), &overlay(TextureKind::Ruins), 0.0, &mut ruins, &mut rng);
        assert_eq!(ruins.len(), drawn * 2);
    }

    #[test]
    fn test_size_animation_bounds() {
        let mut surface = RecordingSurface::new();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        TextureDecorator::default().apply(&region(30, 30), &overlay(TextureKind::Corruption), 37.0, &mut surface, &mut rng);
        for call in &surface.calls {
            if let DrawCall::Circle { diameter, .. } = call {
                assert!(*diameter >= 9.0 - 1e-4 && *diameter <= 11.0 + 1e-4, "Size {} outside ±10%", diameter);
            }
        }
    }

    #[test]
    fn test_zero_density_skipped() {
        let mut surface = RecordingSurface::new();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let zero = TextureOverlay { kind: TextureKind::Trees, density: 0.0, size: 4.0 };
        assert_eq!(TextureDecorator::default().apply(&region(10, 10), &zero, 0.0, &mut surface, &mut rng), 0);
        assert!(surface.is_empty());
    }
}
