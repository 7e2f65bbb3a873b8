//! Boundary blending between adjacent regions.
//!
//! Every member cell is checked against its four neighbours. When a
//! neighbour belongs to a different region, the side of the cell facing it
//! becomes a boundary segment drawn with a 50/50 blend of both regions'
//! base styles. A shared edge is seen once from each side, so by default it
//! is emitted twice; [`TransitionBlender::with_dedup`] collapses the pair.

use std::collections::{HashMap, HashSet};

use crate::core::error::Error;
use crate::core::types::{IVec2, Result, Vec2};
use crate::render::draw::{DrawStyle, DrawSurface};
use crate::style::{BlendedStyle, StyleTable};
use crate::terrain::{BiomeType, Region, RegionId, RegionLookup};

/// Neighbour offsets and the cell corners (in cell units, relative to the
/// cell origin) of the side facing that neighbour
const SIDES: [(IVec2, IVec2, IVec2); 4] = [
    // right
    (IVec2::new(1, 0), IVec2::new(1, 0), IVec2::new(1, 1)),
    // left
    (IVec2::new(-1, 0), IVec2::new(0, 0), IVec2::new(0, 1)),
    // below
    (IVec2::new(0, 1), IVec2::new(0, 1), IVec2::new(1, 1)),
    // above
    (IVec2::new(0, -1), IVec2::new(0, 0), IVec2::new(1, 0)),
];

/// One boundary segment between two regions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Region owning the cell the edge was emitted from
    pub from: RegionId,
    /// Region on the other side of the edge
    pub to: RegionId,
    /// World-space endpoints
    pub start: Vec2,
    pub end: Vec2,
    pub style: BlendedStyle,
}

impl Transition {
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }
}

/// Computes and draws region boundary transitions
#[derive(Clone, Debug)]
pub struct TransitionBlender {
    tile_size: f32,
    blend_ratio: f32,
    alpha: f32,
    width_factor: f32,
    dedup: bool,
}

impl TransitionBlender {
    /// Blender with a 0.5 blend ratio, 0.5 alpha and 10× stroke widening.
    ///
    /// Fails with `InvalidInput` if `tile_size` is negative or not finite.
    pub fn new(tile_size: f32) -> Result<Self> {
        if !tile_size.is_finite() || tile_size < 0.0 {
            return Err(Error::invalid_input(format!("tile size must be finite and >= 0, got {}", tile_size)));
        }
        Ok(Self {
            tile_size,
            blend_ratio: 0.5,
            alpha: 0.5,
            width_factor: 10.0,
            dedup: false,
        })
    }

    /// Emit each shared edge once instead of once per side. Edges are keyed
    /// by their corner pair in cell units; both sides yield the same pair.
    pub fn with_dedup(mut self, dedup: bool) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_blend_ratio(mut self, ratio: f32) -> Self {
        self.blend_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    pub fn with_width_factor(mut self, factor: f32) -> Self {
        self.width_factor = factor;
        self
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Transitions of `regions`, building a fresh cell lookup
    pub fn compute_transitions(&self, regions: &[Region], styles: &StyleTable) -> Vec<Transition> {
        let lookup = RegionLookup::build(regions);
        self.compute_with_lookup(regions.iter(), &lookup, styles)
    }

    /// Transitions of `regions` using a prebuilt lookup.
    ///
    /// The lookup may cover more regions than `regions` (e.g. a lookup over
    /// the full segmentation while only visible regions are iterated).
    pub fn compute_with_lookup<'a, I>(
        &self,
        regions: I,
        lookup: &RegionLookup,
        styles: &StyleTable,
    ) -> Vec<Transition>
    where
        I: IntoIterator<Item = &'a Region>,
    {
        let mut transitions = Vec::new();
        let mut region_count = 0;
        let mut blends: HashMap<(BiomeType, BiomeType), BlendedStyle> = HashMap::new();
        let mut seen: HashSet<(IVec2, IVec2)> = HashSet::new();
        let t = self.tile_size;

        for region in regions {
            region_count += 1;
            for &cell in &region.cells {
                for &(offset, a, b) in &SIDES {
                    let n = cell + offset;
                    let Some((other_id, other_biome)) = lookup.owner(n.x, n.y) else {
                        continue;
                    };
                    if other_id == region.id {
                        continue;
                    }
                    let (corner_a, corner_b) = (cell + a, cell + b);
                    if self.dedup && !seen.insert((corner_a, corner_b)) {
                        continue;
                    }

                    let style = *blends.entry((region.biome, other_biome)).or_insert_with(|| {
                        styles.get(region.biome).blend(styles.get(other_biome), self.blend_ratio, self.alpha)
                    });

                    transitions.push(Transition {
                        from: region.id,
                        to: other_id,
                        start: corner_a.as_vec2() * t,
                        end: corner_b.as_vec2() * t,
                        style,
                    });
                }
            }
        }

        log::debug!(
            "Computed {} transitions for {} regions ({} style blends)",
            transitions.len(),
            region_count,
            blends.len()
        );
        transitions
    }

    /// Draw style of one transition line
    pub fn draw_style(&self, transition: &Transition) -> DrawStyle {
        DrawStyle {
            stroke: Some(transition.style.colors.primary),
            stroke_width: Some(transition.style.stroke_width * self.width_factor),
            roughness: Some(0.0),
            ..Default::default()
        }
    }

    /// Draw every non-degenerate transition as a two-point polyline
    pub fn render(&self, transitions: &[Transition], surface: &mut dyn DrawSurface) -> usize {
        let mut drawn = 0;
        for transition in transitions.iter().filter(|t| !t.is_degenerate()) {
            surface.polyline(&[transition.start, transition.end], &self.draw_style(transition));
            drawn += 1;
        }
        drawn
    }
}

/// Compute and draw all boundary transitions between `regions`
pub fn render_biome_transitions(
    regions: &[Region],
    tile_size: f32,
    styles: &StyleTable,
    surface: &mut dyn DrawSurface,
) -> Result<usize> {
    let blender = TransitionBlender::new(tile_size)?;
    let transitions = blender.compute_transitions(regions, styles);
    Ok(blender.render(&transitions, surface))
}
