//! CPU-side viewport culling for regions and point sets

use crate::core::types::Position;
use crate::math::Viewport;
use crate::terrain::Region;

/// Margin (in viewport units) added around the viewport when culling regions
pub const DEFAULT_VIEWPORT_BUFFER: f32 = 64.0;

/// Filters regions and points against a viewport.
///
/// Re-uses its output buffer across frames to avoid per-frame heap churn.
#[derive(Clone, Debug)]
pub struct ViewportCuller {
    buffer: f32,
    visible: Vec<usize>,
}

impl Default for ViewportCuller {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_BUFFER)
    }
}

impl ViewportCuller {
    pub fn new(buffer: f32) -> Self {
        Self {
            buffer: sanitize_buffer(buffer),
            visible: Vec::new(),
        }
    }

    pub fn buffer(&self) -> f32 {
        self.buffer
    }

    pub fn set_buffer(&mut self, buffer: f32) {
        self.buffer = sanitize_buffer(buffer);
    }

    /// Indices of regions whose bounds strictly overlap the buffered viewport,
    /// in input order. Valid until the next call.
    pub fn visible_indices(&mut self, regions: &[Region], viewport: &Viewport) -> &[usize] {
        let expanded = viewport.expanded(self.buffer);
        self.visible.clear();
        self.visible.extend(
            regions
                .iter()
                .enumerate()
                .filter(|(_, r)| expanded.overlaps_strict(&r.bounds))
                .map(|(i, _)| i),
        );
        &self.visible
    }

    /// Regions whose bounds strictly overlap the buffered viewport.
    ///
    /// Touching the buffered edge in a single point or line does not count.
    pub fn cull_regions(&self, regions: &[Region], viewport: &Viewport) -> Vec<Region> {
        let expanded = viewport.expanded(self.buffer);
        regions
            .iter()
            .filter(|r| expanded.overlaps_strict(&r.bounds))
            .cloned()
            .collect()
    }

    /// Points inside the un-buffered viewport, edges inclusive
    pub fn cull_points(&self, points: &[Position], viewport: &Viewport) -> Vec<Position> {
        points
            .iter()
            .copied()
            .filter(|p| viewport.contains_point(*p))
            .collect()
    }
}

fn sanitize_buffer(buffer: f32) -> f32 {
    if buffer.is_finite() && buffer >= 0.0 {
        buffer
    } else {
        log::warn!("Invalid viewport buffer {}, using 0", buffer);
        0.0
    }
}

/// Cull regions against `viewport` expanded by `buffer` (default 64)
pub fn cull_regions_for_viewport(
    regions: &[Region],
    viewport: &Viewport,
    buffer: Option<f32>,
) -> Vec<Region> {
    ViewportCuller::new(buffer.unwrap_or(DEFAULT_VIEWPORT_BUFFER)).cull_regions(regions, viewport)
}

/// Keep the points that lie inside `viewport`
pub fn cull_points_for_viewport(points: &[Position], viewport: &Viewport) -> Vec<Position> {
    ViewportCuller::new(0.0).cull_points(points, viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::terrain::{segment_regions, BiomeGrid, BiomeType};

    fn forest_in_grassland() -> Vec<Region> {
        let mut grid = BiomeGrid::new(3, 3, BiomeType::Grassland);
        grid.set(1, 1, BiomeType::Forest);
        segment_regions(&grid)
    }

    #[test]
    fn test_strict_overlap_example() {
        let regions = forest_in_grassland();
        let vp = Viewport::from_bounds(0.0, 0.0, 1.0, 1.0);
        let visible = cull_regions_for_viewport(&regions, &vp, Some(0.0));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].biome, BiomeType::Grassland);
        assert_eq!(visible[0].len(), 8);
    }

    #[test]
    fn test_default_buffer_keeps_nearby() {
        let regions = forest_in_grassland();
        let vp = Viewport::from_bounds(50.0, 50.0, 60.0, 60.0);
        assert_eq!(cull_regions_for_viewport(&regions, &vp, None).len(), 2);
        assert!(cull_regions_for_viewport(&regions, &vp, Some(0.0)).is_empty());
    }

    #[test]
    fn test_far_regions_excluded() {
        let regions = forest_in_grassland();
        let vp = Viewport::from_bounds(500.0, 500.0, 600.0, 600.0);
        assert!(cull_regions_for_viewport(&regions, &vp, None).is_empty());
    }

    #[test]
    fn test_cull_preserves_order() {
        let regions = forest_in_grassland();
        let vp = Viewport::from_bounds(-1.0, -1.0, 4.0, 4.0);
        let visible = cull_regions_for_viewport(&regions, &vp, Some(0.0));
        let ids: Vec<_> = visible.iter().map(|r| r.id).collect();
        let expected: Vec<_> = regions.iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_visible_indices_match_cull() {
        let regions = forest_in_grassland();
        let vp = Viewport::from_bounds(0.0, 0.0, 1.0, 1.0);
        let mut culler = ViewportCuller::new(0.0);
        assert_eq!(culler.visible_indices(&regions, &vp), &[0]);
    }

    #[test]
    fn test_points_inclusive_and_ordered() {
        let vp = Viewport::from_bounds(0.0, 0.0, 10.0, 10.0);
        let points = [
            Vec2::new(10.0, 10.0),
            Vec2::new(-0.1, 5.0),
            Vec2::new(3.0, 4.0),
            Vec2::new(11.0, 0.0),
        ];
        let kept = cull_points_for_viewport(&points, &vp);
        assert_eq!(kept, vec![Vec2::new(10.0, 10.0), Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn test_negative_buffer_clamped() {
        let culler = ViewportCuller::new(-5.0);
        assert_eq!(culler.buffer(), 0.0);
    }
}
