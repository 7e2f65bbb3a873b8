//! Connected-component segmentation of a biome grid into regions.
//!
//! Algorithm:
//! 1. Walk cells in row-major order, skipping cells already assigned
//! 2. Breadth-first flood fill from each unassigned cell over the
//!    4-neighbourhood, following cells of the seed's classification
//! 3. Grow the bounding box as cells are dequeued
//!
//! Each cell is marked exactly once, so a pass is O(cells).

use std::collections::VecDeque;

use crate::core::types::IVec2;
use crate::math::CellBounds;
use crate::terrain::grid::BiomeGrid;
use crate::terrain::region::{Region, RegionId};

/// 4-connectivity offsets: right, left, down, up
const NEIGHBORS: [IVec2; 4] = [
    IVec2::new(1, 0),
    IVec2::new(-1, 0),
    IVec2::new(0, 1),
    IVec2::new(0, -1),
];

/// Labels a grid into maximal 4-connected same-biome regions.
///
/// Keeps its scratch buffers between passes so re-segmenting a grid of the
/// same size does not reallocate the visited marks or the queue.
#[derive(Default)]
pub struct RegionSegmenter {
    visited: Vec<bool>,
    queue: VecDeque<IVec2>,
}

impl RegionSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment `grid` into regions. Region ids are their index in the result.
    pub fn segment(&mut self, grid: &BiomeGrid) -> Vec<Region> {
        let mut regions = Vec::new();
        if grid.is_empty() {
            return regions;
        }

        self.visited.clear();
        self.visited.resize(grid.len(), false);
        self.queue.clear();

        for (x, y, biome) in grid.iter() {
            if self.visited[grid.index(x, y)] {
                continue;
            }

            let id = RegionId(regions.len() as u32);
            let mut cells = Vec::new();
            let mut bounds = CellBounds::from_cell(x, y);

            self.visited[grid.index(x, y)] = true;
            self.queue.push_back(IVec2::new(x, y));

            while let Some(cell) = self.queue.pop_front() {
                cells.push(cell);
                bounds.expand(cell.x, cell.y);

                for offset in NEIGHBORS {
                    let n = cell + offset;
                    if grid.get(n.x, n.y) != Some(biome) {
                        continue;
                    }
                    let idx = grid.index(n.x, n.y);
                    if !self.visited[idx] {
                        self.visited[idx] = true;
                        self.queue.push_back(n);
                    }
                }
            }

            regions.push(Region { id, biome, cells, bounds });
        }

        log::debug!(
            "Segmented {}x{} grid into {} regions",
            grid.width(),
            grid.height(),
            regions.len()
        );

        regions
    }
}

/// Segment a grid with a fresh [`RegionSegmenter`]
pub fn segment_regions(grid: &BiomeGrid) -> Vec<Region> {
    RegionSegmenter::new().segment(grid)
}
