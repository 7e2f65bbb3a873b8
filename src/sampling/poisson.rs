//! Poisson-disk sampling (Bridson) with a variable neighbour distance.
//!
//! Candidates are spawned in the annulus `[min_distance, max_distance]`
//! around an active point and rejected if any accepted point lies closer
//! than `min_distance`. Each active point gets a bounded number of tries,
//! so the total work is capped by `tries × accepted points`.

use std::collections::HashMap;

use rand::Rng;
use rand::seq::index;

use crate::core::types::Vec2;

/// Neighbourhood radius (in background-grid cells) that covers `min_distance`
const GRID_REACH: i32 = 2;

/// Background grids above this many cells are stored sparsely
const DENSE_GRID_LIMIT: usize = 1 << 16;

/// Minimum-distance point sampler over `[0, width) × [0, height)`
#[derive(Clone, Debug, PartialEq)]
pub struct PoissonDiskSampler {
    width: f32,
    height: f32,
    min_distance: f32,
    max_distance: f32,
    tries: u32,
    max_points: usize,
}

/// Accelerator grid mapping a background cell to the point stored in it
enum BackgroundGrid {
    Dense { width: i32, slots: Vec<Option<u32>> },
    Sparse(HashMap<(i32, i32), u32>),
}

impl BackgroundGrid {
    /// `None` if the cell count does not fit in memory addressing
    fn new(width: i32, height: i32) -> Option<Self> {
        let cells = usize::try_from(width).ok()?.checked_mul(usize::try_from(height).ok()?)?;
        Some(if cells <= DENSE_GRID_LIMIT {
            BackgroundGrid::Dense { width, slots: vec![None; cells] }
        } else {
            BackgroundGrid::Sparse(HashMap::new())
        })
    }

    fn get(&self, x: i32, y: i32) -> Option<u32> {
        match self {
            BackgroundGrid::Dense { width, slots } => slots[(y * width + x) as usize],
            BackgroundGrid::Sparse(map) => map.get(&(x, y)).copied(),
        }
    }

    fn insert(&mut self, x: i32, y: i32, idx: u32) {
        match self {
            BackgroundGrid::Dense { width, slots } => slots[(y * *width + x) as usize] = Some(idx),
            BackgroundGrid::Sparse(map) => {
                map.insert((x, y), idx);
            }
        }
    }
}

impl PoissonDiskSampler {
    /// Sampler with `max_distance = 2 × min_distance` and 30 tries
    pub fn new(width: f32, height: f32, min_distance: f32) -> Self {
        Self {
            width,
            height,
            min_distance,
            max_distance: min_distance * 2.0,
            tries: 30,
            max_points: usize::MAX,
        }
    }

    pub fn with_max_distance(mut self, max_distance: f32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Candidates tried per active point before it is retired
    pub fn with_tries(mut self, tries: u32) -> Self {
        self.tries = tries.max(1);
        self
    }

    /// Point budget. A fill larger than this is thinned uniformly at random,
    /// so the kept points still cover the whole domain.
    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.max_points = max_points;
        self
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.min_distance > 0.0)
            || !self.width.is_finite()
            || !self.height.is_finite()
            || !self.min_distance.is_finite()
            || self.max_points == 0
    }

    /// Fill the domain with points, starting from one uniformly random seed point.
    pub fn fill<R: Rng>(&self, rng: &mut R) -> Vec<Vec2> {
        if self.is_degenerate() {
            return Vec::new();
        }

        let min_d = self.min_distance;
        let max_d = self.max_distance.max(min_d);
        let min_sq = min_d * min_d;

        let cell_size = min_d / std::f32::consts::SQRT_2;
        let cols = (self.width / cell_size).ceil();
        let rows = (self.height / cell_size).ceil();
        if cols > i32::MAX as f32 / 2.0 || rows > i32::MAX as f32 / 2.0 {
            log::warn!("Poisson domain {}x{} too large for spacing {}", self.width, self.height, min_d);
            return Vec::new();
        }
        let (grid_w, grid_h) = (cols as i32, rows as i32);
        let Some(mut grid) = BackgroundGrid::new(grid_w, grid_h) else {
            log::warn!("Poisson background grid {}x{} overflows", grid_w, grid_h);
            return Vec::new();
        };

        let cell_of = |p: Vec2| -> (i32, i32) {
            (
                ((p.x / cell_size) as i32).min(grid_w - 1),
                ((p.y / cell_size) as i32).min(grid_h - 1),
            )
        };

        let mut points: Vec<Vec2> = Vec::new();
        let mut active: Vec<u32> = Vec::new();

        let first = Vec2::new(rng.r#gen::<f32>() * self.width, rng.r#gen::<f32>() * self.height);
        let (cx, cy) = cell_of(first);
        grid.insert(cx, cy, 0);
        points.push(first);
        active.push(0);

        while !active.is_empty() {
            let slot = rng.gen_range(0..active.len());
            let origin = points[active[slot] as usize];
            let mut placed = false;

            for _ in 0..self.tries {
                let angle = rng.r#gen::<f32>() * std::f32::consts::TAU;
                // Uniform over the annulus area
                let r = (min_sq + rng.r#gen::<f32>() * (max_d * max_d - min_sq)).sqrt();
                let candidate = origin + Vec2::new(angle.cos(), angle.sin()) * r;

                if candidate.x < 0.0 || candidate.y < 0.0
                    || candidate.x >= self.width || candidate.y >= self.height
                {
                    continue;
                }

                let (gx, gy) = cell_of(candidate);
                let mut too_close = false;
                'scan: for ny in (gy - GRID_REACH).max(0)..=(gy + GRID_REACH).min(grid_h - 1) {
                    for nx in (gx - GRID_REACH).max(0)..=(gx + GRID_REACH).min(grid_w - 1) {
                        if let Some(idx) = grid.get(nx, ny) {
                            if points[idx as usize].distance_squared(candidate) < min_sq {
                                too_close = true;
                                break 'scan;
                            }
                        }
                    }
                }
                if too_close {
                    continue;
                }

                let idx = points.len() as u32;
                grid.insert(gx, gy, idx);
                points.push(candidate);
                active.push(idx);
                placed = true;
                break;
            }

            if !placed {
                active.swap_remove(slot);
            }
        }

        if points.len() > self.max_points {
            let mut keep = index::sample(rng, points.len(), self.max_points).into_vec();
            keep.sort_unstable();
            return keep.into_iter().map(|i| points[i]).collect();
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_min_distance_respected() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let sampler = PoissonDiskSampler::new(200.0, 120.0, 10.0).with_max_distance(25.0);
        let points = sampler.fill(&mut rng);
        assert!(points.len() > 20, "Expected a reasonably dense fill, got {}", points.len());
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                assert!(a.distance(*b) >= 10.0 - 1e-3, "Points {:?} and {:?} too close", a, b);
            }
        }
    }

    #[test]
    fn test_points_inside_domain() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let points = PoissonDiskSampler::new(50.0, 30.0, 4.0).fill(&mut rng);
        for p in points {
            assert!(p.x >= 0.0 && p.x < 50.0 && p.y >= 0.0 && p.y < 30.0, "{:?} escaped", p);
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let sampler = PoissonDiskSampler::new(64.0, 64.0, 6.0).with_tries(10);
        let a = sampler.fill(&mut ChaCha8Rng::seed_from_u64(1));
        let b = sampler.fill(&mut ChaCha8Rng::seed_from_u64(1));
        let c = sampler.fill(&mut ChaCha8Rng::seed_from_u64(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_domain_smaller_than_distance_gives_one_point() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points = PoissonDiskSampler::new(3.0, 3.0, 30.0).with_max_distance(100.0).fill(&mut rng);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(PoissonDiskSampler::new(0.0, 10.0, 1.0).fill(&mut rng).is_empty());
        assert!(PoissonDiskSampler::new(10.0, 10.0, 0.0).fill(&mut rng).is_empty());
        assert!(PoissonDiskSampler::new(10.0, 10.0, f32::NAN).fill(&mut rng).is_empty());
    }

    #[test]
    fn test_max_points_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let points = PoissonDiskSampler::new(200.0, 200.0, 2.0).with_max_points(25).fill(&mut rng);
        assert_eq!(points.len(), 25);
    }

    fn quadrants_hit(points: &[Vec2], width: f32, height: f32) -> [bool; 4] {
        let mut hit = [false; 4];
        for p in points {
            let q = (p.x >= width / 2.0) as usize + 2 * (p.y >= height / 2.0) as usize;
            hit[q] = true;
        }
        hit
    }

    #[test]
    fn test_point_budget_thins_whole_domain() {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let points = PoissonDiskSampler::new(400.0, 400.0, 4.0).with_max_points(40).fill(&mut rng);
        assert_eq!(points.len(), 40);
        assert_eq!(quadrants_hit(&points, 400.0, 400.0), [true; 4], "Budgeted fill clustered around the seed");
    }

    #[test]
    fn test_sparse_background_grid() {
        // 1000 / (4 / sqrt 2) = 354 cells per side, stored sparsely
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let points = PoissonDiskSampler::new(1000.0, 1000.0, 4.0).with_tries(10).fill(&mut rng);
        assert!(points.len() > 10_000, "Sparse fill too thin: {}", points.len());
        assert_eq!(quadrants_hit(&points, 1000.0, 1000.0), [true; 4]);

        // Neighbour rejection still works on the sparse path
        let origin = points[points.len() / 2];
        for p in &points {
            if *p != origin {
                assert!(p.distance(origin) >= 4.0 - 1e-3);
            }
        }
    }

    #[test]
    fn test_oversized_domain_gives_empty_fill() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(PoissonDiskSampler::new(1e30, 1e30, 1e-3).fill(&mut rng).is_empty());
    }
}
