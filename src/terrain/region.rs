//! Regions ("biomes"): maximal 4-connected same-classification cell sets

use crate::core::types::IVec2;
use crate::math::CellBounds;
use crate::terrain::biome::BiomeType;

/// Index of a region within one segmentation pass
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[repr(transparent)]
pub struct RegionId(pub u32);

/// One connected region produced by the segmenter.
///
/// `cells` are in flood-fill discovery order; `bounds` is tight.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub id: RegionId,
    pub biome: BiomeType,
    pub cells: Vec<IVec2>,
    pub bounds: CellBounds,
}

impl Region {
    /// Number of member cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bitmask of member cells over the region's bounds
    pub fn mask(&self) -> CellMask {
        CellMask::from_region(self)
    }

    /// Stable per-region seed derived from the first (seed) cell
    pub fn seed_hash(&self) -> u32 {
        let Some(first) = self.cells.first() else {
            return 0;
        };
        let mut h = (first.x as u32).wrapping_mul(374761393)
            .wrapping_add((first.y as u32).wrapping_mul(668265263));
        h = (h ^ (h >> 13)).wrapping_mul(1103515245);
        h ^ (h >> 16)
    }
}

/// Dense membership mask of one region, local to its bounding box.
///
/// Replaces a linear scan over the cell list when filtering sampled points.
pub struct CellMask {
    bounds: CellBounds,
    bits: Vec<bool>,
}

impl CellMask {
    fn from_region(region: &Region) -> Self {
        let bounds = region.bounds;
        let w = bounds.width() as usize;
        let mut bits = vec![false; w * bounds.height() as usize];
        for c in &region.cells {
            let idx = (c.y - bounds.min_y) as usize * w + (c.x - bounds.min_x) as usize;
            bits[idx] = true;
        }
        Self { bounds, bits }
    }

    /// Whether the cell `(x, y)` belongs to the region
    pub fn contains(&self, x: i32, y: i32) -> bool {
        if !self.bounds.contains(x, y) {
            return false;
        }
        let w = self.bounds.width() as usize;
        self.bits[(y - self.bounds.min_y) as usize * w + (x - self.bounds.min_x) as usize]
    }

    /// Whether the cell containing the point `(x, y)` (floored) belongs to the region
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        self.contains(x.floor() as i32, y.floor() as i32)
    }
}

/// Cell → owning region lookup over the union of a region set's bounds.
///
/// Built in one pass over every region's cells. Cells not covered by any
/// region, and coordinates outside the covered area, map to `None`.
#[derive(Clone, Debug)]
pub struct RegionLookup {
    bounds: Option<CellBounds>,
    owners: Vec<Option<(RegionId, BiomeType)>>,
}

impl RegionLookup {
    pub fn build(regions: &[Region]) -> Self {
        let mut bounds: Option<CellBounds> = None;
        for region in regions.iter().filter(|r| !r.is_empty()) {
            match bounds.as_mut() {
                None => bounds = Some(region.bounds),
                Some(b) => {
                    b.expand(region.bounds.min_x, region.bounds.min_y);
                    b.expand(region.bounds.max_x, region.bounds.max_y);
                }
            }
        }

        let Some(b) = bounds else {
            return Self { bounds: None, owners: Vec::new() };
        };

        let w = b.width() as usize;
        let mut owners = vec![None; w * b.height() as usize];
        for region in regions {
            for c in &region.cells {
                owners[(c.y - b.min_y) as usize * w + (c.x - b.min_x) as usize] = Some((region.id, region.biome));
            }
        }

        Self { bounds, owners }
    }

    /// Owning region of `(x, y)`, if any
    pub fn get(&self, x: i32, y: i32) -> Option<RegionId> {
        self.owner(x, y).map(|(id, _)| id)
    }

    /// Owning region and its biome
    pub fn owner(&self, x: i32, y: i32) -> Option<(RegionId, BiomeType)> {
        let b = self.bounds?;
        if !b.contains(x, y) {
            return None;
        }
        self.owners[(y - b.min_y) as usize * b.width() as usize + (x - b.min_x) as usize]
    }

    /// Number of cells with an owner
    pub fn owned_cells(&self) -> usize {
        self.owners.iter().filter(|o| o.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(id: u32, biome: BiomeType, cells: &[(i32, i32)]) -> Region {
        let mut bounds = CellBounds::from_cell(cells[0].0, cells[0].1);
        for &(x, y) in cells {
            bounds.expand(x, y);
        }
        Region {
            id: RegionId(id),
            biome,
            cells: cells.iter().map(|&(x, y)| IVec2::new(x, y)).collect(),
            bounds,
        }
    }

    #[test]
    fn test_mask_excludes_bounds_holes() {
        // L-shape: (0,0) (0,1) (1,1); (1,0) is inside bounds but not a member
        let r = region(0, BiomeType::Forest, &[(0, 0), (0, 1), (1, 1)]);
        let mask = r.mask();
        assert!(mask.contains(0, 0));
        assert!(mask.contains(1, 1));
        assert!(!mask.contains(1, 0));
        assert!(!mask.contains(5, 5));
        assert!(mask.contains_point(1.9, 1.2));
        assert!(!mask.contains_point(1.5, 0.5));
    }

    #[test]
    fn test_lookup_resolves_owners() {
        let a = region(0, BiomeType::Grassland, &[(0, 0)]);
        let b = region(1, BiomeType::Forest, &[(1, 0), (1, 1)]);
        let lookup = RegionLookup::build(&[a, b]);
        assert_eq!(lookup.get(0, 0), Some(RegionId(0)));
        assert_eq!(lookup.owner(1, 1), Some((RegionId(1), BiomeType::Forest)));
        assert_eq!(lookup.get(0, 1), None, "Uncovered cell inside union bounds");
        assert_eq!(lookup.get(-1, 0), None);
        assert_eq!(lookup.owned_cells(), 3);
    }

    #[test]
    fn test_lookup_empty() {
        let lookup = RegionLookup::build(&[]);
        assert_eq!(lookup.get(0, 0), None);
        assert_eq!(lookup.owned_cells(), 0);
    }

    #[test]
    fn test_seed_hash_depends_on_first_cell() {
        let a = region(0, BiomeType::Forest, &[(3, 4)]);
        let b = region(0, BiomeType::Forest, &[(4, 3)]);
        assert_ne!(a.seed_hash(), b.seed_hash());
        assert_eq!(a.seed_hash(), a.clone().seed_hash());
    }
}
