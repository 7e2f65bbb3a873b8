//! Read-only biome grid handed over by the game state each frame

use std::path::Path;

use crate::core::error::Error;
use crate::core::types::Result;
use crate::terrain::biome::BiomeType;

/// Rectangular `width × height` grid of biome classifications, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeGrid {
    width: usize,
    height: usize,
    cells: Vec<BiomeType>,
}

impl BiomeGrid {
    /// Grid filled with a single biome
    pub fn new(width: usize, height: usize, fill: BiomeType) -> Self {
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self {
            width,
            height,
            cells: vec![fill; width * height],
        }
    }

    /// Grid with no cells
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
        }
    }

    /// Build from row-major cells. `cells.len()` must be `width * height`.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<BiomeType>) -> Self {
        debug_assert_eq!(cells.len(), width * height);
        if width == 0 || height == 0 {
            return Self::empty();
        }
        Self { width, height, cells }
    }

    /// Build from explicit rows.
    ///
    /// Zero rows, or rows of zero width, give an empty grid. Rows of
    /// differing length are rejected.
    pub fn from_rows(rows: Vec<Vec<BiomeType>>) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::empty());
        };
        let width = first.len();
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(Error::invalid_input(format!(
                "jagged grid: row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }
        if width == 0 {
            return Ok(Self::empty());
        }
        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self { width, height, cells })
    }

    /// Parse a JSON array of rows, e.g. `[["forest", "water"], ...]`
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<Vec<BiomeType>> = serde_json::from_str(json)?;
        Self::from_rows(rows)
    }

    /// Load a JSON grid file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `(x, y)` lies inside the grid
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Bounds-checked lookup; out-of-range coordinates give `None`
    pub fn get(&self, x: i32, y: i32) -> Option<BiomeType> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.cells[y as usize * self.width + x as usize])
    }

    /// Overwrite one cell. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, biome: BiomeType) {
        if self.in_bounds(x, y) {
            self.cells[y as usize * self.width + x as usize] = biome;
        }
    }

    /// Iterate `(x, y, biome)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, BiomeType)> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &b)| ((i % width) as i32, (i / width) as i32, b))
    }

    /// Row-major index of an in-bounds cell
    pub(crate) fn index(&self, x: i32, y: i32) -> usize {
        y as usize * self.width + x as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use BiomeType::*;

    #[test]
    fn test_from_rows() {
        let grid = BiomeGrid::from_rows(vec![
            vec![Grassland, Forest],
            vec![Water, Water],
            vec![Desert, Grassland],
        ])
        .unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.get(1, 0), Some(Forest));
        assert_eq!(grid.get(0, 2), Some(Desert));
    }

    #[test]
    fn test_jagged_rows_rejected() {
        let result = BiomeGrid::from_rows(vec![vec![Grassland, Forest], vec![Water]]);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(BiomeGrid::from_rows(vec![]).unwrap().is_empty());
        assert!(BiomeGrid::from_rows(vec![vec![], vec![]]).unwrap().is_empty());
        assert!(BiomeGrid::new(0, 5, Forest).is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_none() {
        let grid = BiomeGrid::new(2, 2, Plain);
        assert_eq!(grid.get(-1, 0), None);
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_iter_row_major() {
        let mut grid = BiomeGrid::new(3, 2, Plain);
        grid.set(2, 1, Snow);
        let cells: Vec<_> = grid.iter().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[1], (1, 0, Plain));
        assert_eq!(cells[5], (2, 1, Snow));
    }

    #[test]
    fn test_from_json() {
        let grid = BiomeGrid::from_json(r#"[["forest","water"],["sand","toxic_zone"]]"#).unwrap();
        assert_eq!(grid.get(1, 1), Some(ToxicZone));
        assert!(matches!(BiomeGrid::from_json("[[\"lava\"]]"), Err(Error::Json(_))));
    }
}
