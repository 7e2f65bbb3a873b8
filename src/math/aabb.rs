//! Axis-aligned boxes: world-space viewports and integer cell bounds

use crate::core::types::Vec2;

/// Axis-aligned 2D box defined by min and max corners
///
/// Used for viewports. Units are whatever the caller culls in (cell
/// coordinates for region culling, pixels for point culling).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Create a viewport from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a viewport from scalar bounds
    pub fn from_bounds(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    /// Get center point
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Grow by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Viewport {
        Viewport {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Scale both corners, e.g. to convert a pixel viewport into cell units
    pub fn scaled(&self, factor: f32) -> Viewport {
        Viewport {
            min: self.min * factor,
            max: self.max * factor,
        }
    }

    /// Inclusive point test: points on an edge are inside
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y
    }

    /// Strict overlap test against cell bounds: sharing only an edge or a
    /// corner does not count
    pub fn overlaps_strict(&self, bounds: &CellBounds) -> bool {
        (bounds.min_x as f32) < self.max.x && (bounds.max_x as f32) > self.min.x &&
        (bounds.min_y as f32) < self.max.y && (bounds.max_y as f32) > self.min.y
    }
}

/// Inclusive integer bounding box of a set of grid cells
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CellBounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl CellBounds {
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Bounds covering exactly one cell
    pub fn from_cell(x: i32, y: i32) -> Self {
        Self { min_x: x, min_y: y, max_x: x, max_y: y }
    }

    /// Expand bounds to include a cell
    pub fn expand(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Number of cell columns covered
    pub fn width(&self) -> u32 {
        (self.max_x - self.min_x + 1) as u32
    }

    /// Number of cell rows covered
    pub fn height(&self) -> u32 {
        (self.max_y - self.min_y + 1) as u32
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}
