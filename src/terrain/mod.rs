//! Biome grid input and region segmentation

pub mod biome;
pub use biome::{BiomeMap, BiomeType};

pub mod grid;
pub use grid::BiomeGrid;

pub mod region;
pub use region::{CellMask, Region, RegionId, RegionLookup};

pub mod segment;
pub use segment::{segment_regions, RegionSegmenter};

pub mod boundary;
pub use boundary::trace_outline;
