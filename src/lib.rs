//! Biomescape - segmented biome rendering for tile worlds
//!
//! A classified tile grid is split into 4-connected regions, culled against
//! the viewport, filled, blended at region boundaries and decorated with
//! procedurally scattered overlays. All drawing goes through
//! [`render::DrawSurface`].

pub mod core;
pub mod math;
pub mod terrain;
pub mod style;
pub mod sampling;
pub mod render;
