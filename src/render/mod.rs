//! Rendering: culling, region fills, transitions, overlays and profiling

pub mod draw;
pub mod culling;
pub mod transition;
pub mod overlay;
pub mod decoration;
pub mod fill;
pub mod profiler;
pub mod config;
pub mod renderer;
pub mod svg;

pub use config::RenderConfig;
pub use culling::{cull_points_for_viewport, cull_regions_for_viewport, ViewportCuller};
pub use decoration::TextureDecorator;
pub use draw::{DrawCall, DrawStyle, DrawSurface, RecordingSurface};
pub use fill::RegionFiller;
pub use overlay::{apply_corruption_effects, CorruptionOverlay, CorruptionParams};
pub use profiler::{FrameCounts, RenderStats, RenderingProfiler};
pub use renderer::BiomeRenderer;
pub use svg::SvgSurface;
pub use transition::{render_biome_transitions, Transition, TransitionBlender};
