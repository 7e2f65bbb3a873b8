//! Colours, base biome styles and style blending

pub mod lerp;
pub mod color;
pub mod biome_style;
pub mod table;

pub use lerp::Lerp;
pub use color::Rgba;
pub use biome_style::{
    AnimationProperties, BiomeStyle, BlendedStyle, FillPattern, StyleColors, TextureKind,
    TextureOverlay,
};
pub use table::StyleTable;
