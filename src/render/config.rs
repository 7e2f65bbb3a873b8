//! Renderer configuration, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```json
//! { "tile_size": 24.0, "dedup_transitions": true, "corruption": { "tries": 20 } }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::render::culling::DEFAULT_VIEWPORT_BUFFER;
use crate::render::overlay::CorruptionParams;
use crate::render::profiler::DEFAULT_HISTORY;

/// Frame renderer settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// World units (pixels) per grid cell
    pub tile_size: f32,
    /// Margin around the viewport when culling regions, in cells
    pub viewport_buffer: f32,
    /// Blend ratio between the two sides of a transition
    pub transition_blend_ratio: f32,
    /// Alpha of blended transition colours
    pub transition_alpha: f32,
    /// Transition stroke width multiplier
    pub transition_width_factor: f32,
    /// Emit each shared edge once instead of once per side
    pub dedup_transitions: bool,
    /// Draw per-biome texture decorations
    pub draw_textures: bool,
    /// Optional point budget per overlay call; larger fills are thinned
    /// uniformly over the region
    pub max_overlay_points: Option<usize>,
    pub corruption: CorruptionParams,
    /// Frames averaged by the profiler
    pub profiler_history: usize,
    /// Seed of the style animation noise field
    pub noise_seed: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            viewport_buffer: DEFAULT_VIEWPORT_BUFFER,
            transition_blend_ratio: 0.5,
            transition_alpha: 0.5,
            transition_width_factor: 10.0,
            dedup_transitions: false,
            draw_textures: true,
            max_overlay_points: None,
            corruption: CorruptionParams::default(),
            profiler_history: DEFAULT_HISTORY,
            noise_seed: 0,
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded render config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reject values no renderer could work with
    pub fn validate(&self) -> Result<()> {
        if !self.tile_size.is_finite() || self.tile_size <= 0.0 {
            return Err(Error::Config(format!("tile_size must be positive, got {}", self.tile_size)));
        }
        if !self.viewport_buffer.is_finite() || self.viewport_buffer < 0.0 {
            return Err(Error::Config(format!("viewport_buffer must be >= 0, got {}", self.viewport_buffer)));
        }
        if !(0.0..=1.0).contains(&self.transition_blend_ratio) {
            return Err(Error::Config(format!(
                "transition_blend_ratio must be in [0, 1], got {}",
                self.transition_blend_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.transition_alpha) {
            return Err(Error::Config(format!("transition_alpha must be in [0, 1], got {}", self.transition_alpha)));
        }
        if self.corruption.tries == 0 {
            return Err(Error::Config("corruption.tries must be at least 1".to_string()));
        }
        Ok(())
    }
}
