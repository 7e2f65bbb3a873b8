//! Animation clock
//!
//! Time-dependent rendering (overlay pulsing, style breathing) never reads a
//! global timer. The caller owns an [`AnimationClock`], advances it once per
//! frame and passes [`AnimationClock::value`] down explicitly.

use std::time::Duration;

/// Frame-counting animation clock.
///
/// The clock value is measured in frames: one `tick` advances it by
/// `speed` frames. With the default speed of 1.0 this reproduces a plain
/// frame counter.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationClock {
    value: f32,
    speed: f32,
    frame_count: u64,
}

impl AnimationClock {
    /// Create a clock at zero advancing one unit per frame
    pub fn new() -> Self {
        Self::with_speed(1.0)
    }

    /// Create a clock at zero advancing `speed` units per frame
    pub fn with_speed(speed: f32) -> Self {
        Self {
            value: 0.0,
            speed,
            frame_count: 0,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        self.value += self.speed;
        self.frame_count += 1;
    }

    /// Advance by a wall-clock delta, assuming `frames_per_second` frames per second.
    pub fn advance(&mut self, delta: Duration, frames_per_second: f32) {
        self.value += delta.as_secs_f32() * frames_per_second * self.speed;
        self.frame_count += 1;
    }

    /// Current clock value handed to time-dependent calls
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Number of ticks/advances so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}
