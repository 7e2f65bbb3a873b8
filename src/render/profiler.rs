//! Frame profiling: rolling average frame time and instantaneous FPS

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default number of frames averaged
pub const DEFAULT_HISTORY: usize = 60;

/// What a profiled frame reports back about its own work
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameCounts {
    pub regions: usize,
    pub entities: usize,
}

/// Stats returned after each profiled frame
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderStats {
    /// Average callback duration over the history window
    pub frame_time_ms: f32,
    /// `1 / seconds since the previous report`
    pub fps: f32,
    pub regions_rendered: usize,
    pub entities_rendered: usize,
}

/// CPU frame profiler with a fixed-size history window
#[derive(Debug, Clone)]
pub struct RenderingProfiler {
    frame_timings: VecDeque<f32>,
    max_history: usize,
    last_report: Instant,
    latest: RenderStats,
}

impl Default for RenderingProfiler {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl RenderingProfiler {
    pub fn new(max_history: usize) -> Self {
        let max_history = max_history.max(1);
        Self {
            frame_timings: VecDeque::with_capacity(max_history + 1),
            max_history,
            last_report: Instant::now(),
            latest: RenderStats::default(),
        }
    }

    /// Time `render`, record its duration and report stats.
    pub fn profile_frame<F>(&mut self, render: F) -> RenderStats
    where
        F: FnOnce() -> FrameCounts,
    {
        let start = Instant::now();
        let counts = render();
        let end = Instant::now();
        self.record(end.duration_since(start), end, counts)
    }

    /// Record a frame measured elsewhere, reporting at `now`
    pub fn record(&mut self, frame_time: Duration, now: Instant, counts: FrameCounts) -> RenderStats {
        self.frame_timings.push_back(frame_time.as_secs_f32() * 1000.0);
        if self.frame_timings.len() > self.max_history {
            self.frame_timings.pop_front();
        }

        let delta = now.saturating_duration_since(self.last_report).as_secs_f32();
        self.last_report = now;

        self.latest = RenderStats {
            frame_time_ms: self.average_frame_time_ms(),
            fps: if delta > 0.0 { 1.0 / delta } else { 0.0 },
            regions_rendered: counts.regions,
            entities_rendered: counts.entities,
        };
        self.latest
    }

    /// Mean of the recorded frame times, 0 before the first frame
    pub fn average_frame_time_ms(&self) -> f32 {
        if self.frame_timings.is_empty() {
            return 0.0;
        }
        self.frame_timings.iter().sum::<f32>() / self.frame_timings.len() as f32
    }

    /// Stats of the most recent frame
    pub fn latest(&self) -> RenderStats {
        self.latest
    }

    /// Number of frames currently in the window
    pub fn frames_recorded(&self) -> usize {
        self.frame_timings.len()
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    pub fn reset(&mut self) {
        self.frame_timings.clear();
        self.last_report = Instant::now();
        self.latest = RenderStats::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_frame_reports_counts() {
        let mut profiler = RenderingProfiler::default();
        let stats = profiler.profile_frame(|| FrameCounts { regions: 12, entities: 3 });
        assert_eq!(stats.regions_rendered, 12);
        assert_eq!(stats.entities_rendered, 3);
        assert!(stats.frame_time_ms >= 0.0);
        assert_eq!(profiler.latest(), stats);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut profiler = RenderingProfiler::default();
        let mut now = Instant::now();
        for _ in 0..100 {
            now += Duration::from_millis(16);
            profiler.record(Duration::from_millis(5), now, FrameCounts::default());
        }
        assert_eq!(profiler.frames_recorded(), 60);
    }

    #[test]
    fn test_rolling_average_drops_old_frames() {
        let mut profiler = RenderingProfiler::new(4);
        let mut now = Instant::now();
        for ms in [100, 100, 100, 100, 2, 2, 2, 2] {
            now += Duration::from_millis(20);
            profiler.record(Duration::from_millis(ms), now, FrameCounts::default());
        }
        assert!((profiler.average_frame_time_ms() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_fps_from_report_interval() {
        let mut profiler = RenderingProfiler::default();
        let start = Instant::now() + Duration::from_millis(10);
        profiler.record(Duration::from_millis(1), start, FrameCounts::default());
        let stats = profiler.record(Duration::from_millis(1), start + Duration::from_millis(250), FrameCounts::default());
        assert!((stats.fps - 4.0).abs() < 1e-3, "fps = {}", stats.fps);
    }

    #[test]
    fn test_zero_interval_gives_zero_fps() {
        let mut profiler = RenderingProfiler::default();
        let now = Instant::now() + Duration::from_millis(5);
        profiler.record(Duration::ZERO, now, FrameCounts::default());
        let stats = profiler.record(Duration::ZERO, now, FrameCounts::default());
        assert_eq!(stats.fps, 0.0);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = RenderStats { frame_time_ms: 1.5, fps: 60.0, regions_rendered: 2, entities_rendered: 0 };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"regions_rendered\":2"));
    }
}
