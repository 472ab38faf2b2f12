//! Frame timing.
//!
//! Counts frames and keeps a periodically refreshed FPS estimate for the
//! window title.

use std::time::{Duration, Instant};

/// Frame counter with a sampled FPS estimate.
#[derive(Debug)]
pub struct Time {
    frame_count: u64,
    fps: f32,
    sample_frame: u64,
    sample_start: Instant,
    sample_interval: Duration,
}

impl Time {
    pub fn new() -> Self {
        Self::with_sample_interval(Duration::from_millis(500))
    }

    /// The FPS estimate is refreshed once per `interval`.
    pub fn with_sample_interval(interval: Duration) -> Self {
        Self {
            frame_count: 0,
            fps: 0.0,
            sample_frame: 0,
            sample_start: Instant::now(),
            sample_interval: interval,
        }
    }

    /// Count a frame. Returns a fresh FPS estimate whenever the sampling
    /// window has elapsed, `None` otherwise.
    pub fn update(&mut self) -> Option<f32> {
        self.frame_count += 1;

        let sampled = self.sample_start.elapsed();
        if sampled < self.sample_interval {
            return None;
        }
        let frames = self.frame_count - self.sample_frame;
        self.fps = frames as f32 / sampled.as_secs_f32().max(f32::EPSILON);
        self.sample_frame = self.frame_count;
        self.sample_start = Instant::now();
        Some(self.fps)
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Most recent FPS estimate.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_every_frame_with_zero_window() {
        let mut time = Time::with_sample_interval(Duration::ZERO);

        let first = time.update();
        let second = time.update();

        assert!(first.is_some());
        assert!(second.is_some());
        assert_eq!(time.frame(), 2);
        assert!(time.fps().is_finite());
        assert!(time.fps() > 0.0);
    }

    #[test]
    fn test_no_estimate_before_window_elapses() {
        let mut time = Time::with_sample_interval(Duration::from_secs(3600));

        assert!(time.update().is_none());
        assert!(time.update().is_none());
        assert_eq!(time.fps(), 0.0);
        assert_eq!(time.frame(), 2);
    }
}
