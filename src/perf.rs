//! Rolling frame-time statistics for the overlay.

use std::collections::VecDeque;
use std::time::Instant;

/// Derived per-frame statistics, read by the overlay in the same iteration
/// they were written.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PerformanceSample {
    pub average_frame_time_ms: f32,
    pub average_fps: f32,
}

/// Records frame-to-frame deltas over a bounded window of recent frames.
#[derive(Debug)]
pub struct FrameStats {
    frame_times: VecDeque<f32>,
    last_tick: Option<Instant>,
}

impl FrameStats {
    const MAX_SAMPLES: usize = 120;

    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(Self::MAX_SAMPLES),
            last_tick: None,
        }
    }

    /// Record one frame boundary. The first call only arms the timer.
    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last_tick {
            if Self::MAX_SAMPLES <= self.frame_times.len() {
                self.frame_times.pop_front();
            }
            self.frame_times.push_back((now - last).as_secs_f32());
        }
        self.last_tick = Some(now);
    }

    /// Averages over the recorded window; zeroes until two ticks happened.
    pub fn sample(&self) -> PerformanceSample {
        if self.frame_times.is_empty() {
            return PerformanceSample::default();
        }

        let average = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let average_fps = if average > 0.0 { 1.0 / average } else { 0.0 };

        PerformanceSample {
            average_frame_time_ms: average * 1000.0,
            average_fps,
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_no_samples_reports_zero() {
        let stats = FrameStats::new();
        assert_eq!(stats.sample(), PerformanceSample::default());
    }

    #[test]
    fn test_first_tick_only_arms_the_timer() {
        let mut stats = FrameStats::new();
        stats.tick(Instant::now());
        assert_eq!(stats.sample(), PerformanceSample::default());
    }

    #[test]
    fn test_average_of_uniform_frames() {
        let mut stats = FrameStats::new();
        let start = Instant::now();
        for i in 0..5u64 {
            stats.tick(start + Duration::from_millis(16 * i));
        }

        let sample = stats.sample();
        assert!((sample.average_frame_time_ms - 16.0).abs() < 0.1);
        assert!((sample.average_fps - 62.5).abs() < 0.5);
    }

    #[test]
    fn test_window_is_bounded() {
        let mut stats = FrameStats::new();
        let start = Instant::now();

        // 100 slow frames followed by enough fast frames to evict them all.
        for i in 0..100u64 {
            stats.tick(start + Duration::from_millis(100 * i));
        }
        let after_slow = start + Duration::from_millis(100 * 100);
        for i in 0..200u64 {
            stats.tick(after_slow + Duration::from_millis(10 * i));
        }

        assert_eq!(stats.frame_times.len(), 120);
        let sample = stats.sample();
        assert!((sample.average_frame_time_ms - 10.0).abs() < 0.1);
    }
}
