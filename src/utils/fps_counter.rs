use std::time::{Duration, Instant};

/// Frame-rate bookkeeping.
///
/// Counts frames and reports the average FPS and frame time once per
/// reporting interval.
pub struct FpsCounter {
    interval: Duration,
    window_start: Instant,
    frame_count: u32,
    current_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FpsCounter {
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: Instant::now(),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Records one frame. Returns `Some((fps, ms_per_frame))` when a
    /// reporting interval has elapsed, `None` otherwise.
    pub fn tick(&mut self) -> Option<(f32, f32)> {
        self.frame_count += 1;

        let elapsed = self.window_start.elapsed();
        if elapsed < self.interval {
            return None;
        }

        let seconds = elapsed.as_secs_f32();
        self.current_fps = self.frame_count as f32 / seconds;
        let ms_per_frame = seconds * 1000.0 / self.frame_count as f32;

        self.window_start = Instant::now();
        self.frame_count = 0;

        Some((self.current_fps, ms_per_frame))
    }

    /// The most recently reported FPS value.
    #[inline]
    #[must_use]
    pub fn current_fps(&self) -> f32 {
        self.current_fps
    }
}
