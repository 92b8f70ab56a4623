//! Frame update timing for the headless runner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW: usize = 120;

/// Tracks simulation update time over the last 120 frames.
pub struct FrameMetrics {
    frame_times: VecDeque<Duration>,
    frame_start: Instant,
    pub sprite_count: usize,
    pub contacts: usize,
    pub frames: u64,
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameMetrics {
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(WINDOW),
            frame_start: Instant::now(),
            sprite_count: 0,
            contacts: 0,
            frames: 0,
        }
    }

    /// Call right before `World::update`.
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Call right after `World::update`.
    pub fn end_frame(&mut self, sprite_count: usize, contacts: usize) {
        self.record(self.frame_start.elapsed(), sprite_count, contacts);
    }

    /// Push a measured frame duration into the window.
    pub fn record(&mut self, elapsed: Duration, sprite_count: usize, contacts: usize) {
        self.frame_times.push_back(elapsed);
        if self.frame_times.len() > WINDOW {
            self.frame_times.pop_front();
        }
        self.sprite_count = sprite_count;
        self.contacts = contacts;
        self.frames += 1;
    }

    /// Average update time in milliseconds over the window.
    pub fn avg_frame_time_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let sum: Duration = self.frame_times.iter().sum();
        sum.as_secs_f32() * 1000.0 / self.frame_times.len() as f32
    }

    pub fn min_frame_time_ms(&self) -> f32 {
        self.frame_times
            .iter()
            .min()
            .map(|d| d.as_secs_f32() * 1000.0)
            .unwrap_or(0.0)
    }

    pub fn max_frame_time_ms(&self) -> f32 {
        self.frame_times
            .iter()
            .max()
            .map(|d| d.as_secs_f32() * 1000.0)
            .unwrap_or(0.0)
    }

    /// One-line readout, e.g. `Update time: 1.2ms (100000 sprites)`.
    pub fn summary(&self) -> String {
        format!(
            "Update time: {:.1}ms ({} sprites)",
            self.avg_frame_time_ms(),
            self.sprite_count
        )
    }
}
