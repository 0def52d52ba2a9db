//! Time management utilities

use std::time::Instant;

/// Wall-clock frame timer driving the per-frame simulation step
///
/// Reports the raw elapsed time; clamping against frame hitches is the
/// movement controller's job.
pub struct FrameClock {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock starting now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock (once per frame) and return the seconds since the previous tick
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since clock creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_tick_accumulates() {
        let mut clock = FrameClock::new();
        let first = clock.tick();
        let second = clock.tick();

        assert!(first >= 0.0 && second >= 0.0);
        assert_eq!(clock.frame_count(), 2);
        assert!((clock.total_time() - (first + second)).abs() < 1e-6);
        assert_eq!(clock.delta_time(), second);
    }
}
