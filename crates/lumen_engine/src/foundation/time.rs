//! Frame clock utilities
//!
//! The engine never reads wall time directly. A [`Clock`] supplies monotonic
//! samples in seconds and [`FrameTimer`] turns consecutive samples into the
//! per-frame `delta_time` handed to systems.

use std::cell::Cell;
use std::time::Instant;

/// Source of monotonic time samples, in seconds
pub trait Clock {
    /// Current time; successive calls never go backwards
    fn now(&self) -> f64;
}

/// Clock backed by [`Instant`], counting from its creation
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    /// Create a clock starting at zero now
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to; handy for deterministic frame stepping
#[derive(Debug, Default)]
pub struct ManualClock {
    current: Cell<f64>,
}

impl ManualClock {
    /// Create a clock reading `start` seconds
    pub fn new(start: f64) -> Self {
        Self {
            current: Cell::new(start),
        }
    }

    /// Move the clock forward by `seconds`
    pub fn advance(&self, seconds: f64) {
        self.current.set(self.current.get() + seconds);
    }

    /// Jump to an absolute time
    pub fn set(&self, seconds: f64) {
        self.current.set(seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.current.get()
    }
}

/// Frame timing derived from clock samples
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_sample: Option<f64>,
    delta_time: f32,
    total_time: f64,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a timer that has not seen any sample yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Take `now` as the reference sample without counting a frame
    pub fn reset(&mut self, now: f64) {
        self.last_sample = Some(now);
        self.delta_time = 0.0;
    }

    /// Record a new sample and return the time since the previous one.
    ///
    /// The very first sample yields a zero delta.
    pub fn tick(&mut self, now: f64) -> f32 {
        let previous = self.last_sample.unwrap_or(now);
        #[allow(clippy::cast_possible_truncation)]
        let delta = (now - previous) as f32;

        self.last_sample = Some(now);
        self.delta_time = delta;
        self.total_time += now - previous;
        self.frame_count += 1;
        delta
    }

    /// Time between the last two samples in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Time accumulated over all ticks
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frame rate implied by the last delta
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_has_zero_delta() {
        let mut timer = FrameTimer::new();

        assert_eq!(timer.tick(10.0), 0.0);
        assert_eq!(timer.frame_count(), 1);
    }

    #[test]
    fn test_delta_is_difference_of_samples() {
        let clock = ManualClock::new(2.0);
        let mut timer = FrameTimer::new();
        timer.reset(clock.now());

        clock.advance(0.5);
        assert_relative_eq!(timer.tick(clock.now()), 0.5);

        clock.advance(0.25);
        assert_relative_eq!(timer.tick(clock.now()), 0.25);
        assert_relative_eq!(timer.total_time(), 0.75);
        assert_relative_eq!(timer.current_fps(), 4.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();

        assert!(second >= first);
    }
}
