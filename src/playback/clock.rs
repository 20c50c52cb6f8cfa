use crate::foundation::core::SCENE_FPS;
use std::time::Duration;

/// Fixed-timestep accumulator.
///
/// Elapsed time is summed and paid out one interval at a time; whatever is left over carries
/// into the next call, so the logical frame rate does not drift with the caller's cadence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    interval: Duration,
    accumulated: Duration,
}

impl FrameClock {
    /// One scene frame, `1000 / SCENE_FPS` ms truncated to whole nanoseconds.
    pub const INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / SCENE_FPS as u64);

    /// Clock paying out one step per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Length of one step.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time accumulated but not yet paid out.
    pub fn pending(&self) -> Duration {
        self.accumulated
    }

    /// Add elapsed wall time.
    pub fn accumulate(&mut self, elapsed: Duration) {
        self.accumulated = self.accumulated.saturating_add(elapsed);
    }

    /// Pay out one interval if enough time has accumulated.
    pub fn take_frame(&mut self) -> bool {
        if self.interval.is_zero() || self.accumulated < self.interval {
            return false;
        }
        self.accumulated -= self.interval;
        true
    }

    /// Drop any accumulated time.
    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(Self::INTERVAL)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/clock.rs"]
mod tests;
