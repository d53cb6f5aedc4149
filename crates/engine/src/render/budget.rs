//! Advisory frame-time budgeting
//!
//! The budget never aborts or chunks a running frame; it only grades the
//! finished frame and suggests a stride for the next one.

use std::time::Duration;

use crate::render::grid::MAX_STEP_PX;

/// Target wall-clock time for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBudget {
    target: Duration,
}

impl FrameBudget {
    pub fn new(target: Duration) -> Self {
        Self { target }
    }

    /// 16ms target, roughly one 60Hz frame.
    pub fn per_60hz_frame() -> Self {
        Self {
            target: Duration::from_millis(16),
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Whether a finished frame overran the target.
    pub fn is_exceeded(&self, elapsed: Duration) -> bool {
        elapsed > self.target
    }

    /// Suggest the stride for the next frame given how the last one went:
    /// over budget coarsens, a frame finishing in under a quarter of the
    /// budget refines, anything in between keeps the current stride.
    pub fn next_step(&self, elapsed: Duration, current_step: u32) -> u32 {
        if elapsed > self.target {
            (current_step.saturating_mul(2)).min(MAX_STEP_PX)
        } else if elapsed * 4 < self.target && current_step > 1 {
            current_step / 2
        } else {
            current_step
        }
    }
}
