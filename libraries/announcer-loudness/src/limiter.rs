//! Soft-knee peak limiter
//!
//! Samples up to the knee pass through untouched. Above it the magnitude
//! follows `knee + 0.15 * x / (1 + x)` with `x = (|s| - knee) / 0.2`, which
//! approaches `knee + 0.15` asymptotically, and is finally capped at the
//! ceiling. No lookahead, no state.

use crate::{CEILING, KNEE_START};

/// Input span above the knee that maps to `x = 1`
const KNEE_WIDTH: f32 = 0.2;

/// Output headroom the curve approaches above the knee
const KNEE_RANGE: f32 = 0.15;

/// Stateless soft-knee limiter
///
/// # Example
///
/// ```ignore
/// use announcer_loudness::SoftLimiter;
///
/// let limiter = SoftLimiter::default();
/// assert_eq!(limiter.limit(0.5), 0.5);
/// assert!(limiter.limit(3.0) <= 0.95);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftLimiter {
    /// Magnitude where limiting begins
    knee_start: f32,
    /// Hard cap on output magnitude
    ceiling: f32,
}

impl SoftLimiter {
    /// Create a limiter
    ///
    /// The ceiling is a hard cap on every output sample, including samples
    /// below the knee when the ceiling is set lower than the knee.
    pub fn new(knee_start: f32, ceiling: f32) -> Self {
        Self {
            knee_start,
            ceiling,
        }
    }

    /// Magnitude where limiting begins
    pub fn knee_start(&self) -> f32 {
        self.knee_start
    }

    /// Maximum output magnitude
    pub fn ceiling(&self) -> f32 {
        self.ceiling
    }

    /// Limit a single sample, keeping its sign
    pub fn limit(&self, sample: f32) -> f32 {
        let magnitude = sample.abs();
        if magnitude <= self.knee_start.min(self.ceiling) {
            return sample;
        }

        let limited = if magnitude <= self.knee_start {
            magnitude
        } else {
            let x = (magnitude - self.knee_start) / KNEE_WIDTH;
            if x.is_infinite() {
                self.knee_start + KNEE_RANGE
            } else {
                self.knee_start + KNEE_RANGE * x / (1.0 + x)
            }
        };

        limited.min(self.ceiling).copysign(sample)
    }
}

impl Default for SoftLimiter {
    fn default() -> Self {
        Self::new(KNEE_START, CEILING)
    }
}

/// Limit a sample with the default knee (0.8) and ceiling (0.95)
pub fn soft_limit(sample: f32) -> f32 {
    SoftLimiter::default().limit(sample)
}
