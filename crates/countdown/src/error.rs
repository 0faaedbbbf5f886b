//! Construction errors for timers.
//!
//! Only construction can fail. Once a timer exists every operation on it is
//! saturating, so these errors always point at bad authored data or a
//! programming mistake.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TimerError>;

#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum TimerError {
    #[error("timer duration must be non-negative, got {0}")]
    NegativeDuration(f32),

    #[error("timer duration must be finite, got {0}")]
    NonFiniteDuration(f32),

    #[error("hysteresis drain time must be non-negative and finite, got {0}")]
    InvalidDrainTime(f32),
}

/// Checks that `secs` is usable as a timer length.
pub fn validate_duration(secs: f32) -> Result<f32> {
    if !secs.is_finite() {
        return Err(TimerError::NonFiniteDuration(secs));
    }
    if secs < 0.0 {
        return Err(TimerError::NegativeDuration(secs));
    }
    Ok(secs)
}
