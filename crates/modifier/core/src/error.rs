//! Construction errors for modifier-core types.
//!
//! Like the timers underneath them, token stacks and gates never fail once
//! built. These errors surface invalid authored data (definitions loaded from
//! content files) at the point of construction.

use countdown::TimerError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModifierError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ModifierError {
    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("power '{name}': charge levels must be ascending values in (0, 1], got {levels:?}")]
    InvalidChargeLevels { name: String, levels: Vec<f32> },

    #[error("power '{name}': {field} must be non-negative and finite, got {value}")]
    InvalidPowerTiming {
        name: String,
        field: &'static str,
        value: f32,
    },

    #[error("sequence needs at least one step")]
    EmptySequence,

    #[error("sequence step {index} has invalid duration {secs}")]
    InvalidStepDuration { index: usize, secs: f32 },

    #[error("attribute bounds are inverted or not numbers: min {min}, max {max}")]
    InvalidBounds { min: f32, max: f32 },

    #[error("attribute base value must be finite, got {0}")]
    NonFiniteBase(f32),
}
