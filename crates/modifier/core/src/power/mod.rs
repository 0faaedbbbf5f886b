//! Charge → use → cooldown machine for abilities.
//!
//! ```text
//! Idle ──start_charge──▶ Charging ──release──▶ Used ──▶ Cooldown ──▶ Idle
//!                            │                   │
//!                            │ (below threshold) ├─▶ Active  (concurrent)
//!                            ▼                   └─▶ Passive (concurrent)
//!                        Discarded ──▶ Idle | Cooldown
//! ```
//!
//! A [`Power`] owns every timer it needs and is advanced through
//! [`Power::update`]. What the power actually does is supplied by a
//! [`PowerEffect`] implementation.

mod definition;
mod effect;
mod machine;

pub use definition::PowerDefinition;
pub use effect::PowerEffect;
pub use machine::{Power, PowerEvent, PowerEvents, PowerPhase, Release};
