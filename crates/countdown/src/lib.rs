//! Frame-stepped countdown timers for per-entity game logic.
//!
//! This crate is the leaf of the modifier engine. Nothing in here reads a
//! clock: owners advance every timer explicitly with the frame's delta time,
//! exactly once per simulated frame.
//!
//! - **Saturating**: elapsed time is always clamped to `[0, max]`
//! - **Rewindable**: negative deltas drain a timer without firing it
//! - **Single-threaded**: listener lists are `Rc`-backed and re-entrancy safe
//!
//! # Architecture
//!
//! - [`CountdownTimer`]: start/stop/reset timer with completion notification
//! - [`Listeners`]: ordered observer list used for completion callbacks
//! - [`Easing`]: curves applied to a timer's percentage for display
//! - [`Hysteresis`]: fill/drain latch built on a rewindable timer

pub mod easing;
pub mod error;
pub mod hysteresis;
pub mod listeners;
pub mod timer;

// Re-export core types for ergonomic API
pub use easing::Easing;
pub use error::{Result, TimerError};
pub use hysteresis::{Hysteresis, LatchChange};
pub use listeners::{ListenerId, Listeners};
pub use timer::{CountdownTimer, MAX_CYCLES_PER_UPDATE, TimerCompleted, TimerConfig};
