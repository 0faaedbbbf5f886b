//! Frame-stepped driver for actors built from modifier-core parts.
//!
//! The runtime owns every actor and the explicit [`Services`] they share,
//! applies queued [`Command`]s at the start of each frame, then advances
//! every timer and token stack exactly once. Whatever happened during the
//! frame comes back as a [`FrameReport`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the stepper, its builder and configuration
//! - [`api`] exposes commands and errors downstream clients interact with
//! - [`actor`] defines actors, their power effects, melee attacks and detection
//! - [`events`] and [`services`] provide the frame-drained event queue and id allocation
//! - [`scenario`] plays timed command scripts against a runtime
pub mod actor;
pub mod api;
pub mod events;
pub mod runtime;
pub mod scenario;
pub mod services;

pub use actor::{
    Actor, ActorId, ActorStats, ActorTemplate, Detection, DetectionSpec, Effect, MeleeAttack,
    MeleePhase, MeleeTiming, PowerKind, PowerSlot, PowerSource,
};
pub use api::{Command, Result, RuntimeError};
pub use events::{EventQueue, RuntimeEvent, Topic};
pub use runtime::{FrameReport, Runtime, RuntimeBuilder, RuntimeConfig};
pub use scenario::{Scenario, ScenarioPlayer, ScheduledCommand};
pub use services::{DisablerAllocator, Services};
