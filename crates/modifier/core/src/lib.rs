//! Stacking, expiring modifiers and the gates built on them.
//!
//! `modifier-core` holds the per-entity building blocks that gameplay code
//! composes: token stacks whose aggregate value is recomputed on demand,
//! disable gates that any number of systems can hold shut, and the
//! charge → use → cooldown machine that drives abilities. Everything is
//! advanced through an explicit `update(dt)` once per frame by its owner.
//!
//! Modules are organized by responsibility:
//! - [`token`] hosts [`TokenManager`] and its combination functions
//! - [`gate`] and [`capability`] implement the disable-gate idiom
//! - [`attribute`] layers offset and multiplier stacks over a base value
//! - [`power`] and [`sequence`] replace multi-frame coroutines with polled state machines
pub mod attribute;
pub mod capability;
pub mod config;
pub mod error;
pub mod gate;
pub mod power;
pub mod sequence;
pub mod token;

pub use attribute::{
    Attribute, AttributeBounds, AttributeKind, Attributes, ModifierHandle, ModifierKind,
};
pub use capability::{Capabilities, Capability};
pub use config::ModifierConfig;
pub use error::{ModifierError, Result};
pub use gate::{DisableGate, DisablerId};
pub use power::{
    Power, PowerDefinition, PowerEffect, PowerEvent, PowerEvents, PowerPhase, Release,
};
pub use sequence::{Sequence, SequenceEvent, SequenceStep};
pub use token::{
    AllTrue, AnyTrue, Combine, CombineKind, FoldWith, Highest, Lowest, Product, Sum,
    TokenDuration, TokenExpired, TokenHandle, TokenManager, TokenView,
};
