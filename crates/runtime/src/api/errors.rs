//! Errors surfaced by the runtime API.
//!
//! Steady-state stepping never fails; these cover building a runtime,
//! spawning actors from templates and validating scenarios.
use modifier_core::ModifierError;
use thiserror::Error;

use crate::actor::ActorId;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Modifier(#[from] ModifierError),

    #[error("invalid runtime config: {0}")]
    InvalidConfig(String),

    #[error("actor {0} does not exist")]
    UnknownActor(ActorId),

    #[error("actor '{actor}' declares power '{power}' twice")]
    DuplicatePower { actor: String, power: String },

    #[error("actor '{actor}' refers to power '{power}', which is not in the catalog")]
    UnknownPower { actor: String, power: String },

    #[error("scenario command {index} is scheduled at invalid time {at}")]
    InvalidSchedule { index: usize, at: f32 },

    #[error("scenario command {index} targets actor {actor}, but only {count} actors are declared")]
    ScenarioActorOutOfRange {
        index: usize,
        actor: ActorId,
        count: usize,
    },

    #[error("services used after shutdown")]
    ServicesShutDown,
}
