use modifier_core::{PowerEvent, Release};
use serde::{Deserialize, Serialize};

use crate::actor::{ActorId, MeleePhase};

/// Topics for filtering events
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Topic {
    /// Attribute modifiers and capability gates
    Modifier,
    /// Charge, use and cooldown transitions
    Power,
    /// Melee attacks
    Combat,
    /// Target detection latch
    Detection,
}

/// Something that happened during a frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RuntimeEvent {
    ModifiersExpired {
        actor: ActorId,
        count: usize,
    },
    PowerReleased {
        actor: ActorId,
        power: String,
        outcome: Release,
    },
    PowerChanged {
        actor: ActorId,
        power: String,
        event: PowerEvent,
    },
    AttackStarted {
        actor: ActorId,
    },
    AttackPhase {
        actor: ActorId,
        phase: MeleePhase,
    },
    Strike {
        actor: ActorId,
        damage: f32,
    },
    AttackFinished {
        actor: ActorId,
    },
    TargetAcquired {
        actor: ActorId,
    },
    TargetLost {
        actor: ActorId,
    },
}

impl RuntimeEvent {
    pub fn topic(&self) -> Topic {
        match self {
            RuntimeEvent::ModifiersExpired { .. } => Topic::Modifier,
            RuntimeEvent::PowerReleased { .. } | RuntimeEvent::PowerChanged { .. } => Topic::Power,
            RuntimeEvent::AttackStarted { .. }
            | RuntimeEvent::AttackPhase { .. }
            | RuntimeEvent::Strike { .. }
            | RuntimeEvent::AttackFinished { .. } => Topic::Combat,
            RuntimeEvent::TargetAcquired { .. } | RuntimeEvent::TargetLost { .. } => {
                Topic::Detection
            }
        }
    }

    pub fn actor(&self) -> ActorId {
        match self {
            RuntimeEvent::ModifiersExpired { actor, .. }
            | RuntimeEvent::PowerReleased { actor, .. }
            | RuntimeEvent::PowerChanged { actor, .. }
            | RuntimeEvent::AttackStarted { actor }
            | RuntimeEvent::AttackPhase { actor, .. }
            | RuntimeEvent::Strike { actor, .. }
            | RuntimeEvent::AttackFinished { actor }
            | RuntimeEvent::TargetAcquired { actor }
            | RuntimeEvent::TargetLost { actor } => *actor,
        }
    }
}
