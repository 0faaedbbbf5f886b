use modifier_core::{AttributeKind, Capability, ModifierKind, TokenDuration};
use serde::{Deserialize, Serialize};

use crate::actor::ActorId;

/// A request queued against the runtime, applied at the start of the next
/// [`Runtime::step`](crate::Runtime::step).
///
/// Disabler keys and modifier labels are plain names so scripts can refer to
/// them; the runtime maps each name to a stable id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    AddModifier {
        actor: ActorId,
        attribute: AttributeKind,
        kind: ModifierKind,
        value: f32,
        /// Seconds; negative means until removed.
        duration: TokenDuration,
        #[serde(default)]
        label: Option<String>,
    },
    RemoveModifier {
        actor: ActorId,
        label: String,
    },
    Disable {
        actor: ActorId,
        capability: Capability,
        key: String,
    },
    Enable {
        actor: ActorId,
        capability: Capability,
        key: String,
    },
    DisableFor {
        actor: ActorId,
        capability: Capability,
        secs: f32,
    },
    StartCharge {
        actor: ActorId,
        power: String,
    },
    Release {
        actor: ActorId,
        power: String,
    },
    CancelCharge {
        actor: ActorId,
        power: String,
    },
    Attack {
        actor: ActorId,
    },
    SetTargetVisible {
        actor: ActorId,
        visible: bool,
    },
}

impl Command {
    pub fn actor(&self) -> ActorId {
        match self {
            Command::AddModifier { actor, .. }
            | Command::RemoveModifier { actor, .. }
            | Command::Disable { actor, .. }
            | Command::Enable { actor, .. }
            | Command::DisableFor { actor, .. }
            | Command::StartCharge { actor, .. }
            | Command::Release { actor, .. }
            | Command::CancelCharge { actor, .. }
            | Command::Attack { actor }
            | Command::SetTargetVisible { actor, .. } => *actor,
        }
    }

    /// Short name used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Command::AddModifier { .. } => "add_modifier",
            Command::RemoveModifier { .. } => "remove_modifier",
            Command::Disable { .. } => "disable",
            Command::Enable { .. } => "enable",
            Command::DisableFor { .. } => "disable_for",
            Command::StartCharge { .. } => "start_charge",
            Command::Release { .. } => "release",
            Command::CancelCharge { .. } => "cancel_charge",
            Command::Attack { .. } => "attack",
            Command::SetTargetVisible { .. } => "set_target_visible",
        }
    }
}
