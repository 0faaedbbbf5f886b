//! Melee attack as a polled wind-up → strike → recover sequence.

use modifier_core::{
    AttributeKind, Capability, DisablerId, Sequence, SequenceEvent, SequenceStep,
};
use serde::{Deserialize, Serialize};

use super::ActorStats;
use crate::api::Result;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MeleePhase {
    WindUp,
    Strike,
    Recover,
}

/// Seconds spent in each phase at an attack speed of 1.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeleeTiming {
    pub wind_up: f32,
    pub strike: f32,
    pub recover: f32,
}

impl Default for MeleeTiming {
    fn default() -> Self {
        Self {
            wind_up: 0.4,
            strike: 0.1,
            recover: 0.5,
        }
    }
}

/// Holds movement shut for the whole swing.
#[derive(Debug)]
pub struct MeleeAttack {
    sequence: Sequence<MeleePhase>,
    key: DisablerId,
}

impl MeleeAttack {
    pub fn new(timing: MeleeTiming, key: DisablerId) -> Result<Self> {
        let sequence = Sequence::new([
            SequenceStep::new(MeleePhase::WindUp, timing.wind_up),
            SequenceStep::new(MeleePhase::Strike, timing.strike),
            SequenceStep::new(MeleePhase::Recover, timing.recover),
        ])?;
        Ok(Self { sequence, key })
    }

    /// Begins a swing unless one is running or attacking is disabled.
    pub fn start(&mut self, stats: &mut ActorStats) -> bool {
        if self.sequence.is_running() || !stats.capabilities.is_enabled(Capability::Attack) {
            return false;
        }
        stats.capabilities.disable(Capability::Move, self.key);
        self.sequence.start();
        true
    }

    /// Advances the swing, scaled by the actor's attack speed.
    pub fn update(&mut self, stats: &mut ActorStats, dt: f32) -> Option<SequenceEvent<MeleePhase>> {
        let speed = stats.attributes.value(AttributeKind::AttackSpeed);
        let event = self.sequence.update(dt * speed)?;
        if event == SequenceEvent::Finished {
            stats.capabilities.enable(Capability::Move, self.key);
        }
        Some(event)
    }

    pub fn cancel(&mut self, stats: &mut ActorStats) -> bool {
        if self.sequence.cancel() {
            stats.capabilities.enable(Capability::Move, self.key);
            return true;
        }
        false
    }

    pub fn phase(&self) -> Option<MeleePhase> {
        self.sequence.current()
    }

    pub fn is_running(&self) -> bool {
        self.sequence.is_running()
    }

    pub fn key(&self) -> DisablerId {
        self.key
    }
}
