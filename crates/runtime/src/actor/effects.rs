//! The closed set of power effects actors can carry.

use modifier_core::{
    AttributeKind, Capability, DisablerId, ModifierHandle, PowerEffect, TokenDuration,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ActorStats;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PowerKind {
    /// Timed movement speed multiplier scaled by charge level.
    SpeedBurst,
    /// Damage boost while active, attack speed while passive.
    Overdrive,
    /// Roots the actor and halves outgoing damage while active.
    Guard,
}

impl PowerKind {
    pub const SPEED_BURST_SECS: f32 = 2.0;
    pub const PER_LEVEL_BONUS: f32 = 0.5;
    pub const OVERDRIVE_HASTE: f32 = 1.25;
    pub const GUARD_DAMAGE_SCALE: f32 = 0.5;

    fn level_scale(level: u8) -> f32 {
        1.0 + Self::PER_LEVEL_BONUS * f32::from(level)
    }
}

/// A [`PowerKind`] bound to the modifiers and disabler key it holds.
#[derive(Debug)]
pub struct Effect {
    kind: PowerKind,
    key: DisablerId,
    active: Vec<(AttributeKind, ModifierHandle)>,
    passive: Vec<(AttributeKind, ModifierHandle)>,
}

impl Effect {
    pub fn new(kind: PowerKind, key: DisablerId) -> Self {
        Self {
            kind,
            key,
            active: Vec::new(),
            passive: Vec::new(),
        }
    }

    pub fn kind(&self) -> PowerKind {
        self.kind
    }

    pub fn key(&self) -> DisablerId {
        self.key
    }

    /// Modifiers currently held by the active and passive sub-phases.
    pub fn held(&self) -> usize {
        self.active.len() + self.passive.len()
    }
}

fn release(ctx: &mut ActorStats, held: &mut Vec<(AttributeKind, ModifierHandle)>) {
    for (attribute, handle) in held.drain(..) {
        ctx.attributes.get_mut(attribute).remove(handle);
    }
}

impl PowerEffect for Effect {
    type Context = ActorStats;

    fn on_use(&mut self, ctx: &mut ActorStats, level: u8) {
        trace!(kind = %self.kind, level, "effect fired");
        if self.kind == PowerKind::SpeedBurst {
            ctx.attributes.get_mut(AttributeKind::MoveSpeed).add_multiplier(
                PowerKind::level_scale(level),
                TokenDuration::Timed(PowerKind::SPEED_BURST_SECS),
            );
        }
    }

    fn on_active_start(&mut self, ctx: &mut ActorStats, level: u8) {
        let damage = ctx.attributes.get_mut(AttributeKind::DamageMultiplier);
        match self.kind {
            PowerKind::SpeedBurst => {}
            PowerKind::Overdrive => {
                let handle =
                    damage.add_multiplier(PowerKind::level_scale(level), TokenDuration::Infinite);
                self.active.push((AttributeKind::DamageMultiplier, handle));
            }
            PowerKind::Guard => {
                let handle =
                    damage.add_multiplier(PowerKind::GUARD_DAMAGE_SCALE, TokenDuration::Infinite);
                self.active.push((AttributeKind::DamageMultiplier, handle));
                ctx.capabilities.disable(Capability::Move, self.key);
                ctx.capabilities.disable(Capability::Dash, self.key);
            }
        }
    }

    fn on_active_end(&mut self, ctx: &mut ActorStats) {
        release(ctx, &mut self.active);
        if self.kind == PowerKind::Guard {
            ctx.capabilities.release_all(self.key);
        }
    }

    fn on_passive_start(&mut self, ctx: &mut ActorStats, _level: u8) {
        if self.kind == PowerKind::Overdrive {
            let handle = ctx
                .attributes
                .get_mut(AttributeKind::AttackSpeed)
                .add_multiplier(PowerKind::OVERDRIVE_HASTE, TokenDuration::Infinite);
            self.passive.push((AttributeKind::AttackSpeed, handle));
        }
    }

    fn on_passive_end(&mut self, ctx: &mut ActorStats) {
        release(ctx, &mut self.passive);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_burst_scales_with_level() {
        let mut stats = ActorStats::default();
        let mut effect = Effect::new(PowerKind::SpeedBurst, DisablerId(0));

        effect.on_use(&mut stats, 2);
        assert_eq!(stats.attributes.value(AttributeKind::MoveSpeed), 10.0);

        stats.attributes.update(PowerKind::SPEED_BURST_SECS);
        assert_eq!(stats.attributes.value(AttributeKind::MoveSpeed), 5.0);
    }

    #[test]
    fn guard_holds_movement_until_active_ends() {
        let mut stats = ActorStats::default();
        let mut effect = Effect::new(PowerKind::Guard, DisablerId(7));
        let dialogue = DisablerId(8);
        stats.capabilities.disable(Capability::Move, dialogue);

        effect.on_active_start(&mut stats, 1);
        assert!(!stats.capabilities.is_enabled(Capability::Dash));
        assert_eq!(stats.attributes.value(AttributeKind::DamageMultiplier), 0.5);

        effect.on_active_end(&mut stats);
        assert!(stats.capabilities.is_enabled(Capability::Dash));
        assert!(!stats.capabilities.is_enabled(Capability::Move));
        assert_eq!(stats.attributes.value(AttributeKind::DamageMultiplier), 1.0);
        assert_eq!(effect.held(), 0);
    }

    #[test]
    fn overdrive_releases_each_sub_phase_separately() {
        let mut stats = ActorStats::default();
        let mut effect = Effect::new(PowerKind::Overdrive, DisablerId(0));

        effect.on_active_start(&mut stats, 1);
        effect.on_passive_start(&mut stats, 1);
        assert_eq!(stats.attributes.value(AttributeKind::DamageMultiplier), 1.5);
        assert_eq!(stats.attributes.value(AttributeKind::AttackSpeed), 1.25);

        effect.on_passive_end(&mut stats);
        assert_eq!(stats.attributes.value(AttributeKind::AttackSpeed), 1.0);
        assert_eq!(stats.attributes.value(AttributeKind::DamageMultiplier), 1.5);
    }

    #[test]
    fn kinds_parse_from_names() {
        assert_eq!("speed_burst".parse::<PowerKind>(), Ok(PowerKind::SpeedBurst));
        assert_eq!(PowerKind::Guard.to_string(), "guard");
    }
}
