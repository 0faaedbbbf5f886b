use arrayvec::ArrayVec;
use countdown::{CountdownTimer, TimerConfig};
use tracing::debug;

use super::{PowerDefinition, PowerEffect};
use crate::config::ModifierConfig;
use crate::error::Result;

/// Main phase of a [`Power`]. Active and passive sub-phases run alongside.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PowerPhase {
    #[default]
    Idle,
    Charging,
    Cooldown,
}

/// Outcome of [`Power::release`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Release {
    /// The effect fired at this charge level.
    Used { level: u8 },
    /// Released below the first threshold.
    Discarded,
    /// Nothing was charging.
    Ignored,
}

/// Transitions reported by [`Power::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PowerEvent {
    ChargeFull,
    ActiveEnded,
    PassiveEnded,
    CooldownFinished,
}

pub type PowerEvents = ArrayVec<PowerEvent, { ModifierConfig::MAX_POWER_EVENTS }>;

/// Duration-bound sub-phase whose timer is created once with the power.
#[derive(Debug)]
struct SubPhase {
    timer: CountdownTimer,
    live: bool,
}

impl SubPhase {
    fn new(secs: f32) -> Result<Self> {
        Ok(Self {
            timer: CountdownTimer::new(secs, TimerConfig::new().paused())?,
            live: false,
        })
    }

    fn begin(&mut self) {
        self.timer.reset();
        self.timer.start();
        self.live = true;
    }

    /// Advances the timer; `true` on the frame the sub-phase ends.
    fn advance(&mut self, dt: f32) -> bool {
        if self.live && self.timer.update(dt) > 0 {
            self.live = false;
            return true;
        }
        false
    }
}

/// One charge/use/cooldown ability bound to its effect.
///
/// Each power owns independent timers, so any number of powers can run side
/// by side on one entity.
#[derive(Debug)]
pub struct Power<E> {
    definition: PowerDefinition,
    effect: E,
    phase: PowerPhase,
    charge: CountdownTimer,
    cooldown: CountdownTimer,
    active: Option<SubPhase>,
    passive: Option<SubPhase>,
    last_level: u8,
}

impl<E: PowerEffect> Power<E> {
    pub fn new(definition: PowerDefinition, effect: E) -> Result<Self> {
        definition.validate()?;
        let paused = TimerConfig::new().paused();
        Ok(Self {
            charge: CountdownTimer::new(definition.charge_time, paused)?,
            cooldown: CountdownTimer::new(definition.cooldown, paused)?,
            active: definition.active_duration.map(SubPhase::new).transpose()?,
            passive: definition.passive_duration.map(SubPhase::new).transpose()?,
            definition,
            effect,
            phase: PowerPhase::Idle,
            last_level: 0,
        })
    }

    /// Begins charging. Only possible from [`PowerPhase::Idle`].
    pub fn start_charge(&mut self) -> bool {
        if self.phase != PowerPhase::Idle {
            return false;
        }
        self.charge.reset();
        self.charge.start();
        self.phase = PowerPhase::Charging;
        true
    }

    /// Ends a charge, firing the effect if a threshold was reached.
    pub fn release(&mut self, ctx: &mut E::Context) -> Release {
        if self.phase != PowerPhase::Charging {
            return Release::Ignored;
        }
        self.charge.stop();
        let percent = self.charge.percentage();
        let level = self.definition.level_for(percent);

        if level == 0 {
            debug!(power = %self.definition.name, percent, "charge discarded");
            if self.definition.cooldown_on_discard {
                self.enter_cooldown();
            } else {
                self.phase = PowerPhase::Idle;
            }
            return Release::Discarded;
        }

        debug!(power = %self.definition.name, level, percent, "power used");
        self.last_level = level;
        self.effect.on_use(ctx, level);

        if let Some(active) = self.active.as_mut() {
            if active.live {
                self.effect.on_active_end(ctx);
            }
            active.begin();
            self.effect.on_active_start(ctx, level);
        }
        if let Some(passive) = self.passive.as_mut() {
            if passive.live {
                self.effect.on_passive_end(ctx);
            }
            passive.begin();
            self.effect.on_passive_start(ctx, level);
        }

        self.enter_cooldown();
        Release::Used { level }
    }

    /// Abandons a charge without cooldown. `false` if nothing was charging.
    pub fn cancel(&mut self) -> bool {
        if self.phase != PowerPhase::Charging {
            return false;
        }
        self.charge.reset();
        self.charge.stop();
        self.phase = PowerPhase::Idle;
        true
    }

    fn enter_cooldown(&mut self) {
        self.cooldown.reset();
        self.cooldown.start();
        self.phase = PowerPhase::Cooldown;
    }

    /// Advances every timer this power owns exactly once.
    pub fn update(&mut self, ctx: &mut E::Context, dt: f32) -> PowerEvents {
        let mut events = PowerEvents::new();

        match self.phase {
            PowerPhase::Idle => {}
            PowerPhase::Charging => {
                if self.charge.update(dt) > 0 {
                    events.push(PowerEvent::ChargeFull);
                }
            }
            PowerPhase::Cooldown => {
                if self.cooldown.update(dt) > 0 {
                    debug!(power = %self.definition.name, "cooldown finished");
                    self.phase = PowerPhase::Idle;
                    events.push(PowerEvent::CooldownFinished);
                }
            }
        }

        if let Some(active) = self.active.as_mut()
            && active.live
        {
            self.effect.on_active_update(ctx, dt);
            if active.advance(dt) {
                self.effect.on_active_end(ctx);
                events.push(PowerEvent::ActiveEnded);
            }
        }

        if let Some(passive) = self.passive.as_mut()
            && passive.live
        {
            self.effect.on_passive_update(ctx, dt);
            if passive.advance(dt) {
                self.effect.on_passive_end(ctx);
                events.push(PowerEvent::PassiveEnded);
            }
        }

        events
    }

    pub fn phase(&self) -> PowerPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == PowerPhase::Idle
    }

    pub fn is_charging(&self) -> bool {
        self.phase == PowerPhase::Charging
    }

    pub fn is_active(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.live)
    }

    pub fn is_passive(&self) -> bool {
        self.passive.as_ref().is_some_and(|p| p.live)
    }

    /// Charge fraction while charging, otherwise `0.0`.
    pub fn charge_percent(&self) -> f32 {
        if self.is_charging() {
            self.charge.percentage()
        } else {
            0.0
        }
    }

    /// Level a release would reach right now.
    pub fn charge_level(&self) -> u8 {
        if self.is_charging() {
            self.definition.level_for(self.charge.percentage())
        } else {
            0
        }
    }

    /// Cooldown progress while cooling down, otherwise `1.0`.
    pub fn cooldown_percent(&self) -> f32 {
        if self.phase == PowerPhase::Cooldown {
            self.cooldown.percentage()
        } else {
            1.0
        }
    }

    pub fn cooldown_remaining(&self) -> f32 {
        if self.phase == PowerPhase::Cooldown {
            self.cooldown.remaining()
        } else {
            0.0
        }
    }

    /// Level of the most recent successful release.
    pub fn last_level(&self) -> u8 {
        self.last_level
    }

    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn definition(&self) -> &PowerDefinition {
        &self.definition
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn effect_mut(&mut self) -> &mut E {
        &mut self.effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModifierError;

    #[derive(Debug, Default)]
    struct Journal(Vec<String>);

    #[derive(Debug, Default)]
    struct Recorder {
        active_updates: u32,
        passive_updates: u32,
    }

    impl PowerEffect for Recorder {
        type Context = Journal;

        fn on_use(&mut self, ctx: &mut Journal, level: u8) {
            ctx.0.push(format!("use {level}"));
        }

        fn on_active_start(&mut self, ctx: &mut Journal, level: u8) {
            ctx.0.push(format!("active start {level}"));
        }

        fn on_active_update(&mut self, _ctx: &mut Journal, _dt: f32) {
            self.active_updates += 1;
        }

        fn on_active_end(&mut self, ctx: &mut Journal) {
            ctx.0.push("active end".into());
        }

        fn on_passive_start(&mut self, ctx: &mut Journal, _level: u8) {
            ctx.0.push("passive start".into());
        }

        fn on_passive_update(&mut self, _ctx: &mut Journal, _dt: f32) {
            self.passive_updates += 1;
        }

        fn on_passive_end(&mut self, ctx: &mut Journal) {
            ctx.0.push("passive end".into());
        }
    }

    fn power(def: PowerDefinition) -> Power<Recorder> {
        Power::new(def, Recorder::default()).unwrap()
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut p = power(PowerDefinition::new("dash", 1.0, 2.0));
        let mut journal = Journal::default();

        assert!(p.start_charge());
        assert!(!p.start_charge());
        assert_eq!(p.update(&mut journal, 1.0).as_slice(), &[PowerEvent::ChargeFull]);
        assert_eq!(p.release(&mut journal), Release::Used { level: 1 });
        assert_eq!(journal.0, vec!["use 1"]);
        assert_eq!(p.phase(), PowerPhase::Cooldown);

        assert!(!p.start_charge());
        assert!(p.update(&mut journal, 1.5).is_empty());
        assert!((p.cooldown_percent() - 0.75).abs() < 1e-5);
        assert_eq!(
            p.update(&mut journal, 0.5).as_slice(),
            &[PowerEvent::CooldownFinished]
        );
        assert!(p.is_ready());
        assert!(p.start_charge());
    }

    #[test]
    fn early_release_discards_without_cooldown() {
        let mut p = power(PowerDefinition::new("dash", 1.0, 2.0));
        let mut journal = Journal::default();

        p.start_charge();
        p.update(&mut journal, 0.5);
        assert_eq!(p.release(&mut journal), Release::Discarded);
        assert!(journal.0.is_empty());
        assert!(p.is_ready());
    }

    #[test]
    fn discard_can_cost_cooldown() {
        let mut p = power(PowerDefinition::new("dash", 1.0, 2.0).cooldown_on_discard());
        let mut journal = Journal::default();

        p.start_charge();
        assert_eq!(p.release(&mut journal), Release::Discarded);
        assert_eq!(p.phase(), PowerPhase::Cooldown);
    }

    #[test]
    fn release_level_follows_thresholds() {
        let def = PowerDefinition::new("bolt", 2.0, 0.5).with_levels([0.25, 0.5, 1.0]);
        let mut p = power(def);
        let mut journal = Journal::default();

        p.start_charge();
        p.update(&mut journal, 1.2);
        assert_eq!(p.charge_level(), 2);
        assert_eq!(p.release(&mut journal), Release::Used { level: 2 });
        assert_eq!(p.last_level(), 2);
        assert_eq!(p.charge_percent(), 0.0);
    }

    #[test]
    fn release_without_charge_is_ignored() {
        let mut p = power(PowerDefinition::new("dash", 1.0, 2.0));
        let mut journal = Journal::default();
        assert_eq!(p.release(&mut journal), Release::Ignored);
        assert!(!p.cancel());
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut p = power(PowerDefinition::new("dash", 1.0, 2.0));
        let mut journal = Journal::default();

        p.start_charge();
        p.update(&mut journal, 0.9);
        assert!(p.cancel());
        assert!(p.is_ready());

        p.start_charge();
        assert_eq!(p.charge_percent(), 0.0);
    }

    #[test]
    fn instant_charge_is_full_on_release() {
        let mut p = power(PowerDefinition::new("blink", 0.0, 1.0));
        let mut journal = Journal::default();
        p.start_charge();
        assert_eq!(p.release(&mut journal), Release::Used { level: 1 });
    }

    #[test]
    fn zero_cooldown_finishes_on_next_update() {
        let mut p = power(PowerDefinition::new("tap", 0.0, 0.0));
        let mut journal = Journal::default();
        p.start_charge();
        p.release(&mut journal);
        assert_eq!(p.phase(), PowerPhase::Cooldown);
        assert_eq!(
            p.update(&mut journal, 0.0).as_slice(),
            &[PowerEvent::CooldownFinished]
        );
    }

    #[test]
    fn active_and_passive_run_alongside_cooldown() {
        let def = PowerDefinition::new("overdrive", 0.0, 1.0)
            .with_active(2.0)
            .with_passive(0.5);
        let mut p = power(def);
        let mut journal = Journal::default();

        p.start_charge();
        p.release(&mut journal);
        assert!(p.is_active());
        assert!(p.is_passive());
        assert_eq!(journal.0, vec!["use 1", "active start 1", "passive start"]);

        assert_eq!(p.update(&mut journal, 0.5).as_slice(), &[PowerEvent::PassiveEnded]);
        assert_eq!(
            p.update(&mut journal, 0.5).as_slice(),
            &[PowerEvent::CooldownFinished]
        );
        assert!(p.is_ready());
        assert!(p.is_active());

        assert_eq!(p.update(&mut journal, 1.0).as_slice(), &[PowerEvent::ActiveEnded]);
        assert!(!p.is_active());
        assert_eq!(p.effect().active_updates, 3);
        assert_eq!(p.effect().passive_updates, 1);
        assert_eq!(journal.0.last().map(String::as_str), Some("active end"));
    }

    #[test]
    fn reuse_restarts_live_active_phase() {
        let def = PowerDefinition::new("guard", 0.0, 0.0).with_active(5.0);
        let mut p = power(def);
        let mut journal = Journal::default();

        p.start_charge();
        p.release(&mut journal);
        p.update(&mut journal, 1.0);
        assert!(p.start_charge());
        p.release(&mut journal);

        assert_eq!(
            journal.0,
            vec!["use 1", "active start 1", "use 1", "active end", "active start 1"]
        );
        assert!(p.update(&mut journal, 4.5).iter().all(|e| *e != PowerEvent::ActiveEnded));
    }

    #[test]
    fn powers_keep_independent_timers() {
        let mut a = power(PowerDefinition::new("a", 0.0, 1.0));
        let mut b = power(PowerDefinition::new("b", 0.0, 3.0));
        let mut journal = Journal::default();

        for p in [&mut a, &mut b] {
            p.start_charge();
            p.release(&mut journal);
        }
        a.update(&mut journal, 1.0);
        b.update(&mut journal, 1.0);
        assert!(a.is_ready());
        assert_eq!(b.phase(), PowerPhase::Cooldown);
    }

    #[test]
    fn invalid_definition_is_rejected() {
        let def = PowerDefinition::new("broken", f32::NAN, 1.0);
        assert!(matches!(
            Power::new(def, Recorder::default()),
            Err(ModifierError::InvalidPowerTiming { field: "charge_time", .. })
        ));
    }
}
