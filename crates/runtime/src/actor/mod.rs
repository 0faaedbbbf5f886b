//! Actors: the per-entity owners of attributes, capability gates, powers,
//! melee attacks and detection.
//!
//! [`Actor::update`] is the one place an actor's timers and token stacks are
//! advanced, which keeps the once-per-frame contract in a single function.

mod detection;
mod effects;
mod melee;
mod template;

use std::collections::HashMap;
use std::fmt;

use countdown::LatchChange;
use modifier_core::{
    AttributeKind, Attributes, Capabilities, ModifierHandle, ModifierKind, Power, Release,
    SequenceEvent, TokenDuration,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use detection::{Detection, DetectionSpec};
pub use effects::{Effect, PowerKind};
pub use melee::{MeleeAttack, MeleePhase, MeleeTiming};
pub use template::{ActorTemplate, PowerSlot, PowerSource};

use crate::api::{Result, RuntimeError};
use crate::events::{EventQueue, RuntimeEvent};
use crate::services::DisablerAllocator;

/// Index of an actor within its runtime, in spawn order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub u32);

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// State that power effects read and write.
#[derive(Debug, Default)]
pub struct ActorStats {
    pub attributes: Attributes,
    pub capabilities: Capabilities,
}

#[derive(Debug)]
pub struct Actor {
    id: ActorId,
    name: String,
    stats: ActorStats,
    powers: Vec<Power<Effect>>,
    melee: Option<MeleeAttack>,
    detection: Option<Detection>,
    labels: HashMap<String, (AttributeKind, ModifierHandle)>,
}

impl Actor {
    pub fn spawn(
        id: ActorId,
        template: &ActorTemplate,
        disablers: &mut DisablerAllocator,
    ) -> Result<Self> {
        let mut stats = ActorStats::default();
        for &(attribute, value) in &template.base {
            stats.attributes.set_base(attribute, value)?;
        }

        let mut powers: Vec<Power<Effect>> = Vec::with_capacity(template.powers.len());
        for slot in &template.powers {
            let definition = slot.source.definition().ok_or_else(|| {
                RuntimeError::UnknownPower {
                    actor: template.name.clone(),
                    power: slot.source.name().to_owned(),
                }
            })?;
            if powers.iter().any(|p| p.name() == definition.name) {
                return Err(RuntimeError::DuplicatePower {
                    actor: template.name.clone(),
                    power: definition.name.clone(),
                });
            }
            let effect = Effect::new(slot.kind, disablers.allocate());
            powers.push(Power::new(definition.clone(), effect)?);
        }

        let melee = template
            .melee
            .map(|timing| MeleeAttack::new(timing, disablers.allocate()))
            .transpose()?;
        let detection = template.detection.map(Detection::new).transpose()?;

        debug!(%id, name = %template.name, powers = powers.len(), "actor spawned");
        Ok(Self {
            id,
            name: template.name.clone(),
            stats,
            powers,
            melee,
            detection,
            labels: HashMap::new(),
        })
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> &ActorStats {
        &self.stats
    }

    pub fn stats_mut(&mut self) -> &mut ActorStats {
        &mut self.stats
    }

    pub fn attribute(&self, attribute: AttributeKind) -> f32 {
        self.stats.attributes.value(attribute)
    }

    pub fn powers(&self) -> &[Power<Effect>] {
        &self.powers
    }

    pub fn power(&self, name: &str) -> Option<&Power<Effect>> {
        self.powers.iter().find(|p| p.name() == name)
    }

    pub fn melee(&self) -> Option<&MeleeAttack> {
        self.melee.as_ref()
    }

    pub fn detection(&self) -> Option<&Detection> {
        self.detection.as_ref()
    }

    /// Adds a modifier; a label replaces any modifier already under it.
    pub fn add_modifier(
        &mut self,
        attribute: AttributeKind,
        kind: ModifierKind,
        value: f32,
        duration: TokenDuration,
        label: Option<&str>,
    ) -> ModifierHandle {
        let handle = self
            .stats
            .attributes
            .get_mut(attribute)
            .add(kind, value, duration);
        if let Some(label) = label
            && let Some((old_attribute, old)) =
                self.labels.insert(label.to_owned(), (attribute, handle))
        {
            self.stats.attributes.get_mut(old_attribute).remove(old);
        }
        handle
    }

    /// Removes the modifier under `label`; `false` if none is live.
    pub fn remove_modifier(&mut self, label: &str) -> bool {
        match self.labels.remove(label) {
            Some((attribute, handle)) => self.stats.attributes.get_mut(attribute).remove(handle),
            None => false,
        }
    }

    /// `None` if the actor has no power by that name.
    pub fn start_charge(&mut self, power: &str) -> Option<bool> {
        let power = self.powers.iter_mut().find(|p| p.name() == power)?;
        Some(power.start_charge())
    }

    pub fn release(&mut self, power: &str) -> Option<Release> {
        let power = self.powers.iter_mut().find(|p| p.name() == power)?;
        Some(power.release(&mut self.stats))
    }

    pub fn cancel_charge(&mut self, power: &str) -> Option<bool> {
        let power = self.powers.iter_mut().find(|p| p.name() == power)?;
        Some(power.cancel())
    }

    /// `None` if the actor has no melee attack.
    pub fn attack(&mut self, events: &mut EventQueue) -> Option<bool> {
        let melee = self.melee.as_mut()?;
        let started = melee.start(&mut self.stats);
        if started {
            events.push(RuntimeEvent::AttackStarted { actor: self.id });
            events.push(RuntimeEvent::AttackPhase {
                actor: self.id,
                phase: MeleePhase::WindUp,
            });
        }
        Some(started)
    }

    /// `None` if the actor has no detection.
    pub fn set_target_visible(&mut self, visible: bool) -> Option<()> {
        self.detection.as_mut()?.set_visible(visible);
        Some(())
    }

    /// Advances every timer and token stack this actor owns exactly once.
    pub fn update(&mut self, dt: f32, events: &mut EventQueue) {
        let id = self.id;

        let expired = self.stats.attributes.update(dt);
        if expired > 0 {
            self.labels.retain(|_, (attribute, handle)| {
                self.stats.attributes.get(*attribute).contains(*handle)
            });
            events.push(RuntimeEvent::ModifiersExpired { actor: id, count: expired });
        }
        self.stats.capabilities.update(dt);

        for power in &mut self.powers {
            for event in power.update(&mut self.stats, dt) {
                events.push(RuntimeEvent::PowerChanged {
                    actor: id,
                    power: power.name().to_owned(),
                    event,
                });
            }
        }

        if let Some(melee) = self.melee.as_mut() {
            match melee.update(&mut self.stats, dt) {
                Some(SequenceEvent::Entered(phase)) => {
                    events.push(RuntimeEvent::AttackPhase { actor: id, phase });
                    if phase == MeleePhase::Strike {
                        let damage = self.stats.attributes.value(AttributeKind::DamageMultiplier);
                        events.push(RuntimeEvent::Strike { actor: id, damage });
                    }
                }
                Some(SequenceEvent::Finished) => {
                    events.push(RuntimeEvent::AttackFinished { actor: id });
                }
                None => {}
            }
        }

        if let Some(detection) = self.detection.as_mut() {
            match detection.update(dt) {
                Some(LatchChange::Engaged) => events.push(RuntimeEvent::TargetAcquired { actor: id }),
                Some(LatchChange::Released) => events.push(RuntimeEvent::TargetLost { actor: id }),
                None => {}
            }
        }
    }
}
