//! Per-entity capability gates.
//!
//! Every [`Capability`] combines two ways of being blocked:
//! - **Held**: a [`DisableGate`] of explicit disabler keys (dialogue, attack wind-up)
//! - **Timed**: disable tokens that expire on their own (stuns, jump lockouts)
//!
//! A capability is enabled only when neither is active.

use strum::{EnumCount, IntoEnumIterator};

use crate::gate::{DisableGate, DisablerId};
use crate::token::{AnyTrue, TokenHandle, TokenManager};

/// Something an entity can be prevented from doing.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Capability {
    Move,
    Jump,
    Attack,
    Interact,
    Dash,
}

#[derive(Debug, Default)]
struct Slot {
    held: DisableGate<DisablerId>,
    timed: TokenManager<bool, AnyTrue>,
}

impl Slot {
    fn is_enabled(&self) -> bool {
        self.held.is_enabled() && !self.timed.value()
    }
}

#[derive(Debug)]
pub struct Capabilities {
    slots: [Slot; Capability::COUNT],
}

impl Capabilities {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::default()),
        }
    }

    fn slot(&self, capability: Capability) -> &Slot {
        &self.slots[capability as usize]
    }

    fn slot_mut(&mut self, capability: Capability) -> &mut Slot {
        &mut self.slots[capability as usize]
    }

    /// Holds `capability` shut under `key` until [`enable`](Self::enable).
    pub fn disable(&mut self, capability: Capability, key: DisablerId) -> bool {
        let was_enabled = self.is_enabled(capability);
        let added = self.slot_mut(capability).held.add_disabler(key);
        if was_enabled {
            tracing::trace!("{} disabled by {:?}", capability, key);
        }
        added
    }

    /// Releases `key`'s hold on `capability`.
    pub fn enable(&mut self, capability: Capability, key: DisablerId) -> bool {
        let removed = self.slot_mut(capability).held.remove_disabler(&key);
        if removed && self.is_enabled(capability) {
            tracing::trace!("{} re-enabled after {:?} released it", capability, key);
        }
        removed
    }

    /// Blocks `capability` for `secs` seconds; a negative value blocks until
    /// the returned handle is passed to [`cancel_timed`](Self::cancel_timed).
    pub fn disable_for(&mut self, capability: Capability, secs: f32) -> TokenHandle {
        self.slot_mut(capability).timed.add_token(true, secs, false)
    }

    pub fn cancel_timed(&mut self, capability: Capability, handle: TokenHandle) -> bool {
        self.slot_mut(capability)
            .timed
            .remove_token(handle)
            .is_some()
    }

    /// Releases every hold `key` has on any capability.
    pub fn release_all(&mut self, key: DisablerId) {
        for slot in &mut self.slots {
            slot.held.remove_disabler(&key);
        }
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.slot(capability).is_enabled()
    }

    /// Returns true if `key` is among the holds on `capability`.
    pub fn is_held_by(&self, capability: Capability, key: DisablerId) -> bool {
        self.slot(capability).held.holds(&key)
    }

    /// Capabilities currently blocked, in declaration order.
    pub fn disabled(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::iter().filter(|c| !self.is_enabled(*c))
    }

    /// Advances every timed disable token once.
    pub fn update(&mut self, dt: f32) {
        for slot in &mut self.slots {
            slot.timed.update(dt);
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIALOGUE: DisablerId = DisablerId(1);
    const ATTACK: DisablerId = DisablerId(2);

    #[test]
    fn all_enabled_by_default() {
        let caps = Capabilities::new();
        assert!(Capability::iter().all(|c| caps.is_enabled(c)));
        assert_eq!(caps.disabled().count(), 0);
    }

    #[test]
    fn holds_are_per_capability() {
        let mut caps = Capabilities::new();
        caps.disable(Capability::Move, DIALOGUE);

        assert!(!caps.is_enabled(Capability::Move));
        assert!(caps.is_enabled(Capability::Jump));
        assert_eq!(caps.disabled().collect::<Vec<_>>(), vec![Capability::Move]);
    }

    #[test]
    fn overlapping_holds_need_every_release() {
        let mut caps = Capabilities::new();
        caps.disable(Capability::Move, DIALOGUE);
        caps.disable(Capability::Move, ATTACK);

        caps.enable(Capability::Move, DIALOGUE);
        assert!(!caps.is_enabled(Capability::Move));
        caps.enable(Capability::Move, ATTACK);
        assert!(caps.is_enabled(Capability::Move));
    }

    #[test]
    fn timed_disable_expires() {
        let mut caps = Capabilities::new();
        caps.disable_for(Capability::Jump, 0.5);

        caps.update(0.25);
        assert!(!caps.is_enabled(Capability::Jump));
        caps.update(0.25);
        assert!(caps.is_enabled(Capability::Jump));
    }

    #[test]
    fn timed_and_held_combine() {
        let mut caps = Capabilities::new();
        caps.disable_for(Capability::Attack, 1.0);
        caps.disable(Capability::Attack, ATTACK);

        caps.update(2.0);
        assert!(!caps.is_enabled(Capability::Attack));
        caps.enable(Capability::Attack, ATTACK);
        assert!(caps.is_enabled(Capability::Attack));
    }

    #[test]
    fn indefinite_timed_disable_needs_cancel() {
        let mut caps = Capabilities::new();
        let handle = caps.disable_for(Capability::Dash, -1.0);

        caps.update(1_000.0);
        assert!(!caps.is_enabled(Capability::Dash));
        assert!(caps.cancel_timed(Capability::Dash, handle));
        assert!(!caps.cancel_timed(Capability::Dash, handle));
        assert!(caps.is_enabled(Capability::Dash));
    }

    #[test]
    fn release_all_drops_one_key_everywhere() {
        let mut caps = Capabilities::new();
        caps.disable(Capability::Move, DIALOGUE);
        caps.disable(Capability::Interact, DIALOGUE);
        caps.disable(Capability::Interact, ATTACK);

        caps.release_all(DIALOGUE);
        assert!(caps.is_enabled(Capability::Move));
        assert!(!caps.is_enabled(Capability::Interact));
        assert!(caps.is_held_by(Capability::Interact, ATTACK));
    }
}
