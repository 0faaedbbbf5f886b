//! Disable gates: any number of independent vetoes over one capability.
//!
//! Each system that wants a capability blocked registers its own key and
//! later removes only that key. The capability stays blocked while any key
//! is registered, so one system's cleanup can never re-enable a capability
//! another system is still holding shut.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

/// Identity of a disabler, typically the id of the component holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisablerId(pub u64);

impl DisablerId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Set of disabler keys; enabled iff empty.
///
/// # Example
///
/// ```
/// # use modifier_core::{DisableGate, DisablerId};
/// let (dialogue, cutscene) = (DisablerId(1), DisablerId(2));
/// let mut movement = DisableGate::new();
///
/// movement.add_disabler(dialogue);
/// movement.add_disabler(cutscene);
/// movement.remove_disabler(&dialogue);
/// assert!(!movement.is_enabled());
///
/// movement.remove_disabler(&cutscene);
/// assert!(movement.is_enabled());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisableGate<K = DisablerId>
where
    K: Eq + Hash,
{
    disablers: HashSet<K>,
}

impl<K> DisableGate<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            disablers: HashSet::new(),
        }
    }

    /// Registers `key` as a disabler. Returns `false` if it already was one.
    pub fn add_disabler(&mut self, key: K) -> bool {
        self.disablers.insert(key)
    }

    /// Releases `key`. Returns `false` if it was not registered.
    pub fn remove_disabler<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.disablers.remove(key)
    }

    pub fn is_enabled(&self) -> bool {
        self.disablers.is_empty()
    }

    pub fn is_disabled(&self) -> bool {
        !self.is_enabled()
    }

    /// Returns true if `key` is currently holding the gate shut.
    pub fn holds<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.disablers.contains(key)
    }

    /// Registered disablers in arbitrary order.
    pub fn disablers(&self) -> impl Iterator<Item = &K> + '_ {
        self.disablers.iter()
    }

    pub fn len(&self) -> usize {
        self.disablers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.disablers.is_empty()
    }

    /// Force-releases every disabler. Only for teardown of the owning entity.
    pub fn clear(&mut self) {
        self.disablers.clear();
    }
}

impl<K> Default for DisableGate<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
