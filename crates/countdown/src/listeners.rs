//! Observer list for synchronous notifications.
//!
//! [`Listeners`] is a cheap, cloneable handle to a shared list of callbacks.
//! A callback may capture a clone of the very handle it is registered on and
//! add or remove listeners (itself included) while an emission is running.
//!
//! # Emission semantics
//!
//! - Listeners run in registration order
//! - A listener removed during an emission is not invoked later in that emission
//! - A listener added during an emission first runs on the next emission
//! - Emitting on a list from inside one of its own callbacks is a no-op

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Identifies one registered callback within a [`Listeners`] list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Callback<E> = Box<dyn FnMut(&E)>;

struct Entry<E> {
    id: ListenerId,
    callback: Callback<E>,
}

struct Registry<E> {
    entries: Vec<Entry<E>>,
    next_id: u64,
    emitting: bool,
    // Ids of the entries detached for the running emission.
    detached: Vec<ListenerId>,
    removed: Vec<ListenerId>,
}

impl<E> Registry<E> {
    fn detached_live(&self) -> usize {
        self.detached
            .iter()
            .filter(|id| !self.removed.contains(id))
            .count()
    }
}

/// Shared, ordered list of callbacks receiving `&E`.
pub struct Listeners<E> {
    inner: Rc<RefCell<Registry<E>>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                entries: Vec::new(),
                next_id: 0,
                emitting: false,
                detached: Vec::new(),
                removed: Vec::new(),
            })),
        }
    }

    /// Registers a callback and returns the id needed to remove it.
    pub fn add<F>(&self, callback: F) -> ListenerId
    where
        F: FnMut(&E) + 'static,
    {
        let mut registry = self.inner.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Unregisters a callback.
    ///
    /// Returns `false` if the id was never registered or is already gone.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut registry = self.inner.borrow_mut();
        if let Some(index) = registry.entries.iter().position(|e| e.id == id) {
            registry.entries.remove(index);
            return true;
        }
        if registry.emitting && registry.detached.contains(&id) && !registry.removed.contains(&id)
        {
            registry.removed.push(id);
            return true;
        }
        false
    }

    /// Removes every callback.
    pub fn clear(&self) {
        let mut registry = self.inner.borrow_mut();
        registry.entries.clear();
        if registry.emitting {
            let detached = registry.detached.clone();
            registry.removed = detached;
        }
    }

    pub fn len(&self) -> usize {
        let registry = self.inner.borrow();
        registry.entries.len() + registry.detached_live()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Invokes every registered callback with `event`.
    pub fn emit(&self, event: &E) {
        let mut running = {
            let mut registry = self.inner.borrow_mut();
            if registry.emitting {
                return;
            }
            registry.emitting = true;
            let entries = std::mem::take(&mut registry.entries);
            registry.detached = entries.iter().map(|e| e.id).collect();
            entries
        };

        for entry in running.iter_mut() {
            if self.inner.borrow().removed.contains(&entry.id) {
                continue;
            }
            (entry.callback)(event);
        }

        let mut registry = self.inner.borrow_mut();
        let removed = std::mem::take(&mut registry.removed);
        running.retain(|e| !removed.contains(&e.id));
        let added = std::mem::replace(&mut registry.entries, running);
        registry.entries.extend(added);
        registry.detached.clear();
        registry.emitting = false;
    }
}

impl<E> Clone for Listeners<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn runs_in_registration_order() {
        let listeners = Listeners::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let log = Rc::clone(&log);
            listeners.add(move |value: &u32| log.borrow_mut().push(format!("{tag}{value}")));
        }

        listeners.emit(&1);
        assert_eq!(*log.borrow(), vec!["a1", "b1", "c1"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let listeners = Listeners::<()>::new();
        let id = listeners.add(|_| {});

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn only_listener_can_remove_itself_mid_emit() {
        let listeners = Listeners::<()>::new();
        let calls = Rc::new(Cell::new(0));
        let own_id = Rc::new(Cell::new(None));

        let id = {
            let handle = listeners.clone();
            let calls = Rc::clone(&calls);
            let own_id = Rc::clone(&own_id);
            listeners.add(move |_| {
                calls.set(calls.get() + 1);
                if let Some(id) = own_id.get() {
                    handle.remove(id);
                }
            })
        };
        own_id.set(Some(id));

        listeners.emit(&());
        listeners.emit(&());

        assert_eq!(calls.get(), 1);
        assert!(listeners.is_empty());
    }

    #[test]
    fn listener_removed_mid_emit_is_skipped() {
        let listeners = Listeners::<()>::new();
        let second_calls = Rc::new(Cell::new(0));
        let second_id = Rc::new(Cell::new(None));

        {
            let handle = listeners.clone();
            let second_id = Rc::clone(&second_id);
            listeners.add(move |_| {
                if let Some(id) = second_id.get() {
                    handle.remove(id);
                }
            });
        }
        let id = {
            let second_calls = Rc::clone(&second_calls);
            listeners.add(move |_| second_calls.set(second_calls.get() + 1))
        };
        second_id.set(Some(id));

        listeners.emit(&());
        assert_eq!(second_calls.get(), 0);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn listener_added_mid_emit_runs_next_time() {
        let listeners = Listeners::<()>::new();
        let late_calls = Rc::new(Cell::new(0));
        let added = Rc::new(Cell::new(false));

        {
            let handle = listeners.clone();
            let late_calls = Rc::clone(&late_calls);
            let added = Rc::clone(&added);
            listeners.add(move |_| {
                if !added.get() {
                    added.set(true);
                    let late_calls = Rc::clone(&late_calls);
                    handle.add(move |_| late_calls.set(late_calls.get() + 1));
                }
            });
        }

        listeners.emit(&());
        assert_eq!(late_calls.get(), 0);
        assert_eq!(listeners.len(), 2);

        listeners.emit(&());
        assert_eq!(late_calls.get(), 1);
    }

    #[test]
    fn nested_emit_is_ignored() {
        let listeners = Listeners::<()>::new();
        let calls = Rc::new(Cell::new(0));
        {
            let handle = listeners.clone();
            let calls = Rc::clone(&calls);
            listeners.add(move |_| {
                calls.set(calls.get() + 1);
                handle.emit(&());
            });
        }

        listeners.emit(&());
        assert_eq!(calls.get(), 1);
    }
}
