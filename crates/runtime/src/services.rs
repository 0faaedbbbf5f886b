//! Shared runtime services, passed explicitly instead of living in globals.

use std::collections::HashMap;

use modifier_core::DisablerId;
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::events::{EventQueue, RuntimeEvent};

/// Hands out [`DisablerId`]s that never repeat within one runtime.
///
/// Named keys map to one stable id, so two commands that name the same
/// disabler add and remove the same hold.
#[derive(Debug, Default)]
pub struct DisablerAllocator {
    next: u64,
    named: HashMap<String, DisablerId>,
}

impl DisablerAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh anonymous id.
    pub fn allocate(&mut self) -> DisablerId {
        let id = DisablerId::new(self.next);
        self.next += 1;
        id
    }

    /// The id bound to `name`, allocating it on first use.
    pub fn named(&mut self, name: &str) -> DisablerId {
        if let Some(id) = self.named.get(name) {
            return *id;
        }
        let id = self.allocate();
        debug!(name, ?id, "allocated named disabler");
        self.named.insert(name.to_owned(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<DisablerId> {
        self.named.get(name).copied()
    }

    pub fn allocated(&self) -> u64 {
        self.next
    }
}

/// Services every actor update may touch.
#[derive(Debug)]
pub struct Services {
    events: EventQueue,
    disablers: DisablerAllocator,
    running: bool,
}

impl Services {
    pub fn new(event_warn_threshold: usize) -> Self {
        Self {
            events: EventQueue::new(event_warn_threshold),
            disablers: DisablerAllocator::new(),
            running: false,
        }
    }

    pub fn init(&mut self) {
        if !self.running {
            self.running = true;
            info!("runtime services initialized");
        }
    }

    /// Stops the services and hands back any undrained events.
    pub fn shutdown(&mut self) -> Vec<RuntimeEvent> {
        let leftover = self.events.drain();
        if self.running {
            self.running = false;
            info!(
                undrained = leftover.len(),
                disablers = self.disablers.allocated(),
                "runtime services shut down"
            );
        }
        leftover
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ensure_running(&self) -> Result<()> {
        if self.running {
            Ok(())
        } else {
            Err(RuntimeError::ServicesShutDown)
        }
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    pub fn disablers(&self) -> &DisablerAllocator {
        &self.disablers
    }

    pub fn disablers_mut(&mut self) -> &mut DisablerAllocator {
        &mut self.disablers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_disablers_are_stable() {
        let mut alloc = DisablerAllocator::new();
        let dialogue = alloc.named("dialogue");
        let anon = alloc.allocate();

        assert_eq!(alloc.named("dialogue"), dialogue);
        assert_ne!(anon, dialogue);
        assert_eq!(alloc.lookup("cutscene"), None);
        assert_eq!(alloc.allocated(), 2);
    }

    #[test]
    fn lifecycle_gates_use() {
        let mut services = Services::new(0);
        assert!(services.ensure_running().is_err());

        services.init();
        assert!(services.ensure_running().is_ok());

        services
            .events_mut()
            .push(RuntimeEvent::AttackStarted { actor: crate::ActorId(3) });
        assert_eq!(services.shutdown().len(), 1);
        assert!(!services.is_running());
    }
}
