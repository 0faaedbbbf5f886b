use tracing::warn;

use super::{RuntimeEvent, Topic};

/// Events pushed during a frame and drained once at its end.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<RuntimeEvent>,
    /// Queue length above which a warning is logged once per drain.
    warn_threshold: usize,
    warned: bool,
}

impl EventQueue {
    pub fn new(warn_threshold: usize) -> Self {
        Self {
            pending: Vec::new(),
            warn_threshold,
            warned: false,
        }
    }

    pub fn push(&mut self, event: RuntimeEvent) {
        self.pending.push(event);
        if self.warn_threshold > 0 && self.pending.len() > self.warn_threshold && !self.warned {
            self.warned = true;
            warn!(
                threshold = self.warn_threshold,
                "event queue exceeded its warning threshold"
            );
        }
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = RuntimeEvent>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn drain(&mut self) -> Vec<RuntimeEvent> {
        self.warned = false;
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[RuntimeEvent] {
        &self.pending
    }

    pub fn pending_on(&self, topic: Topic) -> impl Iterator<Item = &RuntimeEvent> + '_ {
        self.pending.iter().filter(move |e| e.topic() == topic)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
