//! Frame-scoped events and the queue that collects them.
mod queue;
mod types;

pub use queue::EventQueue;
pub use types::{RuntimeEvent, Topic};
