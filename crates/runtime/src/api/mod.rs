//! Types clients use to drive the runtime.
mod commands;
mod errors;

pub use commands::Command;
pub use errors::{Result, RuntimeError};
