//! Designer-authored content for the modifier engine.
//!
//! This crate reads data files into the types the engine consumes:
//! - Power catalogs (RON, `Vec<PowerDefinition>`)
//! - Scenarios with actor templates and scheduled commands (RON)
//! - Runtime configuration (TOML)
//!
//! Everything is validated right after parsing, so a bad file is reported
//! with its path instead of surfacing later as a runtime error.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, PowerLoader, ScenarioLoader};
