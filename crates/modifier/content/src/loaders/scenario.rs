//! Scenario loader.

use std::path::Path;

use anyhow::Context;
use runtime::Scenario;

use crate::loaders::{LoadResult, read_file};

/// Loader for scenarios from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario from a RON file.
    ///
    /// RON format: [`Scenario`], with actors numbered in declaration order.
    pub fn load(path: &Path) -> LoadResult<Scenario> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Scenario> {
        let scenario: Scenario = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        scenario.validate()?;

        tracing::debug!(
            scenario = %scenario.name,
            actors = scenario.actors.len(),
            commands = scenario.commands.len(),
            "loaded scenario"
        );
        Ok(scenario)
    }
}
