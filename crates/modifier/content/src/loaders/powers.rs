//! Power catalog loader.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, bail};
use modifier_core::PowerDefinition;

use crate::loaders::{LoadResult, read_file};

/// Loader for power definitions from RON files.
pub struct PowerLoader;

impl PowerLoader {
    /// Load a power catalog from a RON file.
    ///
    /// RON format: `Vec<PowerDefinition>`. Names must be unique.
    pub fn load(path: &Path) -> LoadResult<Vec<PowerDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid power catalog {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<PowerDefinition>> {
        let powers: Vec<PowerDefinition> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse power catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        for power in &powers {
            power.validate()?;
            if !seen.insert(power.name.as_str()) {
                bail!("Power '{}' is defined more than once", power.name);
            }
        }

        tracing::debug!(count = powers.len(), "loaded power catalog");
        Ok(powers)
    }
}
