//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use modifier_core::PowerDefinition;
use runtime::{RuntimeConfig, Scenario};

use crate::loaders::{ConfigLoader, LoadResult, PowerLoader, ScenarioLoader};

/// Content factory that loads engine content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml      (optional)
/// ├── powers.ron
/// └── scenarios/
///     └── duel.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load `config.toml`, or the default config if the file is absent.
    pub fn load_config(&self) -> LoadResult<RuntimeConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(RuntimeConfig::default())
        }
    }

    /// Load the power catalog from `powers.ron`.
    pub fn load_powers(&self) -> LoadResult<Vec<PowerDefinition>> {
        PowerLoader::load(&self.data_dir.join("powers.ron"))
    }

    /// Load `scenarios/<name>.ron`, resolving catalog powers from `powers.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        let path = self.data_dir.join("scenarios").join(format!("{name}.ron"));
        let mut scenario = ScenarioLoader::load(&path)?;
        if scenario.uses_catalog() {
            let catalog = self.load_powers()?;
            scenario
                .resolve_powers(&catalog)
                .with_context(|| format!("Invalid scenario {}", path.display()))?;
        }
        Ok(scenario)
    }
}
