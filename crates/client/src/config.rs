//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Settings for one `modsim` run.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub scenario: PathBuf,
    /// Catalog used by scenario power slots that refer to powers by name.
    pub powers: PathBuf,
    /// Overrides the runtime config's frame rate.
    pub frame_rate: Option<u32>,
    /// Frames to run; defaults to the scenario's length.
    pub max_frames: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scenario: PathBuf::from(Self::DEFAULT_SCENARIO),
            powers: PathBuf::from(Self::DEFAULT_POWERS),
            frame_rate: None,
            max_frames: None,
            log_dir: None,
            config_path: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_SCENARIO: &'static str = "data/scenarios/duel.ron";
    pub const DEFAULT_POWERS: &'static str = "data/powers.ron";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MODSIM_SCENARIO` - Scenario RON file (default: `data/scenarios/duel.ron`)
    /// - `MODSIM_POWERS` - Power catalog RON file (default: `data/powers.ron`)
    /// - `MODSIM_FRAME_RATE` - Steps per second (default: from runtime config, 60)
    /// - `MODSIM_MAX_FRAMES` - Frames to run (default: scenario length)
    /// - `MODSIM_LOG_DIR` - Also write logs to `modsim.log` in this directory
    /// - `MODSIM_CONFIG` - Runtime config TOML file (default: built-in defaults)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = read("MODSIM_SCENARIO") {
            config.scenario = PathBuf::from(path);
        }
        if let Some(path) = read("MODSIM_POWERS") {
            config.powers = PathBuf::from(path);
        }
        config.frame_rate = read("MODSIM_FRAME_RATE")
            .and_then(|v| v.trim().parse::<u32>().ok())
            .map(|rate| rate.max(1));
        config.max_frames = read("MODSIM_MAX_FRAMES").and_then(|v| v.trim().parse().ok());
        config.log_dir = read("MODSIM_LOG_DIR").map(PathBuf::from);
        config.config_path = read("MODSIM_CONFIG").map(PathBuf::from);

        config
    }
}
