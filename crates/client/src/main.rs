//! `modsim`: plays a scenario through the modifier runtime and logs what happened.
mod config;
mod summary;

use std::path::Path;

use anyhow::{Context, Result};
use config::ClientConfig;
use modifier_content::{ConfigLoader, PowerLoader, ScenarioLoader};
use runtime::{RuntimeConfig, ScenarioPlayer};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = ClientConfig::from_env();
    let _guard = setup_logging(config.log_dir.as_deref())?;

    run(&config)
}

fn run(config: &ClientConfig) -> Result<()> {
    let mut runtime_config = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(rate) = config.frame_rate {
        runtime_config.frame_rate = rate;
    }

    let mut scenario = ScenarioLoader::load(&config.scenario)?;
    if scenario.uses_catalog() {
        let catalog = PowerLoader::load(&config.powers)?;
        scenario
            .resolve_powers(&catalog)
            .with_context(|| {
                format!("Failed to resolve powers from {}", config.powers.display())
            })?;
    }
    let frames = config
        .max_frames
        .unwrap_or_else(|| scenario.frame_count(runtime_config.frame_rate));
    let dt = runtime_config.frame_dt();

    let mut runtime = scenario
        .build_runtime(runtime_config)
        .with_context(|| format!("Failed to build runtime for scenario '{}'", scenario.name))?;
    let mut player = ScenarioPlayer::new(&scenario);

    info!(scenario = %scenario.name, frames, dt, "starting simulation");
    for _ in 0..frames {
        let report = player.advance(&mut runtime, dt);
        for event in &report.events {
            info!(
                frame = report.frame,
                time = report.time,
                topic = %event.topic(),
                "{:?}",
                event
            );
        }
    }

    summary::log_actors(&runtime);
    let undrained = runtime.shutdown();
    info!(
        remaining_commands = player.remaining(),
        undrained = undrained.len(),
        "simulation finished"
    );
    Ok(())
}

/// Setup logging to stderr, and to `modsim.log` when a directory is given.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "modsim.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        info!("Log file: {}/modsim.log", dir.display());
    }
    Ok(guard)
}
