//! Scripted scenarios: actor templates plus commands scheduled in time.
//!
//! Actors are numbered in declaration order, so commands refer to the first
//! declared actor as `ActorId(0)`.

mod player;

pub use player::ScenarioPlayer;

use modifier_core::PowerDefinition;
use serde::{Deserialize, Serialize};

use crate::actor::{ActorTemplate, PowerSource};
use crate::api::{Command, Result, RuntimeError};
use crate::runtime::{Runtime, RuntimeConfig};

/// A command applied on the first frame starting at or after `at` seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledCommand {
    pub at: f32,
    pub command: Command,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Seconds to run; defaults to one second past the last command.
    #[serde(default)]
    pub duration: Option<f32>,
    pub actors: Vec<ActorTemplate>,
    #[serde(default)]
    pub commands: Vec<ScheduledCommand>,
}

impl Scenario {
    /// Tail appended after the last command when no duration is given.
    pub const DEFAULT_TAIL_SECS: f32 = 1.0;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: None,
            actors: Vec::new(),
            commands: Vec::new(),
        }
    }

    pub fn with_actor(mut self, template: ActorTemplate) -> Self {
        self.actors.push(template);
        self
    }

    pub fn at(mut self, at: f32, command: Command) -> Self {
        self.commands.push(ScheduledCommand { at, command });
        self
    }

    pub fn with_duration(mut self, secs: f32) -> Self {
        self.duration = Some(secs);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(secs) = self.duration
            && (!secs.is_finite() || secs < 0.0)
        {
            return Err(RuntimeError::InvalidConfig(format!(
                "scenario '{}' has invalid duration {secs}",
                self.name
            )));
        }

        for template in &self.actors {
            for slot in &template.powers {
                if let Some(definition) = slot.source.definition() {
                    definition.validate()?;
                }
            }
        }

        for (index, scheduled) in self.commands.iter().enumerate() {
            if !scheduled.at.is_finite() || scheduled.at < 0.0 {
                return Err(RuntimeError::InvalidSchedule {
                    index,
                    at: scheduled.at,
                });
            }
            let actor = scheduled.command.actor();
            if actor.0 as usize >= self.actors.len() {
                return Err(RuntimeError::ScenarioActorOutOfRange {
                    index,
                    actor,
                    count: self.actors.len(),
                });
            }
        }
        Ok(())
    }

    /// Resolves every catalog power reference against `catalog`.
    pub fn resolve_powers(&mut self, catalog: &[PowerDefinition]) -> Result<()> {
        for template in &mut self.actors {
            template.resolve_powers(catalog)?;
        }
        Ok(())
    }

    /// Whether any actor still refers to the power catalog.
    pub fn uses_catalog(&self) -> bool {
        self.actors.iter().any(|template| {
            template
                .powers
                .iter()
                .any(|slot| matches!(slot.source, PowerSource::Catalog(_)))
        })
    }

    /// Seconds of simulated time the scenario covers.
    pub fn length(&self) -> f32 {
        self.duration.unwrap_or_else(|| {
            let last = self
                .commands
                .iter()
                .map(|c| c.at)
                .fold(0.0_f32, f32::max);
            last + Self::DEFAULT_TAIL_SECS
        })
    }

    /// Frames needed to cover [`length`](Self::length) at `frame_rate`.
    pub fn frame_count(&self, frame_rate: u32) -> u64 {
        (f64::from(self.length()) * f64::from(frame_rate)).ceil() as u64
    }

    /// Validates the scenario and spawns its actors into a fresh runtime.
    pub fn build_runtime(&self, config: RuntimeConfig) -> Result<Runtime> {
        self.validate()?;
        tracing::info!(
            scenario = %self.name,
            actors = self.actors.len(),
            commands = self.commands.len(),
            "building runtime from scenario"
        );
        Runtime::builder()
            .config(config)
            .actors(self.actors.iter().cloned())
            .build()
    }
}
