//! Frame stepper and its builder.
//!
//! The runtime is single-threaded and driven entirely by its caller: nothing
//! advances between calls to [`Runtime::step`].

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::actor::{Actor, ActorId, ActorTemplate};
use crate::api::{Command, Result, RuntimeError};
use crate::events::{RuntimeEvent, Topic};
use crate::services::Services;

/// Runtime configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Fixed steps per second used by drivers that step at a constant rate.
    pub frame_rate: u32,
    /// Pending event count above which the queue logs a warning.
    pub event_warn_threshold: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60,
            event_warn_threshold: 256,
        }
    }
}

impl RuntimeConfig {
    pub fn validate(&self) -> Result<()> {
        if self.frame_rate == 0 {
            return Err(RuntimeError::InvalidConfig(
                "frame_rate must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Seconds per frame at the configured rate.
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }
}

/// What one [`Runtime::step`] did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    /// Zero-based index of the frame just stepped.
    pub frame: u64,
    /// Simulated time at the end of the frame.
    pub time: f32,
    pub commands_applied: usize,
    pub commands_rejected: usize,
    pub events: Vec<RuntimeEvent>,
}

impl FrameReport {
    pub fn events_on(&self, topic: Topic) -> impl Iterator<Item = &RuntimeEvent> + '_ {
        self.events.iter().filter(move |e| e.topic() == topic)
    }

    pub fn events_for(&self, actor: ActorId) -> impl Iterator<Item = &RuntimeEvent> + '_ {
        self.events.iter().filter(move |e| e.actor() == actor)
    }
}

#[derive(Debug)]
pub struct Runtime {
    config: RuntimeConfig,
    services: Services,
    actors: Vec<Actor>,
    commands: VecDeque<Command>,
    frame: u64,
    time: f32,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.0 as usize)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.0 as usize)
    }

    pub fn find_actor(&self, name: &str) -> Option<&Actor> {
        self.actors.iter().find(|a| a.name() == name)
    }

    /// Spawns an actor from a template; ids are assigned in spawn order.
    pub fn spawn(&mut self, template: &ActorTemplate) -> Result<ActorId> {
        self.services.ensure_running()?;
        let id = ActorId(self.actors.len() as u32);
        let actor = Actor::spawn(id, template, self.services.disablers_mut())?;
        self.actors.push(actor);
        Ok(id)
    }

    /// Queues a command for the start of the next step.
    pub fn submit(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Applies queued commands, then advances every actor once.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn step(&mut self, dt: f32) -> FrameReport {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "ignoring invalid frame delta");
            0.0
        };

        let mut report = FrameReport {
            frame: self.frame,
            ..FrameReport::default()
        };

        while let Some(command) = self.commands.pop_front() {
            if self.apply(&command) {
                report.commands_applied += 1;
            } else {
                report.commands_rejected += 1;
            }
        }

        let events = self.services.events_mut();
        for actor in &mut self.actors {
            actor.update(dt, events);
        }

        self.frame += 1;
        self.time += dt;
        report.time = self.time;
        report.events = self.services.events_mut().drain();

        trace!(
            frame = report.frame,
            applied = report.commands_applied,
            rejected = report.commands_rejected,
            events = report.events.len(),
            "frame stepped"
        );
        report
    }

    /// Steps by one frame at the configured frame rate.
    pub fn step_fixed(&mut self) -> FrameReport {
        self.step(self.config.frame_dt())
    }

    /// Applies one command immediately; `false` if it was rejected.
    fn apply(&mut self, command: &Command) -> bool {
        let id = command.actor();
        let Some(actor) = self.actors.get_mut(id.0 as usize) else {
            warn!(command = command.label(), %id, "command targets unknown actor");
            return false;
        };

        let applied = match command {
            Command::AddModifier {
                attribute,
                kind,
                value,
                duration,
                label,
                ..
            } => {
                actor.add_modifier(*attribute, *kind, *value, *duration, label.as_deref());
                true
            }
            Command::RemoveModifier { label, .. } => actor.remove_modifier(label),
            Command::Disable {
                capability, key, ..
            } => {
                let key = self.services.disablers_mut().named(key);
                actor.stats_mut().capabilities.disable(*capability, key);
                true
            }
            Command::Enable {
                capability, key, ..
            } => match self.services.disablers().lookup(key) {
                Some(key) => actor.stats_mut().capabilities.enable(*capability, key),
                None => false,
            },
            Command::DisableFor {
                capability, secs, ..
            } => {
                actor.stats_mut().capabilities.disable_for(*capability, *secs);
                true
            }
            Command::StartCharge { power, .. } => match actor.start_charge(power) {
                Some(started) => started,
                None => {
                    warn!(%id, power = %power, "actor has no such power");
                    false
                }
            },
            Command::Release { power, .. } => match actor.release(power) {
                Some(outcome) => {
                    self.services
                        .events_mut()
                        .push(RuntimeEvent::PowerReleased {
                            actor: id,
                            power: power.clone(),
                            outcome,
                        });
                    true
                }
                None => {
                    warn!(%id, power = %power, "actor has no such power");
                    false
                }
            },
            Command::CancelCharge { power, .. } => actor.cancel_charge(power).unwrap_or(false),
            Command::Attack { .. } => actor.attack(self.services.events_mut()).unwrap_or(false),
            Command::SetTargetVisible { visible, .. } => {
                actor.set_target_visible(*visible).is_some()
            }
        };

        debug!(command = command.label(), %id, applied, "command applied");
        applied
    }

    /// Stops services and returns any events that were never drained.
    pub fn shutdown(mut self) -> Vec<RuntimeEvent> {
        self.services.shutdown()
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    actors: Vec<ActorTemplate>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            actors: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Spawn an actor from this template at build time
    pub fn actor(mut self, template: ActorTemplate) -> Self {
        self.actors.push(template);
        self
    }

    pub fn actors(mut self, templates: impl IntoIterator<Item = ActorTemplate>) -> Self {
        self.actors.extend(templates);
        self
    }

    pub fn build(self) -> Result<Runtime> {
        self.config.validate()?;

        let mut services = Services::new(self.config.event_warn_threshold);
        services.init();

        let mut runtime = Runtime {
            config: self.config,
            services,
            actors: Vec::with_capacity(self.actors.len()),
            commands: VecDeque::new(),
            frame: 0,
            time: 0.0,
        };
        for template in &self.actors {
            runtime.spawn(template)?;
        }
        Ok(runtime)
    }
}
