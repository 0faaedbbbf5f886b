use tracing::debug;

use super::{Scenario, ScheduledCommand};
use crate::runtime::{FrameReport, Runtime};

/// Feeds a scenario's commands to a runtime as simulated time passes.
#[derive(Debug, Clone)]
pub struct ScenarioPlayer {
    schedule: Vec<ScheduledCommand>,
    cursor: usize,
    clock: f64,
}

impl ScenarioPlayer {
    /// Slack when comparing a command's time against the frame clock.
    const CLOCK_EPSILON: f64 = 1e-6;

    pub fn new(scenario: &Scenario) -> Self {
        let mut schedule = scenario.commands.clone();
        // Stable, so commands sharing a timestamp keep their authored order.
        schedule.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self {
            schedule,
            cursor: 0,
            clock: 0.0,
        }
    }

    /// Submits every command that is due, then steps the runtime once.
    pub fn advance(&mut self, runtime: &mut Runtime, dt: f32) -> FrameReport {
        while let Some(next) = self.schedule.get(self.cursor)
            && f64::from(next.at) <= self.clock + Self::CLOCK_EPSILON
        {
            debug!(at = next.at, command = next.command.label(), "scenario command due");
            runtime.submit(next.command.clone());
            self.cursor += 1;
        }

        let report = runtime.step(dt);
        if dt.is_finite() && dt > 0.0 {
            self.clock += f64::from(dt);
        }
        report
    }

    /// Seconds of scenario time played so far.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn remaining(&self) -> usize {
        self.schedule.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.schedule.len()
    }
}
