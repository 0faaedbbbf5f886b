//! Fill/drain latch for detection ranges.
//!
//! A target standing inside a detection range fills the timer; leaving the
//! range drains it. The latch engages once the timer is full and releases
//! only when it has drained back to empty, so a target flickering on the
//! range boundary does not toggle detection every frame.

use crate::error::{Result, TimerError, validate_duration};
use crate::timer::{CountdownTimer, TimerConfig};

/// Transition reported by [`Hysteresis::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LatchChange {
    Engaged,
    Released,
}

#[derive(Debug)]
pub struct Hysteresis {
    timer: CountdownTimer,
    drain_rate: f32,
    engaged: bool,
}

impl Hysteresis {
    /// Creates a latch that fills in `fill_secs` and drains in `drain_secs`.
    ///
    /// A zero `drain_secs` releases on the first frame the condition fails.
    pub fn new(fill_secs: f32, drain_secs: f32) -> Result<Self> {
        let fill_secs = validate_duration(fill_secs)?;
        if !drain_secs.is_finite() || drain_secs < 0.0 {
            return Err(TimerError::InvalidDrainTime(drain_secs));
        }

        let drain_rate = if drain_secs == 0.0 {
            f32::INFINITY
        } else {
            fill_secs / drain_secs
        };

        Ok(Self {
            timer: CountdownTimer::new(fill_secs, TimerConfig::new())?,
            drain_rate,
            engaged: false,
        })
    }

    /// Advances the latch by one frame.
    pub fn update(&mut self, condition: bool, dt: f32) -> Option<LatchChange> {
        if dt.is_nan() || dt <= 0.0 {
            return None;
        }

        self.timer.start();
        if condition {
            self.timer.update(dt);
        } else {
            let drain = dt * self.drain_rate;
            self.timer.update(if drain.is_finite() { -drain } else { f32::MIN });
        }

        if condition && !self.engaged && self.timer.is_complete() {
            self.engaged = true;
            return Some(LatchChange::Engaged);
        }
        if !condition && self.engaged && self.timer.elapsed() <= 0.0 {
            self.engaged = false;
            return Some(LatchChange::Released);
        }
        None
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Fill level in `[0, 1]`, e.g. for an awareness meter.
    pub fn level(&self) -> f32 {
        self.timer.percentage()
    }

    /// Drops back to empty and released.
    pub fn reset(&mut self) {
        self.timer.reset();
        self.engaged = false;
    }
}
