//! Countdown timer advanced by explicit frame deltas.

use std::fmt;

use crate::easing::Easing;
use crate::error::{Result, validate_duration};
use crate::listeners::Listeners;

/// Upper bound on completions a looping timer reports from one `update`.
///
/// A huge delta against a tiny cycle would otherwise flood listeners; any
/// cycles beyond this bound are dropped.
pub const MAX_CYCLES_PER_UPDATE: u32 = 64;

/// Behavioural flags fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimerConfig {
    /// Timer is active immediately after construction.
    pub auto_start: bool,
    /// On completion, wrap back to zero instead of stopping.
    pub auto_loop: bool,
    /// `reset()` also starts the timer.
    pub restart_on_reset: bool,
    /// Curve used by [`CountdownTimer::output_value`].
    pub easing: Easing,
}

impl TimerConfig {
    pub const fn new() -> Self {
        Self {
            auto_start: true,
            auto_loop: false,
            restart_on_reset: true,
            easing: Easing::Linear,
        }
    }

    /// Wrap around on completion (builder pattern).
    #[must_use]
    pub const fn looping(mut self) -> Self {
        self.auto_loop = true;
        self
    }

    /// Do not start on construction (builder pattern).
    #[must_use]
    pub const fn paused(mut self) -> Self {
        self.auto_start = false;
        self
    }

    /// Leave the timer stopped after `reset()` (builder pattern).
    #[must_use]
    pub const fn manual_restart(mut self) -> Self {
        self.restart_on_reset = false;
        self
    }

    /// Use a curve for `output_value()` (builder pattern).
    #[must_use]
    pub const fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Event emitted on [`CountdownTimer::on_complete`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerCompleted {
    /// 1-based index of the completed cycle within the current update.
    /// Always 1 for non-looping timers.
    pub cycle: u32,
}

/// Tracks elapsed time against a maximum duration.
///
/// # Invariants
///
/// - `0 <= elapsed <= max_time` after every operation
/// - A non-looping timer fires once when elapsed reaches `max_time`, then stops
/// - A looping timer fires once per full cycle and carries overshoot forward
///
/// # Example
///
/// ```
/// # use countdown::CountdownTimer;
/// let mut timer = CountdownTimer::once(5.0).unwrap();
/// assert_eq!(timer.update(2.0), 0);
/// assert_eq!(timer.update(3.0), 1);
/// assert!(timer.is_complete());
/// assert_eq!(timer.update(1.0), 0);
/// ```
pub struct CountdownTimer {
    elapsed: f32,
    max_time: f32,
    active: bool,
    // Set once a non-looping timer has fired; cleared when elapsed falls back below max.
    fired: bool,
    config: TimerConfig,
    on_complete: Listeners<TimerCompleted>,
}

impl CountdownTimer {
    /// Creates a timer; fails if `max_time` is negative or not finite.
    pub fn new(max_time: f32, config: TimerConfig) -> Result<Self> {
        let max_time = validate_duration(max_time)?;
        Ok(Self {
            elapsed: 0.0,
            max_time,
            active: config.auto_start,
            fired: false,
            config,
            on_complete: Listeners::new(),
        })
    }

    /// Single-shot timer that starts immediately.
    pub fn once(max_time: f32) -> Result<Self> {
        Self::new(max_time, TimerConfig::new())
    }

    /// Looping timer that starts immediately.
    pub fn repeating(max_time: f32) -> Result<Self> {
        Self::new(max_time, TimerConfig::new().looping())
    }

    /// Timer seeded as already complete, so a repeating action fires on the
    /// next update instead of waiting a full cycle.
    pub fn expired(max_time: f32, config: TimerConfig) -> Result<Self> {
        let mut timer = Self::new(max_time, config)?;
        timer.force_percent(1.0);
        Ok(timer)
    }

    /// Sets the timer active. Elapsed time is kept.
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Sets the timer inactive. Elapsed time is kept.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Rewinds to zero, restarting if configured to.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.fired = false;
        if self.config.restart_on_reset {
            self.active = true;
        }
    }

    /// Re-targets the maximum duration without touching elapsed time.
    ///
    /// Negative or non-finite values saturate to zero. If elapsed ends up at
    /// the new maximum the timer completes on its next update. Growing past
    /// elapsed re-arms a fired timer; it still needs `start()` to run.
    pub fn set_max_time(&mut self, max_time: f32) {
        self.max_time = if max_time.is_finite() {
            max_time.max(0.0)
        } else {
            0.0
        };
        self.elapsed = self.elapsed.min(self.max_time);
        if self.elapsed < self.max_time {
            self.fired = false;
        }
    }

    pub fn set_max_time_and_reset(&mut self, max_time: f32) {
        self.set_max_time(max_time);
        self.reset();
    }

    /// Seeds elapsed time as a fraction of the maximum.
    ///
    /// Does not fire completion. Forcing a non-looping timer to 100% marks it
    /// as already fired.
    pub fn force_percent(&mut self, percent: f32) {
        let percent = if percent.is_nan() {
            0.0
        } else {
            percent.clamp(0.0, 1.0)
        };
        self.elapsed = percent * self.max_time;
        self.fired = !self.config.auto_loop && self.is_complete();
    }

    /// Advances the timer by `dt` seconds and returns completions fired.
    ///
    /// Inactive timers ignore the call. A negative `dt` rewinds toward zero
    /// and never fires.
    pub fn update(&mut self, dt: f32) -> u32 {
        if !self.active || dt.is_nan() {
            return 0;
        }

        if dt < 0.0 {
            self.elapsed = (self.elapsed + dt).max(0.0);
            if self.elapsed < self.max_time {
                self.fired = false;
            }
            return 0;
        }

        let cycles = if self.config.auto_loop {
            self.advance_looping(dt)
        } else {
            self.advance_once(dt)
        };

        for cycle in 1..=cycles {
            self.on_complete.emit(&TimerCompleted { cycle });
        }
        cycles
    }

    fn advance_once(&mut self, dt: f32) -> u32 {
        if self.fired {
            return 0;
        }
        self.elapsed = (self.elapsed + dt).min(self.max_time);
        if self.elapsed >= self.max_time {
            self.fired = true;
            self.active = false;
            1
        } else {
            0
        }
    }

    fn advance_looping(&mut self, dt: f32) -> u32 {
        if self.max_time <= 0.0 {
            self.elapsed = 0.0;
            return 1;
        }

        let total = self.elapsed + dt;
        if total < self.max_time {
            self.elapsed = total;
            return 0;
        }

        let cycles = (total / self.max_time).floor();
        if !cycles.is_finite() {
            self.elapsed = 0.0;
            return MAX_CYCLES_PER_UPDATE;
        }
        self.elapsed = (total % self.max_time).clamp(0.0, self.max_time);
        // Float remainder can land exactly on max; that cycle is already counted.
        if self.elapsed >= self.max_time {
            self.elapsed = 0.0;
        }

        if cycles >= MAX_CYCLES_PER_UPDATE as f32 {
            MAX_CYCLES_PER_UPDATE
        } else {
            cycles as u32
        }
    }

    /// Completion listeners. Clone the handle to register from elsewhere.
    pub fn on_complete(&self) -> &Listeners<TimerCompleted> {
        &self.on_complete
    }

    /// Fraction complete in `[0, 1]`. A zero-length timer reports `1.0`.
    pub fn percentage(&self) -> f32 {
        if self.max_time <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.max_time).clamp(0.0, 1.0)
        }
    }

    /// Percentage mapped through the configured easing curve.
    pub fn output_value(&self) -> f32 {
        self.config.easing.apply(self.percentage())
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.max_time
    }

    pub fn is_not_complete(&self) -> bool {
        !self.is_complete()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_looping(&self) -> bool {
        self.config.auto_loop
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn max_time(&self) -> f32 {
        self.max_time
    }

    pub fn remaining(&self) -> f32 {
        (self.max_time - self.elapsed).max(0.0)
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }
}

impl fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("elapsed", &self.elapsed)
            .field("max_time", &self.max_time)
            .field("active", &self.active)
            .field("looping", &self.config.auto_loop)
            .field("listeners", &self.on_complete.len())
            .finish()
    }
}
