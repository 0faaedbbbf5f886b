//! Ordered timed phases advanced one frame at a time.
//!
//! A [`Sequence`] stands in for a multi-frame coroutine: instead of
//! suspending between steps, the owner polls [`Sequence::update`] each frame
//! and reacts to the [`SequenceEvent`] it returns.

use countdown::{CountdownTimer, TimerConfig};

use crate::error::{ModifierError, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceStep<P> {
    pub phase: P,
    /// Seconds spent in this phase.
    pub duration: f32,
}

impl<P> SequenceStep<P> {
    pub const fn new(phase: P, duration: f32) -> Self {
        Self { phase, duration }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceEvent<P> {
    Entered(P),
    Finished,
}

/// Runs its steps in order, then stops.
///
/// At most one transition happens per update; time left over when a step
/// ends does not carry into the next one.
///
/// ```
/// use modifier_core::{Sequence, SequenceEvent, SequenceStep};
///
/// let mut swing = Sequence::new([
///     SequenceStep::new("windup", 0.2),
///     SequenceStep::new("strike", 0.1),
/// ])
/// .unwrap();
///
/// assert_eq!(swing.start(), SequenceEvent::Entered("windup"));
/// assert_eq!(swing.update(0.2), Some(SequenceEvent::Entered("strike")));
/// assert_eq!(swing.update(0.1), Some(SequenceEvent::Finished));
/// assert!(!swing.is_running());
/// ```
#[derive(Debug)]
pub struct Sequence<P> {
    steps: Vec<SequenceStep<P>>,
    current: Option<usize>,
    timer: CountdownTimer,
}

impl<P: Copy> Sequence<P> {
    pub fn new(steps: impl IntoIterator<Item = SequenceStep<P>>) -> Result<Self> {
        let steps: Vec<_> = steps.into_iter().collect();
        if steps.is_empty() {
            return Err(ModifierError::EmptySequence);
        }
        if let Some((index, step)) = steps
            .iter()
            .enumerate()
            .find(|(_, step)| !step.duration.is_finite() || step.duration < 0.0)
        {
            return Err(ModifierError::InvalidStepDuration {
                index,
                secs: step.duration,
            });
        }

        let timer = CountdownTimer::new(steps[0].duration, TimerConfig::new().paused())?;
        Ok(Self {
            steps,
            current: None,
            timer,
        })
    }

    /// Enters the first step, restarting if already running.
    pub fn start(&mut self) -> SequenceEvent<P> {
        self.enter(0)
    }

    fn enter(&mut self, index: usize) -> SequenceEvent<P> {
        let step = self.steps[index];
        self.current = Some(index);
        self.timer.set_max_time_and_reset(step.duration);
        self.timer.start();
        SequenceEvent::Entered(step.phase)
    }

    /// Stops without emitting [`SequenceEvent::Finished`].
    pub fn cancel(&mut self) -> bool {
        self.timer.stop();
        self.current.take().is_some()
    }

    pub fn update(&mut self, dt: f32) -> Option<SequenceEvent<P>> {
        let index = self.current?;
        if self.timer.update(dt) == 0 {
            return None;
        }

        let next = index + 1;
        if next < self.steps.len() {
            Some(self.enter(next))
        } else {
            self.current = None;
            self.timer.stop();
            Some(SequenceEvent::Finished)
        }
    }

    pub fn current(&self) -> Option<P> {
        self.current.map(|index| self.steps[index].phase)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some()
    }

    /// Progress through the current step, `0.0` when not running.
    pub fn phase_percent(&self) -> f32 {
        if self.is_running() {
            self.timer.percentage()
        } else {
            0.0
        }
    }

    pub fn steps(&self) -> &[SequenceStep<P>] {
        &self.steps
    }

    pub fn total_duration(&self) -> f32 {
        self.steps.iter().map(|step| step.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Swing {
        WindUp,
        Strike,
        Recover,
    }

    fn swing() -> Sequence<Swing> {
        Sequence::new([
            SequenceStep::new(Swing::WindUp, 0.5),
            SequenceStep::new(Swing::Strike, 0.0),
            SequenceStep::new(Swing::Recover, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn runs_steps_in_order() {
        let mut seq = swing();
        assert!(!seq.is_running());
        assert_eq!(seq.update(1.0), None);

        assert_eq!(seq.start(), SequenceEvent::Entered(Swing::WindUp));
        assert_eq!(seq.update(0.25), None);
        assert!((seq.phase_percent() - 0.5).abs() < 1e-6);
        assert_eq!(seq.update(0.25), Some(SequenceEvent::Entered(Swing::Strike)));
        assert_eq!(seq.update(0.0), Some(SequenceEvent::Entered(Swing::Recover)));
        assert_eq!(seq.update(1.0), Some(SequenceEvent::Finished));
        assert_eq!(seq.current(), None);
    }

    #[test]
    fn one_transition_per_update() {
        let mut seq = swing();
        seq.start();
        assert_eq!(seq.update(10.0), Some(SequenceEvent::Entered(Swing::Strike)));
        assert_eq!(seq.current(), Some(Swing::Strike));
        assert_eq!(seq.update(10.0), Some(SequenceEvent::Entered(Swing::Recover)));
        assert_eq!(seq.phase_percent(), 0.0);
    }

    #[test]
    fn cancel_stops_silently() {
        let mut seq = swing();
        seq.start();
        assert!(seq.cancel());
        assert!(!seq.cancel());
        assert_eq!(seq.update(5.0), None);
    }

    #[test]
    fn restart_rewinds_to_first_step() {
        let mut seq = swing();
        seq.start();
        seq.update(0.5);
        assert_eq!(seq.start(), SequenceEvent::Entered(Swing::WindUp));
        assert_eq!(seq.current_index(), Some(0));
    }

    #[test]
    fn rejects_invalid_steps() {
        assert_eq!(
            Sequence::<Swing>::new([]).unwrap_err(),
            ModifierError::EmptySequence
        );
        assert_eq!(
            Sequence::new([
                SequenceStep::new(Swing::WindUp, 0.5),
                SequenceStep::new(Swing::Strike, -1.0),
            ])
            .unwrap_err(),
            ModifierError::InvalidStepDuration { index: 1, secs: -1.0 }
        );
    }

    #[test]
    fn total_duration_sums_steps() {
        assert_eq!(swing().total_duration(), 1.5);
    }
}
