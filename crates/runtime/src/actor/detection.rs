use countdown::{Hysteresis, LatchChange};
use modifier_core::ModifierError;
use serde::{Deserialize, Serialize};

use crate::api::Result;

/// How long a target must stay visible before it is acquired, and hidden
/// before it is lost.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionSpec {
    pub fill_secs: f32,
    pub drain_secs: f32,
}

impl Default for DetectionSpec {
    fn default() -> Self {
        Self {
            fill_secs: 0.5,
            drain_secs: 1.0,
        }
    }
}

/// Target tracking with hysteresis, so flickering line of sight does not
/// toggle the acquired state.
#[derive(Debug)]
pub struct Detection {
    latch: Hysteresis,
    visible: bool,
}

impl Detection {
    pub fn new(spec: DetectionSpec) -> Result<Self> {
        let latch = Hysteresis::new(spec.fill_secs, spec.drain_secs).map_err(ModifierError::from)?;
        Ok(Self {
            latch,
            visible: false,
        })
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_acquired(&self) -> bool {
        self.latch.is_engaged()
    }

    pub fn level(&self) -> f32 {
        self.latch.level()
    }

    pub fn update(&mut self, dt: f32) -> Option<LatchChange> {
        self.latch.update(self.visible, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brief_glimpse_is_not_enough() {
        let mut detection = Detection::new(DetectionSpec::default()).unwrap();
        detection.set_visible(true);
        assert_eq!(detection.update(0.25), None);
        detection.set_visible(false);
        assert_eq!(detection.update(0.25), None);
        assert!(!detection.is_acquired());
    }

    #[test]
    fn acquires_and_loses_target() {
        let mut detection = Detection::new(DetectionSpec::default()).unwrap();
        detection.set_visible(true);
        assert_eq!(detection.update(0.5), Some(LatchChange::Engaged));

        detection.set_visible(false);
        assert_eq!(detection.update(0.5), None);
        assert!(detection.is_acquired());
        assert_eq!(detection.update(0.5), Some(LatchChange::Released));
    }
}
