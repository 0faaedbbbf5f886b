use crate::config::ModifierConfig;
use crate::error::{ModifierError, Result};

/// Authored tuning for one power.
///
/// Durations are in seconds. `charge_levels` are ascending fractions of
/// `charge_time` in `(0, 1]`; releasing below the first one discards the
/// charge.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerDefinition {
    pub name: String,
    pub charge_time: f32,
    #[cfg_attr(feature = "serde", serde(default = "default_charge_levels"))]
    pub charge_levels: Vec<f32>,
    pub cooldown: f32,
    /// Whether a discarded charge still pays the cooldown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cooldown_on_discard: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub active_duration: Option<f32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive_duration: Option<f32>,
}

fn default_charge_levels() -> Vec<f32> {
    ModifierConfig::DEFAULT_CHARGE_LEVELS.to_vec()
}

impl PowerDefinition {
    /// Single-level power with no active or passive sub-phase.
    pub fn new(name: impl Into<String>, charge_time: f32, cooldown: f32) -> Self {
        Self {
            name: name.into(),
            charge_time,
            charge_levels: default_charge_levels(),
            cooldown,
            cooldown_on_discard: false,
            active_duration: None,
            passive_duration: None,
        }
    }

    pub fn with_levels(mut self, levels: impl Into<Vec<f32>>) -> Self {
        self.charge_levels = levels.into();
        self
    }

    pub fn with_active(mut self, secs: f32) -> Self {
        self.active_duration = Some(secs);
        self
    }

    pub fn with_passive(mut self, secs: f32) -> Self {
        self.passive_duration = Some(secs);
        self
    }

    pub fn cooldown_on_discard(mut self) -> Self {
        self.cooldown_on_discard = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.check_timing("charge_time", self.charge_time)?;
        self.check_timing("cooldown", self.cooldown)?;
        if let Some(secs) = self.active_duration {
            self.check_timing("active_duration", secs)?;
        }
        if let Some(secs) = self.passive_duration {
            self.check_timing("passive_duration", secs)?;
        }

        let in_range = self
            .charge_levels
            .iter()
            .all(|&level| level > 0.0 && level <= 1.0);
        let ascending = self.charge_levels.windows(2).all(|pair| pair[0] < pair[1]);
        if self.charge_levels.is_empty()
            || self.charge_levels.len() > u8::MAX as usize
            || !in_range
            || !ascending
        {
            return Err(ModifierError::InvalidChargeLevels {
                name: self.name.clone(),
                levels: self.charge_levels.clone(),
            });
        }
        Ok(())
    }

    fn check_timing(&self, field: &'static str, value: f32) -> Result<()> {
        if value.is_finite() && value >= 0.0 {
            Ok(())
        } else {
            Err(ModifierError::InvalidPowerTiming {
                name: self.name.clone(),
                field,
                value,
            })
        }
    }

    /// Number of thresholds reached at `percent` of a full charge.
    pub fn level_for(&self, percent: f32) -> u8 {
        let reached = self
            .charge_levels
            .iter()
            .filter(|&&threshold| percent + ModifierConfig::CHARGE_LEVEL_EPSILON >= threshold)
            .count();
        reached.min(u8::MAX as usize) as u8
    }

    pub fn max_level(&self) -> u8 {
        self.charge_levels.len().min(u8::MAX as usize) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_levels_require_full_charge() {
        let def = PowerDefinition::new("dash", 1.0, 2.0);
        assert_eq!(def.level_for(0.99), 0);
        assert_eq!(def.level_for(1.0), 1);
        assert!(def.validate().is_ok());
    }

    #[test]
    fn counts_reached_thresholds() {
        let def = PowerDefinition::new("bolt", 2.0, 1.0).with_levels([0.25, 0.5, 1.0]);
        assert_eq!(def.level_for(0.0), 0);
        assert_eq!(def.level_for(0.3), 1);
        assert_eq!(def.level_for(0.5), 2);
        assert_eq!(def.level_for(1.0), 3);
        assert_eq!(def.max_level(), 3);
    }

    #[test]
    fn threshold_comparison_tolerates_float_error() {
        let def = PowerDefinition::new("bolt", 1.0, 1.0).with_levels([0.3]);
        assert_eq!(def.level_for(0.1 + 0.2 - 0.00005), 1);
    }

    #[test]
    fn rejects_bad_levels() {
        for levels in [vec![], vec![0.0], vec![0.5, 0.5], vec![0.8, 0.4], vec![1.2]] {
            let def = PowerDefinition::new("bad", 1.0, 1.0).with_levels(levels.clone());
            assert_eq!(
                def.validate(),
                Err(ModifierError::InvalidChargeLevels {
                    name: "bad".into(),
                    levels,
                })
            );
        }
    }

    #[test]
    fn rejects_bad_timing() {
        let def = PowerDefinition::new("bad", 1.0, -1.0);
        assert_eq!(
            def.validate(),
            Err(ModifierError::InvalidPowerTiming {
                name: "bad".into(),
                field: "cooldown",
                value: -1.0,
            })
        );

        let def = PowerDefinition::new("bad", 1.0, 1.0).with_passive(f32::INFINITY);
        assert!(matches!(
            def.validate(),
            Err(ModifierError::InvalidPowerTiming { field: "passive_duration", .. })
        ));
    }
}
