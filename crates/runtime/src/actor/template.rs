use modifier_core::{AttributeKind, PowerDefinition};
use serde::{Deserialize, Serialize};

use super::{DetectionSpec, MeleeTiming, PowerKind};
use crate::api::{Result, RuntimeError};

/// Where a power slot gets its timings from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PowerSource {
    /// Entry of a shared power catalog, looked up by name.
    Catalog(String),
    Inline(PowerDefinition),
}

impl PowerSource {
    pub fn name(&self) -> &str {
        match self {
            PowerSource::Catalog(name) => name,
            PowerSource::Inline(definition) => &definition.name,
        }
    }

    /// The definition, once catalog references have been resolved.
    pub fn definition(&self) -> Option<&PowerDefinition> {
        match self {
            PowerSource::Catalog(_) => None,
            PowerSource::Inline(definition) => Some(definition),
        }
    }
}

/// A power definition paired with the effect it drives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PowerSlot {
    pub kind: PowerKind,
    pub source: PowerSource,
}

/// Everything needed to spawn an actor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActorTemplate {
    pub name: String,
    /// Base values overriding each attribute kind's default.
    #[serde(default)]
    pub base: Vec<(AttributeKind, f32)>,
    #[serde(default)]
    pub powers: Vec<PowerSlot>,
    #[serde(default)]
    pub melee: Option<MeleeTiming>,
    #[serde(default)]
    pub detection: Option<DetectionSpec>,
}

impl ActorTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: Vec::new(),
            powers: Vec::new(),
            melee: None,
            detection: None,
        }
    }

    pub fn with_base(mut self, attribute: AttributeKind, value: f32) -> Self {
        self.base.push((attribute, value));
        self
    }

    pub fn with_power(mut self, kind: PowerKind, definition: PowerDefinition) -> Self {
        self.powers.push(PowerSlot {
            kind,
            source: PowerSource::Inline(definition),
        });
        self
    }

    /// Slot whose definition comes from the power catalog.
    pub fn with_catalog_power(mut self, kind: PowerKind, name: impl Into<String>) -> Self {
        self.powers.push(PowerSlot {
            kind,
            source: PowerSource::Catalog(name.into()),
        });
        self
    }

    /// Replaces catalog references with the matching catalog entries.
    pub fn resolve_powers(&mut self, catalog: &[PowerDefinition]) -> Result<()> {
        for slot in &mut self.powers {
            if let PowerSource::Catalog(name) = &slot.source {
                let definition = catalog
                    .iter()
                    .find(|d| &d.name == name)
                    .ok_or_else(|| RuntimeError::UnknownPower {
                        actor: self.name.clone(),
                        power: name.clone(),
                    })?;
                slot.source = PowerSource::Inline(definition.clone());
            }
        }
        Ok(())
    }

    pub fn with_melee(mut self, timing: MeleeTiming) -> Self {
        self.melee = Some(timing);
        self
    }

    pub fn with_detection(mut self, spec: DetectionSpec) -> Self {
        self.detection = Some(spec);
        self
    }
}
