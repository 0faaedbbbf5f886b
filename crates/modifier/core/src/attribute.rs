//! Numeric attributes driven by token stacks.
//!
//! Each attribute layers two stacks over its base value, applied in a fixed
//! order:
//!
//! ```text
//! value = clamp((base + Σ offsets) × Π multipliers, min, max)
//! ```
//!
//! Gameplay code never writes the resulting value; it adds and removes
//! tokens, and the value is recomputed on every read.

use strum::{EnumCount, IntoEnumIterator};

use crate::error::{ModifierError, Result};
use crate::token::{Product, Sum, TokenDuration, TokenHandle, TokenManager};

/// Attributes every entity carries.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttributeKind {
    /// Units per second.
    MoveSpeed,
    /// Scales outgoing damage.
    DamageMultiplier,
    /// Attacks per second.
    AttackSpeed,
    JumpHeight,
    MaxHealth,
}

impl AttributeKind {
    pub const fn default_base(self) -> f32 {
        match self {
            AttributeKind::MoveSpeed => 5.0,
            AttributeKind::DamageMultiplier => 1.0,
            AttributeKind::AttackSpeed => 1.0,
            AttributeKind::JumpHeight => 1.5,
            AttributeKind::MaxHealth => 100.0,
        }
    }

    pub const fn default_bounds(self) -> AttributeBounds {
        match self {
            AttributeKind::MaxHealth => AttributeBounds { min: 1.0, max: f32::MAX },
            _ => AttributeBounds::NON_NEGATIVE,
        }
    }
}

/// Clamp range for an attribute's final value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeBounds {
    pub min: f32,
    pub max: f32,
}

impl AttributeBounds {
    /// `[0, f32::MAX]`: speeds and multipliers never go negative.
    pub const NON_NEGATIVE: Self = Self {
        min: 0.0,
        max: f32::MAX,
    };

    pub const UNCLAMPED: Self = Self {
        min: f32::MIN,
        max: f32::MAX,
    };

    pub fn new(min: f32, max: f32) -> Result<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(ModifierError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.min.max(0.0).min(self.max)
        } else {
            value.clamp(self.min, self.max)
        }
    }
}

/// Which stack a modifier token goes into.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ModifierKind {
    /// Added to the base before multipliers.
    Offset,
    /// Multiplied into the offset base.
    Multiplier,
}

/// Handle to a modifier on one [`Attribute`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModifierHandle {
    pub kind: ModifierKind,
    pub token: TokenHandle,
}

#[derive(Debug)]
pub struct Attribute {
    base: f32,
    bounds: AttributeBounds,
    offsets: TokenManager<f32, Sum>,
    multipliers: TokenManager<f32, Product>,
}

impl Attribute {
    pub fn new(base: f32, bounds: AttributeBounds) -> Result<Self> {
        if !base.is_finite() {
            return Err(ModifierError::NonFiniteBase(base));
        }
        let bounds = AttributeBounds::new(bounds.min, bounds.max)?;
        Ok(Self::from_parts(base, bounds))
    }

    fn from_parts(base: f32, bounds: AttributeBounds) -> Self {
        Self {
            base,
            bounds,
            offsets: TokenManager::new(Sum),
            multipliers: TokenManager::new(Product),
        }
    }

    fn for_kind(kind: AttributeKind) -> Self {
        Self::from_parts(kind.default_base(), kind.default_bounds())
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    pub fn set_base(&mut self, base: f32) -> Result<()> {
        if !base.is_finite() {
            return Err(ModifierError::NonFiniteBase(base));
        }
        self.base = base;
        Ok(())
    }

    pub fn bounds(&self) -> AttributeBounds {
        self.bounds
    }

    /// Final value with every live modifier applied.
    pub fn value(&self) -> f32 {
        let offset_base = self.base + self.offsets.value();
        self.bounds.clamp(offset_base * self.multipliers.value())
    }

    pub fn add(&mut self, kind: ModifierKind, value: f32, duration: TokenDuration) -> ModifierHandle {
        let token = match kind {
            ModifierKind::Offset => self.offsets.add(value, duration),
            ModifierKind::Multiplier => self.multipliers.add(value, duration),
        };
        ModifierHandle { kind, token }
    }

    pub fn add_offset(&mut self, value: f32, duration: TokenDuration) -> ModifierHandle {
        self.add(ModifierKind::Offset, value, duration)
    }

    pub fn add_multiplier(&mut self, value: f32, duration: TokenDuration) -> ModifierHandle {
        self.add(ModifierKind::Multiplier, value, duration)
    }

    /// Removes a modifier; `false` if it already expired or was removed.
    pub fn remove(&mut self, handle: ModifierHandle) -> bool {
        match handle.kind {
            ModifierKind::Offset => self.offsets.remove_token(handle.token).is_some(),
            ModifierKind::Multiplier => self.multipliers.remove_token(handle.token).is_some(),
        }
    }

    pub fn contains(&self, handle: ModifierHandle) -> bool {
        match handle.kind {
            ModifierKind::Offset => self.offsets.contains(handle.token),
            ModifierKind::Multiplier => self.multipliers.contains(handle.token),
        }
    }

    pub fn offsets(&self) -> &TokenManager<f32, Sum> {
        &self.offsets
    }

    pub fn multipliers(&self) -> &TokenManager<f32, Product> {
        &self.multipliers
    }

    pub fn modifier_count(&self) -> usize {
        self.offsets.len() + self.multipliers.len()
    }

    /// Advances both stacks once; returns the number of modifiers expired.
    pub fn update(&mut self, dt: f32) -> usize {
        self.offsets.update(dt) + self.multipliers.update(dt)
    }
}

/// One [`Attribute`] per [`AttributeKind`].
#[derive(Debug)]
pub struct Attributes {
    slots: [Attribute; AttributeKind::COUNT],
}

impl Attributes {
    /// Every attribute at its kind's default base and bounds.
    pub fn new() -> Self {
        let mut kinds = AttributeKind::iter();
        Self {
            slots: std::array::from_fn(|_| {
                kinds
                    .next()
                    .map(Attribute::for_kind)
                    .unwrap_or_else(|| Attribute::from_parts(0.0, AttributeBounds::UNCLAMPED))
            }),
        }
    }

    pub fn get(&self, kind: AttributeKind) -> &Attribute {
        &self.slots[kind as usize]
    }

    pub fn get_mut(&mut self, kind: AttributeKind) -> &mut Attribute {
        &mut self.slots[kind as usize]
    }

    pub fn value(&self, kind: AttributeKind) -> f32 {
        self.get(kind).value()
    }

    pub fn set_base(&mut self, kind: AttributeKind, base: f32) -> Result<()> {
        self.get_mut(kind).set_base(base)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AttributeKind, &Attribute)> + '_ {
        AttributeKind::iter().zip(self.slots.iter())
    }

    /// Advances every attribute's stacks once.
    pub fn update(&mut self, dt: f32) -> usize {
        self.slots.iter_mut().map(|a| a.update(dt)).sum()
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn offsets_apply_before_multipliers() {
        let mut speed = Attribute::new(4.0, AttributeBounds::NON_NEGATIVE).unwrap();
        speed.add_offset(1.0, TokenDuration::Infinite);
        speed.add_multiplier(2.0, TokenDuration::Infinite);
        assert!(close(speed.value(), 10.0));
    }

    #[test]
    fn timed_modifier_expires() {
        let mut speed = Attribute::new(5.0, AttributeBounds::NON_NEGATIVE).unwrap();
        speed.add_multiplier(2.0, TokenDuration::Timed(3.0));
        assert!(close(speed.value(), 10.0));

        assert_eq!(speed.update(3.0), 1);
        assert!(close(speed.value(), 5.0));
    }

    #[test]
    fn value_is_clamped() {
        let mut damage = Attribute::new(1.0, AttributeBounds::new(0.5, 3.0).unwrap()).unwrap();
        damage.add_multiplier(10.0, TokenDuration::Infinite);
        assert!(close(damage.value(), 3.0));

        let slow = damage.add_multiplier(0.0, TokenDuration::Infinite);
        assert!(close(damage.value(), 0.5));
        assert!(damage.remove(slow));
        assert!(!damage.remove(slow));
    }

    #[test]
    fn rejects_invalid_construction() {
        assert_eq!(
            AttributeBounds::new(2.0, 1.0),
            Err(ModifierError::InvalidBounds { min: 2.0, max: 1.0 })
        );
        assert!(Attribute::new(f32::NAN, AttributeBounds::UNCLAMPED).is_err());
        assert!(Attribute::new(1.0, AttributeBounds { min: 3.0, max: 1.0 }).is_err());
    }

    #[test]
    fn attributes_start_at_defaults() {
        let attributes = Attributes::new();
        for (kind, attribute) in attributes.iter() {
            assert_eq!(attribute.value(), kind.default_base());
        }
    }

    #[test]
    fn attributes_update_every_stack() {
        let mut attributes = Attributes::new();
        attributes
            .get_mut(AttributeKind::MoveSpeed)
            .add_multiplier(1.5, TokenDuration::Timed(1.0));
        attributes
            .get_mut(AttributeKind::JumpHeight)
            .add_offset(-1.0, TokenDuration::Timed(2.0));

        assert_eq!(attributes.update(1.0), 1);
        assert_eq!(attributes.update(1.0), 1);
        assert_eq!(attributes.value(AttributeKind::MoveSpeed), 5.0);
        assert_eq!(attributes.value(AttributeKind::JumpHeight), 1.5);
    }
}
