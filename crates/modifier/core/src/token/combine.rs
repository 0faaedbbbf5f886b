//! Combination functions folded over a token stack.
//!
//! A combination is an identity plus a binary step. The manager folds the
//! step over live tokens in insertion order, starting from the identity:
//!
//! ```text
//! Product: 1 × t₀ × t₁ × …      (speed multipliers)
//! Sum:     0 + t₀ + t₁ + …      (flat offsets, counters)
//! AnyTrue: false ∨ t₀ ∨ t₁ ∨ …  ("is any disable token live")
//! ```

/// Folds token values into an aggregate.
pub trait Combine<T> {
    /// Starting value of the fold.
    fn identity(&self) -> T;

    /// Folds one token value into the accumulator.
    fn combine(&self, acc: T, value: &T) -> T;
}

/// Multiplies values together (identity `1`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Product;

/// Adds values together (identity `0`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sum;

/// Boolean OR (identity `false`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnyTrue;

/// Boolean AND (identity `true`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllTrue;

/// Largest value (identity `-∞`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Highest;

/// Smallest value (identity `+∞`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Lowest;

macro_rules! float_combine {
    ($($t:ty),*) => {
        $(
            impl Combine<$t> for Product {
                fn identity(&self) -> $t {
                    1.0
                }

                fn combine(&self, acc: $t, value: &$t) -> $t {
                    acc * *value
                }
            }

            impl Combine<$t> for Sum {
                fn identity(&self) -> $t {
                    0.0
                }

                fn combine(&self, acc: $t, value: &$t) -> $t {
                    acc + *value
                }
            }
        )*
    };
}

macro_rules! int_combine {
    ($($t:ty),*) => {
        $(
            impl Combine<$t> for Product {
                fn identity(&self) -> $t {
                    1
                }

                fn combine(&self, acc: $t, value: &$t) -> $t {
                    acc.saturating_mul(*value)
                }
            }

            impl Combine<$t> for Sum {
                fn identity(&self) -> $t {
                    0
                }

                fn combine(&self, acc: $t, value: &$t) -> $t {
                    acc.saturating_add(*value)
                }
            }
        )*
    };
}

float_combine!(f32, f64);
int_combine!(i32, u32);

impl Combine<bool> for AnyTrue {
    fn identity(&self) -> bool {
        false
    }

    fn combine(&self, acc: bool, value: &bool) -> bool {
        acc || *value
    }
}

impl Combine<bool> for AllTrue {
    fn identity(&self) -> bool {
        true
    }

    fn combine(&self, acc: bool, value: &bool) -> bool {
        acc && *value
    }
}

impl Combine<f32> for Highest {
    fn identity(&self) -> f32 {
        f32::NEG_INFINITY
    }

    fn combine(&self, acc: f32, value: &f32) -> f32 {
        acc.max(*value)
    }
}

impl Combine<f32> for Lowest {
    fn identity(&self) -> f32 {
        f32::INFINITY
    }

    fn combine(&self, acc: f32, value: &f32) -> f32 {
        acc.min(*value)
    }
}

/// Custom fold from an initial value and a closure.
///
/// ```
/// # use modifier_core::{FoldWith, TokenManager};
/// // Strongest knockback regardless of direction.
/// let mut stack = TokenManager::new(FoldWith::new(0.0f32, |acc: f32, v: &f32| acc.max(v.abs())));
/// stack.add_token(-3.0, 2.0, false);
/// stack.add_token(1.5, -1.0, false);
/// assert_eq!(stack.value(), 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct FoldWith<T, F> {
    init: T,
    step: F,
}

impl<T, F> FoldWith<T, F> {
    pub fn new(init: T, step: F) -> Self {
        Self { init, step }
    }
}

impl<T, F> Combine<T> for FoldWith<T, F>
where
    T: Clone,
    F: Fn(T, &T) -> T,
{
    fn identity(&self) -> T {
        self.init.clone()
    }

    fn combine(&self, acc: T, value: &T) -> T {
        (self.step)(acc, value)
    }
}

/// Numeric combination named in authored data.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CombineKind {
    #[default]
    Product,
    Sum,
    Highest,
    Lowest,
}

impl Combine<f32> for CombineKind {
    fn identity(&self) -> f32 {
        match self {
            CombineKind::Product => <Product as Combine<f32>>::identity(&Product),
            CombineKind::Sum => <Sum as Combine<f32>>::identity(&Sum),
            CombineKind::Highest => Highest.identity(),
            CombineKind::Lowest => Lowest.identity(),
        }
    }

    fn combine(&self, acc: f32, value: &f32) -> f32 {
        match self {
            CombineKind::Product => Product.combine(acc, value),
            CombineKind::Sum => Sum.combine(acc, value),
            CombineKind::Highest => Highest.combine(acc, value),
            CombineKind::Lowest => Lowest.combine(acc, value),
        }
    }
}
