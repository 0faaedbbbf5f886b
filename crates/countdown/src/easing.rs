//! Output curves for timer percentages.

/// Curve applied to a timer's completion percentage.
///
/// UI code reads [`CountdownTimer::output_value`](crate::CountdownTimer::output_value)
/// rather than the raw percentage so a designer can pick how a bar fills or
/// a flash fades without touching the timer itself.
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
pub enum Easing {
    /// Output equals the percentage.
    #[default]
    Linear,
    /// Slow start: `t²`.
    QuadIn,
    /// Slow finish: `1 - (1 - t)²`.
    QuadOut,
    /// Slow start and finish.
    QuadInOut,
    /// Hermite smoothstep: `t²(3 - 2t)`.
    SmoothStep,
    /// Counts down instead of up: `1 - t`.
    Reverse,
}

impl Easing {
    /// Maps `t` (clamped to `[0, 1]`, NaN treated as 0) through the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::Reverse => 1.0 - t,
        }
    }
}
