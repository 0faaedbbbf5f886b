//! Token lifetimes.

/// How long a token lives before expiring on its own.
///
/// Authored data writes a plain number of seconds; any negative value (the
/// conventional `-1`) means the token never expires and must be removed by
/// whoever added it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "f32", into = "f32")
)]
pub enum TokenDuration {
    /// Expires after this many seconds of updates.
    Timed(f32),
    /// Lives until explicitly removed.
    Infinite,
}

impl TokenDuration {
    /// Raw value authored for [`TokenDuration::Infinite`].
    pub const INFINITE_SENTINEL: f32 = -1.0;

    /// Interprets raw seconds, mapping negative and infinite values to
    /// [`TokenDuration::Infinite`].
    ///
    /// NaN also maps to `Infinite` so a bad value never silently drops a
    /// modifier; it is logged as a warning.
    pub fn from_secs(secs: f32) -> Self {
        if secs.is_nan() {
            tracing::warn!("token duration is NaN, treating it as infinite");
            return Self::Infinite;
        }
        if secs < 0.0 || secs.is_infinite() {
            Self::Infinite
        } else {
            Self::Timed(secs)
        }
    }

    pub fn is_infinite(self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Seconds, or the `-1` sentinel for infinite.
    pub fn as_secs(self) -> f32 {
        match self {
            Self::Timed(secs) => secs,
            Self::Infinite => Self::INFINITE_SENTINEL,
        }
    }

    /// Re-applies [`TokenDuration::from_secs`] to a hand-built `Timed` value.
    pub(crate) fn normalized(self) -> Self {
        match self {
            Self::Timed(secs) => Self::from_secs(secs),
            Self::Infinite => Self::Infinite,
        }
    }
}

impl From<f32> for TokenDuration {
    fn from(secs: f32) -> Self {
        Self::from_secs(secs)
    }
}

impl From<TokenDuration> for f32 {
    fn from(duration: TokenDuration) -> Self {
        duration.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_maps_to_infinite() {
        assert_eq!(TokenDuration::from_secs(-1.0), TokenDuration::Infinite);
        assert_eq!(TokenDuration::from_secs(-0.5), TokenDuration::Infinite);
        assert_eq!(TokenDuration::from_secs(f32::INFINITY), TokenDuration::Infinite);
        assert_eq!(TokenDuration::from_secs(f32::NAN), TokenDuration::Infinite);
    }

    #[test]
    fn non_negative_is_timed() {
        assert_eq!(TokenDuration::from_secs(0.0), TokenDuration::Timed(0.0));
        assert_eq!(TokenDuration::from_secs(3.0), TokenDuration::Timed(3.0));
        assert_eq!(TokenDuration::Timed(3.0).as_secs(), 3.0);
        assert_eq!(TokenDuration::Infinite.as_secs(), -1.0);
    }

    #[test]
    fn normalizes_hand_built_negative() {
        assert_eq!(
            TokenDuration::Timed(-4.0).normalized(),
            TokenDuration::Infinite
        );
    }
}
