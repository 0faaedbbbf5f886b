/// Engine-wide constants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModifierConfig;

impl ModifierConfig {
    // ===== compile-time constants used as type parameters =====
    /// Upper bound on events a single power update can report.
    pub const MAX_POWER_EVENTS: usize = 4;

    // ===== tolerances =====
    /// Slack when comparing a charge percentage against a level threshold.
    pub const CHARGE_LEVEL_EPSILON: f32 = 1e-4;

    // ===== authored-data defaults =====
    /// Single level reached only by a full charge.
    pub const DEFAULT_CHARGE_LEVELS: [f32; 1] = [1.0];
}
