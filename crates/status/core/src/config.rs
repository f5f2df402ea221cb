//! Ledger policies and capacity limits.

use strum::EnumCount;

use crate::effect::EffectCode;

/// How repeated tick batches of one effect combine in the stat sink.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TickPolicy {
    /// Every tick pushes another batch; all batches are popped on removal.
    /// Damage-over-time effects deepen the longer they run.
    #[default]
    Stack,

    /// Each tick pops the previous batch before pushing a new one, so at
    /// most one batch is live per effect.
    Refresh,
}

/// How `next_tick_at` advances after a tick fires.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TickCadence {
    /// Ticks land on `applied_at + k × interval`. A late step fires once for
    /// every boundary it passed, so the tick count does not depend on the
    /// host's step size.
    #[default]
    Fixed,

    /// At most one tick per step; the next tick is scheduled one interval
    /// after the step that fired it, so schedules drift with the step size.
    Drift,
}

/// Ledger configuration constants and tunable parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LedgerConfig {
    pub tick_policy: TickPolicy,
    pub tick_cadence: TickCadence,
}

impl LedgerConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of simultaneously active effects on one subject.
    /// One slot per effect code, since codes never stack.
    pub const MAX_ACTIVE_EFFECTS: usize = EffectCode::COUNT;

    /// Maximum tick batches one effect fires in a single `tick` call.
    /// Boundaries past the cap are skipped, not deferred.
    pub const MAX_TICK_BATCHES_PER_CALL: u32 = 1024;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tick_policy(mut self, tick_policy: TickPolicy) -> Self {
        self.tick_policy = tick_policy;
        self
    }

    pub fn with_tick_cadence(mut self, tick_cadence: TickCadence) -> Self {
        self.tick_cadence = tick_cadence;
        self
    }
}
