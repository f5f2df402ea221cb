//! Values returned by ledger operations.
//!
//! Hosts drive presentation (particles, tints, icons) from these instead of
//! the ledger reaching into the scene.

use crate::effect::EffectCode;
use crate::stats::StatMask;
use crate::time::Seconds;

/// Result of applying one definition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ApplyOutcome {
    /// The code was not active; entry and passive modifiers were pushed.
    Activated { expires_at: Seconds },

    /// The code was active and its expiry moved later.
    Extended {
        previous: Seconds,
        expires_at: Seconds,
    },

    /// The code was active and already outlasts the new application.
    Unchanged { expires_at: Seconds },
}

impl ApplyOutcome {
    pub fn expires_at(&self) -> Seconds {
        match *self {
            ApplyOutcome::Activated { expires_at }
            | ApplyOutcome::Extended { expires_at, .. }
            | ApplyOutcome::Unchanged { expires_at } => expires_at,
        }
    }

    pub fn is_activation(&self) -> bool {
        matches!(self, ApplyOutcome::Activated { .. })
    }
}

/// Why an effect left the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum RemovalReason {
    Expired,
    Dispelled,
}

/// Record of one effect leaving the ledger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemovalOutcome {
    pub code: EffectCode,
    pub reason: RemovalReason,

    /// False for non-removable effects, whose modifiers stay in the sink.
    pub modifiers_revoked: bool,

    /// Tick batches popped as part of the removal.
    pub tick_batches_popped: u32,
}

/// Everything one `tick` call did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub now: Seconds,

    /// Effects that fired tick batches, with the number of batches fired.
    pub ticked: Vec<(EffectCode, u32)>,

    pub expired: Vec<RemovalOutcome>,

    pub touched: StatMask,
}

impl TickReport {
    pub fn new(now: Seconds) -> Self {
        Self {
            now,
            ..Self::default()
        }
    }

    pub fn is_quiet(&self) -> bool {
        self.ticked.is_empty() && self.expired.is_empty()
    }

    pub fn batches_fired(&self, code: EffectCode) -> u32 {
        self.ticked
            .iter()
            .filter(|(ticked, _)| *ticked == code)
            .map(|(_, count)| count)
            .sum()
    }

    pub fn did_expire(&self, code: EffectCode) -> bool {
        self.expired.iter().any(|removal| removal.code == code)
    }
}
