//! Error types for the effect ledger and its stat sinks.
//!
//! - **Validation**: the caller handed over something ill-formed (bad
//!   definition, clock reading out of order). Nothing was mutated.
//! - **Collaborator**: a stat sink refused a push or pop. Ledger state was
//!   still updated; the sink may now disagree with the ledger.
//! - **Internal**: the ledger's own bookkeeping is inconsistent.

use crate::effect::EffectCode;
use crate::stats::{StatKind, StatModifier};
use crate::time::Seconds;

/// Severity level of an error, used to pick a recovery strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input; retrying without changes will fail again.
    Validation,

    /// A collaborator (stat sink) failed; ledger state moved on regardless.
    Collaborator,

    /// Bookkeeping invariant broken. Indicates a bug in this crate.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Collaborator => "collaborator",
            Self::Internal => "internal",
        }
    }
}

/// Common classification for errors raised by this crate.
pub trait LedgerError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier for the variant, for metrics and assertions.
    fn error_code(&self) -> &'static str;
}

/// Failures reported by a [`StatSink`](crate::stats::StatSink).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("stat {stat} is not tracked by this sink")]
    UnknownStat { stat: StatKind },

    #[error("modifier {modifier} was never pushed")]
    ModifierNotFound { modifier: StatModifier },

    #[error("{sink} sink does not accept {stat} modifiers")]
    Rejected { sink: &'static str, stat: StatKind },
}

impl LedgerError for SinkError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Collaborator
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStat { .. } => "SINK_UNKNOWN_STAT",
            Self::ModifierNotFound { .. } => "SINK_MODIFIER_NOT_FOUND",
            Self::Rejected { .. } => "SINK_REJECTED",
        }
    }
}

/// Errors surfaced by [`EffectLedger`](crate::ledger::EffectLedger) operations.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EffectError {
    #[error("invalid definition for {code}: {reason}")]
    InvalidDefinition { code: EffectCode, reason: &'static str },

    #[error("active set is full ({capacity} slots) while activating {code}")]
    CapacityExceeded { code: EffectCode, capacity: usize },

    #[error("clock reading {now} is earlier than the latest reading {previous}")]
    ClockRegressed { now: Seconds, previous: Seconds },

    #[error("clock reading {now} is not a finite number")]
    InvalidClockReading { now: Seconds },

    #[error("stat sink failed while processing {code}: {source}")]
    Sink {
        code: EffectCode,
        #[source]
        source: SinkError,
    },
}

impl LedgerError for EffectError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidDefinition { .. }
            | Self::ClockRegressed { .. }
            | Self::InvalidClockReading { .. } => ErrorSeverity::Validation,
            Self::Sink { .. } => ErrorSeverity::Collaborator,
            Self::CapacityExceeded { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDefinition { .. } => "EFFECT_INVALID_DEFINITION",
            Self::CapacityExceeded { .. } => "EFFECT_CAPACITY_EXCEEDED",
            Self::ClockRegressed { .. } => "EFFECT_CLOCK_REGRESSED",
            Self::InvalidClockReading { .. } => "EFFECT_INVALID_CLOCK_READING",
            Self::Sink { .. } => "EFFECT_SINK_FAILURE",
        }
    }
}
