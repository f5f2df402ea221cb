//! Status effect bookkeeping for one subject.
//!
//! `status-core` owns the lifecycle of timed status effects (activation,
//! periodic ticks, expiry) and translates each lifecycle point into stat
//! modifier pushes and pops. The host supplies the stat container
//! ([`StatSink`]) and the time source ([`Clock`]) at construction and drives
//! the ledger by calling [`EffectLedger::tick`] once per step.
//!
//! - [`effect`]: effect codes, shared definitions, live instances
//! - [`ledger`]: the [`EffectLedger`] and the outcomes it reports
//! - [`stats`]: stat identifiers, modifiers, and the bundled sinks
//! - [`time`]: [`Seconds`] and the clock abstraction
pub mod config;
pub mod effect;
pub mod error;
pub mod ledger;
pub mod stats;
pub mod time;

pub use config::{LedgerConfig, TickCadence, TickPolicy};
pub use effect::{EffectCode, StatusEffectDefinition, StatusEffectInstance};
pub use error::{EffectError, ErrorSeverity, LedgerError, SinkError};
pub use ledger::{ApplyOutcome, EffectLedger, RemovalOutcome, RemovalReason, TickReport};
pub use stats::{
    Bonus, BonusStack, HealthPool, RecordingSink, SinkCall, StatKind, StatMask, StatModifier,
    StatRouter, StatSheet, StatSink, SubjectStats,
};
pub use time::{Clock, ManualClock, MonotonicClock, Seconds};
