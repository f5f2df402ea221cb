//! Stat identifiers, modifiers, and the sinks that receive them.
//!
//! ```text
//! EffectLedger ──push/pop──▶ StatSink
//!                              │
//!                   StatRouter ├── Health ──▶ HealthPool
//!                              └── others ──▶ StatSheet
//! ```
//!
//! Every sink evaluates its stats with the same bonus stack:
//! `Flat → %Inc → More → Less → Clamp`

pub mod bonus;
pub mod health;
pub mod kind;
pub mod modifier;
pub mod sheet;
pub mod sink;

pub use bonus::{Bonus, BonusStack, StatBounds};
pub use health::HealthPool;
pub use kind::{StatKind, StatMask};
pub use modifier::StatModifier;
pub use sheet::{ModifiableStat, StatSheet};
pub use sink::{RecordingSink, SinkCall, StatRouter, StatSink, SubjectStats};
