//! Status effect kinds, their shared definitions, and live instances.
//!
//! A [`StatusEffectDefinition`] is immutable and shared through `Arc`; the
//! ledger wraps each activation in a [`StatusEffectInstance`] that carries
//! the subject-specific deadlines.

mod code;
pub mod definition;
pub mod instance;

pub use code::EffectCode;
pub use definition::StatusEffectDefinition;
pub use instance::StatusEffectInstance;
