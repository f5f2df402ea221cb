//! Data-driven status effect content.
//!
//! This crate turns authored data files into values the ledger consumes:
//! - Effect catalogs (data-driven via RON) → [`EffectRegistry`]
//! - Ledger configuration (data-driven via TOML) → `LedgerConfig`
//!
//! Definitions are validated once at load time, so a registry only ever
//! hands out definitions the ledger accepts.

pub mod registry;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use registry::EffectRegistry;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, EffectCatalog, EffectLoader};
