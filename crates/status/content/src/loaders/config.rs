//! Ledger configuration loader.

use std::path::Path;

use status_core::LedgerConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for ledger configuration from TOML files.
///
/// Missing keys fall back to `LedgerConfig::default()`:
///
/// ```toml
/// tick_policy = "refresh"   # or "stack"
/// tick_cadence = "fixed"    # or "drift"
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load(path: &Path) -> LoadResult<LedgerConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<LedgerConfig> {
        toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ledger config TOML: {}", e))
    }
}
