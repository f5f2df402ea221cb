//! Content factory for loading everything from one data directory.

use std::path::{Path, PathBuf};

use status_core::LedgerConfig;

use crate::loaders::{ConfigLoader, EffectLoader, LoadResult};
use crate::registry::EffectRegistry;

/// Loads status effect content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── effects.ron
/// └── ledger.toml   (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The data directory bundled with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load the effect catalog from `effects.ron`.
    pub fn load_effects(&self) -> LoadResult<EffectRegistry> {
        EffectLoader::load(&self.data_dir.join("effects.ron"))
    }

    /// Load ledger configuration from `ledger.toml`, or defaults if absent.
    pub fn load_config(&self) -> LoadResult<LedgerConfig> {
        let path = self.data_dir.join("ledger.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            Ok(LedgerConfig::default())
        }
    }
}
