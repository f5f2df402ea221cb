//! Effect catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use status_core::StatusEffectDefinition;

use crate::loaders::{LoadResult, read_file};
use crate::registry::EffectRegistry;

/// Effect catalog structure for RON files.
///
/// ```ron
/// (
///     effects: [
///         (
///             code: Burn,
///             duration: 5.0,
///             tick_interval: Some(1.0),
///             entry_modifiers: [(stat: Armor, bonus: Flat(-2))],
///             tick_modifiers: [(stat: Health, bonus: Flat(-1))],
///         ),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectCatalog {
    pub effects: Vec<StatusEffectDefinition>,
}

/// Loader for effect catalogs from RON files.
pub struct EffectLoader;

impl EffectLoader {
    /// Load and validate an effect catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<EffectRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid effect catalog {}: {:#}", path.display(), e))
    }

    /// Parse and validate an effect catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<EffectRegistry> {
        let catalog: EffectCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse effect catalog RON: {}", e))?;

        EffectRegistry::from_definitions(catalog.effects)
    }
}
