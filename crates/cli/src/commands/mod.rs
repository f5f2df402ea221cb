//! Subcommand implementations

mod list;
mod run;

pub use list::List;
pub use run::Run;

use std::path::Path;

use anyhow::Result;
use status_content::{ContentFactory, EffectLoader, EffectRegistry};

/// Loads the catalog at `path`, or the bundled catalog when none is given.
fn load_registry(path: Option<&Path>) -> Result<EffectRegistry> {
    match path {
        Some(path) => EffectLoader::load(path),
        None => ContentFactory::bundled().load_effects(),
    }
}
