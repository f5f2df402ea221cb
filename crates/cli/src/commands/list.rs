//! List the effects in a catalog

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::load_registry;

/// List the effects in a catalog
#[derive(Parser, Debug)]
pub struct List {
    /// Effect catalog (RON). Defaults to the bundled catalog
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,
}

impl List {
    pub fn execute(self) -> Result<()> {
        let registry = load_registry(self.catalog.as_deref())?;

        println!(
            "{:<14} {:>9} {:>9} {:>6} {:>8} {:>5} {:>5}  removable",
            "code", "duration", "interval", "entry", "passive", "tick", "exit"
        );
        for definition in registry.iter() {
            let code: &str = definition.code.as_ref();
            let interval = match definition.tick_period() {
                Some(period) => period.to_string(),
                None => "-".to_string(),
            };
            println!(
                "{:<14} {:>9} {:>9} {:>6} {:>8} {:>5} {:>5}  {}",
                code,
                definition.duration.to_string(),
                interval,
                definition.entry_modifiers.len(),
                definition.passive_modifiers.len(),
                definition.tick_modifiers.len(),
                definition.exit_modifiers.len(),
                if definition.removable { "yes" } else { "no" },
            );
        }

        tracing::info!(effects = registry.len(), "catalog listed");
        Ok(())
    }
}
