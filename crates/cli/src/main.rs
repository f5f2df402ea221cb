//! Status effect simulator
//!
//! Drives one subject's effect ledger over a scripted timeline so catalog
//! authors can see when batches fire and what the stats settle on.
//! Run with: `status-sim run --apply burn@0 --until 6`

mod commands;
mod subject;

use anyhow::Result;
use clap::Parser;
use commands::{List, Run};

/// Status effect simulator
#[derive(Parser)]
#[command(name = "status-sim")]
#[command(about = "Simulate status effects against a stat sheet", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run a scripted timeline and print the final stats
    Run(Run),

    /// List the effects in a catalog
    List(List),
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for the final stat table
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run(cmd) => cmd.execute(),
        Command::List(cmd) => cmd.execute(),
    }
}
