//! Lobby service entry point.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use lobby_service::{initialize_logging, load_configuration, service};

/// Feed a player roster into the lobby's playerset and report membership.
#[derive(Debug, Parser)]
#[command(name = "lobby-service", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the roster path from the configuration
    #[arg(long)]
    roster: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        load_configuration(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(roster) = args.roster {
        config.roster.path = roster;
    }

    initialize_logging(&config.logging)?;
    info!("Starting Lobby Service v{}", env!("CARGO_PKG_VERSION"));

    let report = service::run(&config)?;
    info!(
        "Roster ingestion complete: {} admitted, {} rejected, {} online",
        report.admitted, report.rejected, report.online
    );

    Ok(())
}
