//! Roster ingestion
//!
//! Stand-in for the session layer: constructs player records from an
//! externally supplied JSON roster, feeds them into the playerset, and
//! reacts to the membership events the registry publishes.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use playerset::{Player, PlayerEvent, Playerset};

use crate::config::ServiceConfig;

/// On-disk roster: the players the session layer announces at login.
#[derive(Debug, Deserialize)]
pub struct RosterFile {
    pub players: Vec<Player>,
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReport {
    /// Players admitted to the registry
    pub admitted: usize,

    /// Records the registry rejected (duplicate id or login, empty login)
    pub rejected: usize,

    /// Final member count
    pub online: usize,
}

/// Read and parse a roster file.
pub fn load_roster(path: &Path) -> Result<RosterFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read roster {}", path.display()))?;
    let roster: RosterFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse roster {}", path.display()))?;
    Ok(roster)
}

/// Feed every roster record into the playerset and log the membership
/// events it publishes.
pub fn run(config: &ServiceConfig) -> Result<ServiceReport> {
    let roster = load_roster(&config.roster.path)?;
    info!("Loaded {} roster records from {}", roster.players.len(), config.roster.path.display());

    let mut players = Playerset::new();
    let (_subscription, events) = players.subscribe();

    let mut admitted = 0;
    let mut rejected = 0;
    for record in roster.players {
        match players.insert(record) {
            Ok(()) => admitted += 1,
            Err(err) => {
                warn!("Rejected roster record: {err}");
                rejected += 1;
            }
        }
    }

    // React to the notifications the inserts produced, the way a player
    // list panel would.
    for event in events.try_iter() {
        match event {
            PlayerEvent::Added(player) => info!("{} joined the lobby", player.login),
            PlayerEvent::Removed(player) => info!("{} left the lobby", player.login),
        }
    }

    let report = ServiceReport { admitted, rejected, online: players.len() };
    info!("{} players online ({} records rejected)", report.online, report.rejected);
    Ok(report)
}
