//! Lobby Service
//!
//! Host process around the playerset: loads configuration, initializes
//! logging, plays the session collaborator by feeding roster records into
//! the registry, and reacts to the membership events it publishes.

pub mod config;
pub mod logging;
pub mod service;

pub use config::{load_configuration, LoggingConfig, RosterConfig, ServiceConfig};
pub use logging::initialize_logging;
pub use service::{load_roster, RosterFile, ServiceReport};
