//! Error types for the playerset registry

use crate::types::PlayerId;
use thiserror::Error;

/// Errors returned by registry queries and mutations.
///
/// Every failing operation leaves the registry untouched: validation
/// completes before either index is mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no player with id {0}")]
    IdNotFound(PlayerId),

    #[error("no player with login '{0}'")]
    LoginNotFound(String),

    #[error("player id {0} is already registered")]
    DuplicateId(PlayerId),

    #[error("login '{0}' is already registered")]
    DuplicateLogin(String),

    #[error("player {0} has an empty login")]
    EmptyLogin(PlayerId),
}
