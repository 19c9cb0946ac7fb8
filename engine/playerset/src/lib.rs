//! Playerset - the lobby's registry of online players
//!
//! Players announced by the session layer are indexed here both by id and
//! by login, and every membership change is published to subscribers
//! (player lists, session trackers) over the event bus.

pub mod error;
pub mod events;
pub mod registry;
pub mod types;

pub use error::RegistryError;
pub use events::{EventBus, PlayerEvent, SubscriptionId};
pub use registry::Playerset;
pub use types::{Player, PlayerId, PlayerKey, Rating};
