use serde::{Deserialize, Serialize};

/// Stable numeric identifier for a player, assigned by the server.
pub type PlayerId = u64;

/// Rating as the lobby displays it: a mean and a deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mean: f64,
    pub deviation: f64,
}

/// A player known to the lobby.
///
/// `id` and `login` are the registry's two lookup keys; everything else is
/// display payload the registry stores but never inspects. Neither key may
/// change while the player is registered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Server-assigned identifier, stable for the lifetime of the account.
    pub id: PlayerId,

    /// Login name, unique among online players (case-sensitive).
    pub login: String,

    /// Clan tag, if the player is in one.
    #[serde(default)]
    pub clan: Option<String>,

    /// ISO country code used for the flag icon.
    #[serde(default)]
    pub country: Option<String>,

    /// URL of the player's avatar image.
    #[serde(default)]
    pub avatar_url: Option<String>,

    /// Global rating, if the server sent one.
    #[serde(default)]
    pub rating: Option<Rating>,
}

impl Player {
    /// Create a player with both keys set and no display payload.
    pub fn new(id: PlayerId, login: impl Into<String>) -> Self {
        Self { id, login: login.into(), clan: None, country: None, avatar_url: None, rating: None }
    }
}

/// A lookup key for the registry: either index may be queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKey<'a> {
    /// Primary key: the server-assigned id.
    Id(PlayerId),
    /// Secondary key: the login name.
    Login(&'a str),
}

impl From<PlayerId> for PlayerKey<'static> {
    fn from(id: PlayerId) -> Self {
        PlayerKey::Id(id)
    }
}

impl<'a> From<&'a str> for PlayerKey<'a> {
    fn from(login: &'a str) -> Self {
        PlayerKey::Login(login)
    }
}
