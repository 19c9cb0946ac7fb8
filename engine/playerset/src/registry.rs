use std::collections::HashMap;

use crossbeam::channel::Receiver;
use tracing::debug;

use crate::error::RegistryError;
use crate::events::{EventBus, PlayerEvent, SubscriptionId};
use crate::types::{Player, PlayerId, PlayerKey};

/// Registry of players currently online, indexed by id and by login.
///
/// Both indices always cover the same membership: a player admitted via
/// [`insert`](Playerset::insert) is reachable under its id and its login
/// until it is removed or the set is cleared. Conflicting inserts are
/// rejected outright; there is no overwrite path. Every admission and
/// removal is announced on the embedded event bus after both indices have
/// been updated.
pub struct Playerset {
    /// id -> player map, the owning index.
    by_id: HashMap<PlayerId, Player>,

    /// login -> id map (the record itself lives in `by_id`).
    by_login: HashMap<String, PlayerId>,

    /// Fanout for membership change events.
    events: EventBus,
}

impl Playerset {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { by_id: HashMap::new(), by_login: HashMap::new(), events: EventBus::new() }
    }

    /// Look up a player by id.
    pub fn get_by_id(&self, id: PlayerId) -> Result<&Player, RegistryError> {
        self.by_id.get(&id).ok_or(RegistryError::IdNotFound(id))
    }

    /// Look up a player by login.
    pub fn get_by_login(&self, login: &str) -> Result<&Player, RegistryError> {
        let id = self
            .by_login
            .get(login)
            .ok_or_else(|| RegistryError::LoginNotFound(login.to_string()))?;
        self.get_by_id(*id)
    }

    /// Look up a player under either index.
    pub fn get<'a, K: Into<PlayerKey<'a>>>(&self, key: K) -> Result<&Player, RegistryError> {
        match key.into() {
            PlayerKey::Id(id) => self.get_by_id(id),
            PlayerKey::Login(login) => self.get_by_login(login),
        }
    }

    /// Id of the player holding this login, or `None` if nobody does.
    ///
    /// Lookup convenience for callers that want a fallback default rather
    /// than failure handling; contrast [`get_by_login`](Playerset::get_by_login).
    pub fn id_for_login(&self, login: &str) -> Option<PlayerId> {
        self.by_login.get(login).copied()
    }

    /// Admit a player to the registry.
    ///
    /// The login must be non-empty, and neither key may belong to a current
    /// member. Validation completes before either index is touched, so a
    /// rejected insert leaves the registry exactly as it was. On success
    /// both indices are updated and an [`Added`](PlayerEvent::Added) event
    /// is published.
    pub fn insert(&mut self, player: Player) -> Result<(), RegistryError> {
        if player.login.is_empty() {
            return Err(RegistryError::EmptyLogin(player.id));
        }
        if self.by_id.contains_key(&player.id) {
            return Err(RegistryError::DuplicateId(player.id));
        }
        if self.by_login.contains_key(&player.login) {
            return Err(RegistryError::DuplicateLogin(player.login));
        }

        debug!("player {} ('{}') joined", player.id, player.login);
        self.by_login.insert(player.login.clone(), player.id);
        self.by_id.insert(player.id, player.clone());
        self.events.publish(&PlayerEvent::Added(player));
        Ok(())
    }

    /// Remove the player with this id.
    ///
    /// A miss is a quiet no-op returning `None`; callers racing with other
    /// removal paths need no existence check. On a hit both indices are
    /// updated, a [`Removed`](PlayerEvent::Removed) event is published, and
    /// the record is handed back.
    pub fn remove_by_id(&mut self, id: PlayerId) -> Option<Player> {
        let player = self.by_id.remove(&id)?;
        self.by_login.remove(&player.login);
        debug!("player {} ('{}') left", player.id, player.login);
        self.events.publish(&PlayerEvent::Removed(player.clone()));
        Some(player)
    }

    /// Remove the player with this login. Same contract as
    /// [`remove_by_id`](Playerset::remove_by_id).
    pub fn remove_by_login(&mut self, login: &str) -> Option<Player> {
        let id = self.by_login.get(login).copied()?;
        self.remove_by_id(id)
    }

    /// Remove every member, publishing one `Removed` event per player —
    /// the same observable trace as removing them one at a time.
    pub fn clear(&mut self) {
        let ids: Vec<PlayerId> = self.by_id.keys().copied().collect();
        for id in ids {
            self.remove_by_id(id);
        }
    }

    /// Number of players currently online.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the registry has no members.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Whether a member exists under this key, in the matching index.
    pub fn contains<'a, K: Into<PlayerKey<'a>>>(&self, key: K) -> bool {
        match key.into() {
            PlayerKey::Id(id) => self.by_id.contains_key(&id),
            PlayerKey::Login(login) => self.by_login.contains_key(login),
        }
    }

    /// Iterate over current members. Order is unspecified; the shared
    /// borrow keeps the registry immutable for the iterator's lifetime.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.by_id.values()
    }

    /// Iterate over the ids of current members. Order is unspecified.
    pub fn ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.by_id.keys().copied()
    }

    /// Register a subscriber for membership change events.
    pub fn subscribe(&mut self) -> (SubscriptionId, Receiver<PlayerEvent>) {
        self.events.subscribe()
    }

    /// Drop a subscription. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.events.unsubscribe(id);
    }
}

impl Default for Playerset {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rating;

    fn create_test_players() -> Vec<Player> {
        vec![
            Player {
                id: 1,
                login: "alice".to_string(),
                clan: Some("AEON".to_string()),
                country: Some("DE".to_string()),
                avatar_url: None,
                rating: Some(Rating { mean: 1500.0, deviation: 120.0 }),
            },
            Player::new(2, "bob"),
            Player::new(3, "carol"),
        ]
    }

    fn populated() -> Playerset {
        let mut players = Playerset::new();
        for player in create_test_players() {
            players.insert(player).unwrap();
        }
        players
    }

    #[test]
    fn insert_makes_player_reachable_under_both_keys() {
        let players = populated();

        assert_eq!(players.len(), 3);
        assert_eq!(players.get_by_id(1).unwrap().login, "alice");
        assert_eq!(players.get_by_login("alice").unwrap().id, 1);
        assert_eq!(players.get(1u64).unwrap().login, "alice");
        assert_eq!(players.get("bob").unwrap().id, 2);
    }

    #[test]
    fn duplicate_id_is_rejected_and_member_is_unchanged() {
        let mut players = populated();

        let err = players.insert(Player::new(1, "impostor")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(1));
        assert_eq!(players.len(), 3);
        assert_eq!(players.get_by_id(1).unwrap().login, "alice");
        assert!(!players.contains("impostor"));
    }

    #[test]
    fn duplicate_login_is_rejected_even_with_fresh_id() {
        let mut players = populated();

        let err = players.insert(Player::new(99, "alice")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateLogin("alice".to_string()));
        assert_eq!(players.len(), 3);
        assert!(!players.contains(99u64));
    }

    #[test]
    fn empty_login_is_rejected() {
        let mut players = Playerset::new();

        let err = players.insert(Player::new(5, "")).unwrap_err();
        assert_eq!(err, RegistryError::EmptyLogin(5));
        assert!(players.is_empty());
    }

    #[test]
    fn removal_of_absent_player_is_a_quiet_no_op() {
        let mut players = populated();
        let (_sub, events) = players.subscribe();

        assert!(players.remove_by_id(99).is_none());
        assert!(players.remove_by_login("nobody").is_none());
        assert_eq!(players.len(), 3);
        assert_eq!(events.try_iter().count(), 0);
    }

    #[test]
    fn removal_updates_both_indices() {
        let mut players = populated();

        let bob = players.remove_by_login("bob").unwrap();
        assert_eq!(bob.id, 2);
        assert_eq!(players.len(), 2);
        assert_eq!(players.get_by_id(2).unwrap_err(), RegistryError::IdNotFound(2));
        assert_eq!(
            players.get_by_login("bob").unwrap_err(),
            RegistryError::LoginNotFound("bob".to_string())
        );
    }

    #[test]
    fn id_for_login_defaults_instead_of_failing() {
        let players = populated();

        assert_eq!(players.id_for_login("carol"), Some(3));
        assert_eq!(players.id_for_login("dave"), None);
    }

    #[test]
    fn clear_empties_both_indices_and_fires_one_event_per_member() {
        let mut players = populated();
        let (_sub, events) = players.subscribe();

        players.clear();

        assert!(players.is_empty());
        assert!(players.get_by_id(1).is_err());
        assert!(players.get_by_login("alice").is_err());

        let mut removed: Vec<_> = events
            .try_iter()
            .map(|event| match event {
                PlayerEvent::Removed(player) => player.id,
                PlayerEvent::Added(player) => panic!("unexpected add of {}", player.id),
            })
            .collect();
        removed.sort_unstable();
        assert_eq!(removed, vec![1, 2, 3]);
    }

    #[test]
    fn events_arrive_in_operation_order() {
        let mut players = Playerset::new();
        let (_sub, events) = players.subscribe();

        players.insert(Player::new(1, "alice")).unwrap();
        players.insert(Player::new(2, "bob")).unwrap();
        players.remove_by_id(1);

        let trace: Vec<_> = events.try_iter().collect();
        assert_eq!(
            trace,
            vec![
                PlayerEvent::Added(Player::new(1, "alice")),
                PlayerEvent::Added(Player::new(2, "bob")),
                PlayerEvent::Removed(Player::new(1, "alice")),
            ]
        );
    }

    #[test]
    fn rejected_insert_publishes_no_event() {
        let mut players = populated();
        let (_sub, events) = players.subscribe();

        players.insert(Player::new(1, "impostor")).unwrap_err();
        players.insert(Player::new(99, "alice")).unwrap_err();

        assert_eq!(events.try_iter().count(), 0);
    }

    #[test]
    fn unsubscribed_handles_receive_nothing_further() {
        let mut players = Playerset::new();
        let (sub, events) = players.subscribe();

        players.insert(Player::new(1, "alice")).unwrap();
        players.unsubscribe(sub);
        players.insert(Player::new(2, "bob")).unwrap();

        let trace: Vec<_> = events.try_iter().collect();
        assert_eq!(trace, vec![PlayerEvent::Added(Player::new(1, "alice"))]);
    }

    #[test]
    fn iteration_covers_the_membership() {
        let players = populated();

        let mut ids: Vec<_> = players.ids().collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(players.iter().count(), players.len());
    }
}
