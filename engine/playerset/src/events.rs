//! Membership change notifications
//!
//! The registry announces every admitted and removed player on an event
//! bus. Each subscriber receives events over its own unbounded channel, in
//! the order the operations happened; a subscriber that went away is
//! dropped from the fanout without disturbing the others.

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::types::Player;

/// A membership change in the playerset.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// The player was admitted to the registry.
    Added(Player),
    /// The player was removed from the registry.
    Removed(Player),
}

/// Handle identifying one subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered fanout of [`PlayerEvent`]s to any number of subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    /// Subscribers in registration order; delivery follows this order.
    subscribers: Vec<(SubscriptionId, Sender<PlayerEvent>)>,
    next_id: u64,
}

impl EventBus {
    /// Create a bus with no subscribers.
    pub fn new() -> Self {
        Self { subscribers: Vec::new(), next_id: 0 }
    }

    /// Register a subscriber and hand back its event stream.
    pub fn subscribe(&mut self) -> (SubscriptionId, Receiver<PlayerEvent>) {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        let (tx, rx) = unbounded();
        self.subscribers.push((id, tx));
        (id, rx)
    }

    /// Drop a subscription. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Deliver an event to every live subscriber in registration order.
    ///
    /// Sends never block (the channels are unbounded). Subscribers whose
    /// receiver has been dropped fail the send and are swept from the list
    /// once the pass is complete.
    pub fn publish(&mut self, event: &PlayerEvent) {
        let mut dropped = Vec::new();
        for (id, tx) in &self.subscribers {
            if tx.send(event.clone()).is_err() {
                dropped.push(*id);
            }
        }

        if !dropped.is_empty() {
            self.subscribers.retain(|(id, _)| !dropped.contains(id));
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
