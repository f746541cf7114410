//! Room-scoped publish/subscribe for circle chat.
//!
//! Delivery contract: at-most-once. A message reaches only the subscribers
//! connected at the moment it is emitted; messages emitted to an empty room are
//! dropped, a subscriber that falls more than `capacity` messages behind skips
//! the overflow, and nothing is replayed after a reconnect. Ordering holds per
//! room for a single connected subscriber and not across reconnects.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, warn};
use uuid::Uuid;

pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleMessage {
    pub id: Uuid,
    pub room_id: String,
    pub sender_id: String,
    pub sender_name: String,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl CircleMessage {
    pub fn new(room_id: &str, sender_id: &str, sender_name: &str, text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id: room_id.to_string(),
            sender_id: sender_id.to_string(),
            sender_name: sender_name.to_string(),
            text: text.to_string(),
            sent_at: Utc::now(),
        }
    }
}

pub struct RoomHub {
    rooms: RwLock<HashMap<String, broadcast::Sender<CircleMessage>>>,
    capacity: usize,
}

impl RoomHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Subscribes to a room, creating it on first join.
    pub async fn join(&self, room_id: &str) -> RoomSubscription {
        let mut rooms = self.rooms.write().await;
        let sender = rooms
            .entry(room_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        debug!("Joined room {room_id} ({} members)", sender.receiver_count() + 1);
        RoomSubscription {
            room_id: room_id.to_string(),
            receiver: sender.subscribe(),
        }
    }

    /// Publishes to everyone currently in the room. Returns how many subscribers
    /// the message was handed to; 0 means it was dropped.
    pub async fn emit(&self, message: CircleMessage) -> usize {
        let rooms = self.rooms.read().await;
        match rooms.get(&message.room_id) {
            Some(sender) => sender.send(message).unwrap_or(0),
            None => 0,
        }
    }

    pub async fn member_count(&self, room_id: &str) -> usize {
        self.rooms
            .read()
            .await
            .get(room_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }

    /// Drops the subscription and removes the room once nobody is left in it.
    pub async fn leave(&self, subscription: RoomSubscription) {
        let room_id = subscription.room_id.clone();
        drop(subscription);
        let mut rooms = self.rooms.write().await;
        if rooms
            .get(&room_id)
            .is_some_and(|s| s.receiver_count() == 0)
        {
            rooms.remove(&room_id);
            debug!("Closed empty room {room_id}");
        }
    }
}

pub struct RoomSubscription {
    room_id: String,
    receiver: broadcast::Receiver<CircleMessage>,
}

impl RoomSubscription {
    /// Waits for the next message. Skipped (lagged) messages are logged and lost.
    /// Returns `None` once the room is gone.
    pub async fn recv(&mut self) -> Option<CircleMessage> {
        loop {
            match self.receiver.recv().await {
                Ok(message) => return Some(message),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(room = %self.room_id, skipped, "Circle subscriber lagged, messages dropped");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
