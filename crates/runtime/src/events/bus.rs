//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use game_core::{GameMessage, Topic};
use tokio::sync::broadcast;

use crate::api::Broadcaster;

#[derive(Debug)]
struct Channels {
    lifecycle: broadcast::Sender<GameMessage>,
    movement: broadcast::Sender<GameMessage>,
    combat: broadcast::Sender<GameMessage>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<GameMessage> {
        match topic {
            Topic::Lifecycle => &self.lifecycle,
            Topic::Movement => &self.movement,
            Topic::Combat => &self.combat,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// messages they care about. Acts as the [`Broadcaster`] handed to monsters.
#[derive(Debug, Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                lifecycle: broadcast::channel(capacity).0,
                movement: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish a message to its corresponding topic
    pub fn publish(&self, message: GameMessage) {
        let topic = message.topic();
        if self.channels.sender(topic).send(message).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "runtime::events", %topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive messages for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameMessage> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<GameMessage>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live receivers on `topic`.
    pub fn receiver_count(&self, topic: Topic) -> usize {
        self.channels.sender(topic).receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Broadcaster for EventBus {
    fn broadcast(&self, message: GameMessage) {
        self.publish(message);
    }
}

#[cfg(test)]
mod tests {
    use game_core::{MonsterId, Point};

    use super::*;

    #[test]
    fn routes_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut combat = bus.subscribe(Topic::Combat);
        let mut movement = bus.subscribe(Topic::Movement);

        bus.broadcast(GameMessage::MoveMonster {
            monster_id: MonsterId(1),
            position: Point::new(1.0, 2.0),
        });

        assert!(combat.try_recv().is_err());
        assert_eq!(
            movement.try_recv().ok(),
            Some(GameMessage::MoveMonster {
                monster_id: MonsterId(1),
                position: Point::new(1.0, 2.0),
            })
        );
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::new();
        bus.publish(GameMessage::MonsterDespawned {
            monster_id: MonsterId(9),
        });
        assert_eq!(bus.receiver_count(Topic::Lifecycle), 0);
    }

    #[test]
    fn subscribe_multiple_covers_each_topic() {
        let bus = EventBus::new();
        let mut receivers = bus.subscribe_multiple(&Topic::ALL);
        assert_eq!(receivers.len(), 3);

        bus.publish(GameMessage::MonsterDespawned {
            monster_id: MonsterId(4),
        });
        let lifecycle = receivers.get_mut(&Topic::Lifecycle).map(|rx| rx.try_recv().ok());
        assert_eq!(
            lifecycle,
            Some(Some(GameMessage::MonsterDespawned {
                monster_id: MonsterId(4),
            }))
        );
        assert!(receivers
            .get_mut(&Topic::Combat)
            .is_some_and(|rx| rx.try_recv().is_err()));
    }
}
