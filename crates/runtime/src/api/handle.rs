//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! spawning and damaging monsters, plus direct access to the shared player
//! registry and the event topics.
use std::collections::HashMap;
use std::sync::Arc;

use game_core::{MonsterId, MonsterState, PlayerId, Point};
use tokio::sync::{broadcast, mpsc, oneshot};

use super::errors::{Result, RuntimeError};
use crate::events::{EventBus, GameMessage, Topic};
use crate::registry::PlayerRegistry;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    players: Arc<PlayerRegistry>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        players: Arc<PlayerRegistry>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            players,
        }
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Spawn a monster running the standard tree.
    pub async fn spawn_monster(&self, position: Point, path: Vec<Point>) -> Result<MonsterId> {
        self.request(|reply| Command::Spawn {
            position,
            path,
            reply,
        })
        .await
    }

    /// Damage a monster; `None` if it does not exist.
    pub async fn damage_monster(&self, monster: MonsterId, amount: u32) -> Result<Option<u32>> {
        self.request(|reply| Command::Damage {
            monster,
            amount,
            reply,
        })
        .await
    }

    /// Assign a monster's health (clamped); `None` if it does not exist.
    pub async fn set_monster_health(&self, monster: MonsterId, value: i64) -> Result<Option<u32>> {
        self.request(|reply| Command::SetHealth {
            monster,
            value,
            reply,
        })
        .await
    }

    pub async fn despawn_monster(&self, monster: MonsterId) -> Result<bool> {
        self.request(|reply| Command::Despawn { monster, reply })
            .await
    }

    /// Query every monster's current state (read-only snapshot)
    pub async fn monsters(&self) -> Result<Vec<MonsterState>> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    pub fn join_player(&self, id: PlayerId, position: Point, max_health: u32) {
        self.players.join(id, position, max_health);
    }

    pub fn move_player(&self, id: &PlayerId, position: Point) -> bool {
        self.players.move_to(id, position)
    }

    pub fn leave_player(&self, id: &PlayerId) -> bool {
        self.players.leave(id)
    }

    pub fn players(&self) -> &Arc<PlayerRegistry> {
        &self.players
    }

    /// Subscribe to messages from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Lifecycle` - Spawns and despawns
    /// - `Topic::Movement` - Monster movement
    /// - `Topic::Combat` - Targeting, attacks and damage
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut combat_rx = handle.subscribe(Topic::Combat);
    /// while let Ok(message) = combat_rx.recv().await {
    ///     // Forward to clients
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<GameMessage> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    ///
    /// Returns a map of topic to receiver for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<GameMessage>> {
        self.event_bus.subscribe_multiple(topics)
    }

    pub(crate) async fn send_shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)
    }
}
