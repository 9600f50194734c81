#![allow(dead_code)]

use std::sync::Arc;

use game_core::{MonsterId, MonsterState, PlayerId, Point};
use runtime::{AiContext, BehaviorTree, EventBus, GameMessage, Monster, PlayerRegistry, Services};
use tokio::sync::broadcast;

pub const SEED: u64 = 42;

/// Shared collaborators for hand-built monsters.
pub struct World {
    pub players: Arc<PlayerRegistry>,
    pub bus: EventBus,
}

impl World {
    pub fn new() -> Self {
        Self {
            players: Arc::new(PlayerRegistry::new()),
            bus: EventBus::with_capacity(1024),
        }
    }

    pub fn services(&self) -> Services {
        Services::open_field(self.players.clone(), Arc::new(self.bus.clone()))
    }

    pub fn join(&self, id: &str, position: Point, max_health: u32) -> PlayerId {
        let id = PlayerId::from(id);
        self.players.join(id.clone(), position, max_health);
        id
    }

    pub fn monster(&self, position: Point, max_health: u32, brain: BehaviorTree) -> Monster {
        let state = MonsterState::new(MonsterId(1), position, max_health, Vec::new());
        let ctx = AiContext::seeded(state, self.services(), SEED);
        Monster::new(ctx, Arc::from(brain))
    }
}

/// Everything currently buffered on `rx`.
pub fn drain(rx: &mut broadcast::Receiver<GameMessage>) -> Vec<GameMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = rx.try_recv() {
        messages.push(message);
    }
    messages
}
