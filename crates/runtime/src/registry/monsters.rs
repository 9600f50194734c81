//! Monster storage and batch ticking.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use behavior_tree::{Behavior, Status};
use game_core::{GameMessage, MonsterId, MonsterProfile, MonsterState, Point};
use tracing::{debug, info};

use crate::ai::{AiContext, monster_behavior_tree};
use crate::api::{Result, Services};
use crate::monster::Monster;

/// Outcome counts of one [`MonsterRegistry::tick_all`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub ticked: usize,
    pub skipped_dead: usize,
    pub running: usize,
}

/// Owns every live monster, keyed by id.
///
/// Lookups report a miss with `None`. Monsters are ticked in id order so a
/// seeded run is reproducible.
pub struct MonsterRegistry {
    monsters: BTreeMap<MonsterId, Monster>,
    next_id: u32,
    services: Services,
    profile: MonsterProfile,
    brain: Arc<dyn Behavior<AiContext>>,
    rng_seed: u64,
    max_tick_delta: Duration,
}

impl MonsterRegistry {
    /// Creates an empty registry whose monsters use `profile`.
    ///
    /// The standard tree is built once and shared by every spawned monster.
    pub fn new(services: Services, profile: MonsterProfile, rng_seed: u64) -> Result<Self> {
        profile.validate()?;
        let brain: Arc<dyn Behavior<AiContext>> = Arc::from(monster_behavior_tree(&profile));
        Ok(Self {
            monsters: BTreeMap::new(),
            next_id: 1,
            services,
            profile,
            brain,
            rng_seed,
            max_tick_delta: AiContext::DEFAULT_MAX_TICK_DELTA,
        })
    }

    pub fn with_max_tick_delta(mut self, max_tick_delta: Duration) -> Self {
        self.max_tick_delta = max_tick_delta;
        self
    }

    /// Spawns a monster running the standard tree.
    pub fn spawn(&mut self, position: Point, path: Vec<Point>) -> MonsterId {
        let brain = Arc::clone(&self.brain);
        let max_health = self.profile.max_health;
        self.spawn_with(position, path, max_health, brain)
    }

    /// Spawns a monster running a custom tree.
    pub fn spawn_with(
        &mut self,
        position: Point,
        path: Vec<Point>,
        max_health: u32,
        brain: Arc<dyn Behavior<AiContext>>,
    ) -> MonsterId {
        let id = MonsterId(self.next_id);
        self.next_id += 1;

        let state = MonsterState::new(id, position, max_health, path.clone());
        let ctx = AiContext::seeded(state, self.services.clone(), self.rng_seed)
            .with_max_tick_delta(self.max_tick_delta)
            .with_turn_duration(self.profile.turn_duration);
        self.monsters.insert(id, Monster::new(ctx, brain));

        info!(target: "runtime::monster", monster = %id, %position, max_health, "monster spawned");
        self.services.broadcaster.broadcast(GameMessage::SpawnMonster {
            monster_id: id,
            position,
            max_health,
        });
        if !path.is_empty() {
            self.services.broadcaster.broadcast(GameMessage::MonsterPath {
                monster_id: id,
                path,
            });
        }
        id
    }

    pub fn get(&self, id: MonsterId) -> Option<&Monster> {
        self.monsters.get(&id)
    }

    pub fn get_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters.get_mut(&id)
    }

    /// Removes a monster and tells clients it is gone.
    pub fn despawn(&mut self, id: MonsterId) -> Option<Monster> {
        let monster = self.monsters.remove(&id)?;
        info!(target: "runtime::monster", monster = %id, "monster despawned");
        self.services
            .broadcaster
            .broadcast(GameMessage::MonsterDespawned { monster_id: id });
        Some(monster)
    }

    /// Ticks every monster once at `now`.
    pub fn tick_all(&mut self, now: Instant) -> TickSummary {
        let mut summary = TickSummary::default();
        for monster in self.monsters.values_mut() {
            match monster.update(now) {
                Some(status) => {
                    summary.ticked += 1;
                    if status == Status::Running {
                        summary.running += 1;
                    }
                }
                None => summary.skipped_dead += 1,
            }
        }
        summary
    }

    /// Despawns every dead monster, returning their ids.
    pub fn reap_dead(&mut self) -> Vec<MonsterId> {
        let dead: Vec<MonsterId> = self
            .monsters
            .values()
            .filter(|monster| monster.is_dead())
            .map(Monster::id)
            .collect();
        for id in &dead {
            self.despawn(*id);
        }
        if !dead.is_empty() {
            debug!(target: "runtime::monster", count = dead.len(), "reaped dead monsters");
        }
        dead
    }

    pub fn len(&self) -> usize {
        self.monsters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monsters.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = MonsterId> + '_ {
        self.monsters.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Monster> {
        self.monsters.values()
    }
}
