//! The monster entity.
//!
//! A [`Monster`] pairs its [`AiContext`] (state, combat bookkeeping,
//! services, random source) with a shared, immutable behavior tree. The
//! entity is ticked by exactly one task at a time; the tree itself can be
//! shared by every monster of the same archetype.

use std::sync::Arc;
use std::time::Instant;

use behavior_tree::{Behavior, Status};
use game_core::{CombatState, GameMessage, MonsterId, MonsterState, PlayerId, Point};
use tracing::{debug, info};

use crate::ai::AiContext;

pub struct Monster {
    ctx: AiContext,
    brain: Arc<dyn Behavior<AiContext>>,
}

impl Monster {
    pub fn new(ctx: AiContext, brain: Arc<dyn Behavior<AiContext>>) -> Self {
        Self { ctx, brain }
    }

    #[inline]
    pub fn id(&self) -> MonsterId {
        self.ctx.state.id
    }

    pub fn state(&self) -> &MonsterState {
        &self.ctx.state
    }

    pub fn combat(&self) -> &CombatState {
        &self.ctx.combat
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.ctx.state.position
    }

    #[inline]
    pub fn health(&self) -> u32 {
        self.ctx.state.health.current()
    }

    pub fn target(&self) -> Option<&PlayerId> {
        self.ctx.state.target.as_ref()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.ctx.state.is_dead()
    }

    /// Assigns health, clamped into `[0, max_health]`.
    pub fn set_health(&mut self, value: i64) -> u32 {
        let current = self.ctx.state.health.set(value);
        if current == 0 {
            info!(target: "runtime::monster", monster = %self.id(), "monster health set to zero");
        }
        current
    }

    /// Subtracts `amount` (stopping at zero) and broadcasts the result.
    ///
    /// The damage message is sent on every call, also when the monster was
    /// already dead.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let was_dead = self.is_dead();
        let current_hp = self.ctx.state.health.apply_damage(amount);

        debug!(
            target: "runtime::monster",
            monster = %self.id(),
            damage = amount,
            current_hp,
            "monster damaged"
        );
        if !was_dead && current_hp == 0 {
            info!(target: "runtime::monster", monster = %self.id(), "monster died");
        }

        self.ctx.broadcast(GameMessage::MonsterDamage {
            monster_id: self.id(),
            damage: amount,
            current_hp,
        });
        current_hp
    }

    /// Ticks the behavior tree once at wall-clock time `now`.
    ///
    /// Returns `None` without touching anything when the monster is dead.
    pub fn update(&mut self, now: Instant) -> Option<Status> {
        if self.is_dead() {
            return None;
        }
        self.ctx.begin_tick(now);
        Some(self.brain.tick(&mut self.ctx))
    }
}

impl std::fmt::Debug for Monster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Monster")
            .field("state", &self.ctx.state)
            .finish_non_exhaustive()
    }
}
