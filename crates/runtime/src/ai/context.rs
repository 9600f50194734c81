//! Tick context for monster behavior trees.
//!
//! [`AiContext`] is the blackboard every node of a monster's tree sees. It
//! owns the monster's [`MonsterState`] and [`CombatState`], the injected
//! [`Services`], the monster's random source and the clock of the current
//! tick. Nodes mutate the monster only through the helpers defined here so
//! every visible change is also broadcast.

use std::f32::consts::{PI, TAU};
use std::time::{Duration, Instant};

use behavior_tree::{Blackboard, Commitment, Exclusive, NodeMemory};
use game_core::{
    CombatState, GameMessage, MonsterId, MonsterProfile, MonsterState, PlayerId, Point,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::api::Services;

/// Facing changes smaller than this (radians) are not broadcast.
const FACING_TOLERANCE: f32 = 1e-3;

pub struct AiContext {
    pub state: MonsterState,
    pub combat: CombatState,
    pub services: Services,
    rng: ChaCha8Rng,
    now: Instant,
    delta: Duration,
    last_tick: Option<Instant>,
    max_tick_delta: Duration,
    turn_duration: Duration,
}

impl AiContext {
    pub const DEFAULT_MAX_TICK_DELTA: Duration = Duration::from_millis(250);
    pub const DEFAULT_TURN_DURATION: Duration = MonsterProfile::DEFAULT_TURN_DURATION;

    pub fn new(state: MonsterState, services: Services, rng: ChaCha8Rng) -> Self {
        Self {
            state,
            combat: CombatState::new(),
            services,
            rng,
            now: Instant::now(),
            delta: Duration::ZERO,
            last_tick: None,
            max_tick_delta: Self::DEFAULT_MAX_TICK_DELTA,
            turn_duration: Self::DEFAULT_TURN_DURATION,
        }
    }

    /// Seeds the random source from a runtime seed and the monster id, so
    /// every monster draws an independent but reproducible stream.
    pub fn seeded(state: MonsterState, services: Services, seed: u64) -> Self {
        let stream = seed ^ u64::from(state.id.get()).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        Self::new(state, services, ChaCha8Rng::seed_from_u64(stream))
    }

    pub fn with_max_tick_delta(mut self, max_tick_delta: Duration) -> Self {
        self.max_tick_delta = max_tick_delta;
        self
    }

    pub fn with_turn_duration(mut self, turn_duration: Duration) -> Self {
        self.turn_duration = turn_duration;
        self
    }

    /// Advances the clock to `now`.
    ///
    /// The delta since the previous tick is clamped to the maximum tick
    /// delta; the first tick has a zero delta.
    pub fn begin_tick(&mut self, now: Instant) {
        self.delta = match self.last_tick {
            Some(previous) => now.saturating_duration_since(previous).min(self.max_tick_delta),
            None => Duration::ZERO,
        };
        self.now = now;
        self.last_tick = Some(now);
    }

    #[inline]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Wall-clock time elapsed since the previous tick.
    #[inline]
    pub fn delta(&self) -> Duration {
        self.delta
    }

    #[inline]
    pub fn id(&self) -> MonsterId {
        self.state.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.state.position
    }

    pub fn broadcast(&self, message: GameMessage) {
        self.services.broadcaster.broadcast(message);
    }

    /// Binds (or clears) the target, broadcasting only actual changes.
    pub fn set_target(&mut self, target: Option<PlayerId>) {
        if !self.state.set_target(target) {
            return;
        }
        debug!(
            target: "runtime::ai",
            monster = %self.state.id,
            target = ?self.state.target,
            "target changed"
        );
        self.broadcast(GameMessage::MonsterTarget {
            monster_id: self.state.id,
            target: self.state.target.clone(),
        });
    }

    /// Resolves the bound target to its current position.
    ///
    /// A target the player directory no longer knows is cleared.
    pub fn resolve_target(&mut self) -> Option<(PlayerId, Point)> {
        let target = self.state.target.clone()?;
        match self.services.players.position(&target) {
            Some(position) => Some((target, position)),
            None => {
                self.set_target(None);
                None
            }
        }
    }

    /// Moves the monster and broadcasts the new position.
    pub fn move_to(&mut self, position: Point) {
        if self.state.position == position {
            return;
        }
        self.state.position = position;
        self.broadcast(GameMessage::MoveMonster {
            monster_id: self.state.id,
            position,
        });
    }

    /// Turns the monster toward `point`, broadcasting only actual changes.
    pub fn face(&mut self, point: Point) {
        let Some(rotation) = self.state.position.heading_to(point) else {
            return;
        };
        let turn = (rotation - self.state.facing + PI).rem_euclid(TAU) - PI;
        if turn.abs() <= FACING_TOLERANCE {
            return;
        }
        self.state.facing = rotation;
        self.broadcast(GameMessage::MonsterRotate {
            monster_id: self.state.id,
            rotation,
            duration: self.turn_duration,
        });
    }

    pub fn distance_to(&self, point: Point) -> f32 {
        self.services.navigator.distance(self.state.position, point)
    }
}

impl Blackboard for AiContext {
    fn memory(&mut self) -> &mut NodeMemory {
        self.combat.memory_mut()
    }
}

impl Exclusive for AiContext {
    fn commitment(&self) -> Option<Commitment> {
        self.combat.commitment()
    }

    fn commit(&mut self, commitment: Commitment) {
        self.combat.commit(commitment);
    }

    fn release(&mut self) {
        self.combat.release();
    }

    fn roll(&mut self, weight: f64) -> bool {
        self.rng.gen_bool(weight.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use game_core::{PlayerId, Topic};
    use proptest::prelude::*;

    use super::*;
    use crate::events::EventBus;
    use crate::registry::PlayerRegistry;

    fn context(bus: &EventBus) -> AiContext {
        let players = Arc::new(PlayerRegistry::new());
        let services = Services::open_field(players, Arc::new(bus.clone()));
        let state = MonsterState::new(MonsterId::new(7), Point::ORIGIN, 100, Vec::new());
        AiContext::seeded(state, services, 42)
    }

    #[test]
    fn first_tick_has_zero_delta() {
        let bus = EventBus::new();
        let mut ctx = context(&bus);
        ctx.begin_tick(Instant::now());
        assert_eq!(ctx.delta(), Duration::ZERO);
    }

    #[test]
    fn unchanged_target_is_not_rebroadcast() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe(Topic::Combat);
        let mut ctx = context(&bus);

        ctx.set_target(Some(PlayerId::from("p1")));
        ctx.set_target(Some(PlayerId::from("p1")));
        ctx.set_target(None);

        let mut received = Vec::new();
        while let Ok(message) = rx.try_recv() {
            received.push(message);
        }
        assert_eq!(received.len(), 2);
    }

    #[test]
    fn seeded_streams_are_reproducible() {
        let bus = EventBus::new();
        let mut a = context(&bus);
        let mut b = context(&bus);
        let left: Vec<bool> = (0..64).map(|_| a.roll(0.5)).collect();
        let right: Vec<bool> = (0..64).map(|_| b.roll(0.5)).collect();
        assert_eq!(left, right);
    }

    proptest! {
        #[test]
        fn delta_never_exceeds_cap(gaps in proptest::collection::vec(0u64..2_000, 1..20)) {
            let bus = EventBus::new();
            let mut ctx = context(&bus);
            let start = Instant::now();
            let mut elapsed = 0;

            ctx.begin_tick(start);
            for gap in gaps {
                elapsed += gap;
                ctx.begin_tick(start + Duration::from_millis(elapsed));
                prop_assert!(ctx.delta() <= AiContext::DEFAULT_MAX_TICK_DELTA);
                prop_assert_eq!(ctx.delta(), Duration::from_millis(gap).min(AiContext::DEFAULT_MAX_TICK_DELTA));
            }
        }

        #[test]
        fn extreme_weights_are_deterministic(seed in any::<u64>()) {
            let bus = EventBus::new();
            let players = Arc::new(PlayerRegistry::new());
            let services = Services::open_field(players, Arc::new(bus.clone()));
            let state = MonsterState::new(MonsterId::new(1), Point::ORIGIN, 10, Vec::new());
            let mut ctx = AiContext::seeded(state, services, seed);
            prop_assert!(ctx.roll(1.0));
            prop_assert!(!ctx.roll(0.0));
        }
    }
}
