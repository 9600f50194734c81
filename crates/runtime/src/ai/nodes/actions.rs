//! Action nodes for monster behavior trees.
//!
//! Actions consult and update the monster's [`CombatState`](game_core::CombatState),
//! move the monster, damage players and broadcast the results.

use std::time::Duration;

use behavior_tree::{Behavior, Exclusive, NodeId, Status};
use game_core::{AttackKind, AttackProfile, GameMessage, Point};
use tracing::debug;

use crate::ai::AiContext;

/// Damages the bound target when it is in range and the attack is off
/// cooldown.
///
/// A landed hit turns the monster toward the target first.
///
/// Fails without side effects when there is no target, the target is out of
/// range, the cooldown has not elapsed, or the target vanished from the
/// player directory. Cooldowns are wall-clock based and tracked per
/// [`AttackKind`].
#[derive(Debug, Clone, Copy)]
pub struct Attack {
    pub kind: AttackKind,
    pub range: f32,
    pub damage: u32,
    pub cooldown: Duration,
}

impl Attack {
    pub fn new(kind: AttackKind, range: f32, damage: u32, cooldown: Duration) -> Self {
        Self {
            kind,
            range,
            damage,
            cooldown,
        }
    }

    pub fn from_profile(kind: AttackKind, profile: &AttackProfile) -> Self {
        Self::new(kind, profile.range, profile.damage, profile.cooldown)
    }

    pub fn melee(range: f32, damage: u32, cooldown: Duration) -> Self {
        Self::new(AttackKind::Melee, range, damage, cooldown)
    }

    pub fn ranged(range: f32, damage: u32, cooldown: Duration) -> Self {
        Self::new(AttackKind::Ranged, range, damage, cooldown)
    }

    /// Area attack; additionally broadcasts a [`GameMessage::MeteorStrike`]
    /// at the impact point.
    pub fn meteor(range: f32, damage: u32, cooldown: Duration) -> Self {
        Self::new(AttackKind::Meteor, range, damage, cooldown)
    }
}

impl Behavior<AiContext> for Attack {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let Some((target, target_position)) = ctx.resolve_target() else {
            return Status::Failure;
        };

        if ctx.distance_to(target_position) > self.range {
            return Status::Failure;
        }

        let now = ctx.now();
        if !ctx.combat.is_ready(self.kind, self.cooldown, now) {
            return Status::Failure;
        }

        let Some(remaining_hp) = ctx.services.players.apply_damage(&target, self.damage) else {
            ctx.set_target(None);
            return Status::Failure;
        };
        ctx.combat.record_use(self.kind, now);
        ctx.face(target_position);

        debug!(
            target: "runtime::ai",
            monster = %ctx.id(),
            player = %target,
            attack = %self.kind,
            damage = self.damage,
            remaining_hp,
            "attack landed"
        );

        let monster_id = ctx.id();
        ctx.broadcast(GameMessage::MonsterAttack {
            monster_id,
            target: target.clone(),
            attack: self.kind,
            damage: self.damage,
        });
        if self.kind == AttackKind::Meteor {
            ctx.broadcast(GameMessage::MeteorStrike {
                monster_id,
                impact: target_position,
            });
        }
        ctx.broadcast(GameMessage::PlayerDamage {
            player_id: target,
            attack: self.kind,
            damage: self.damage,
            hit_point: target_position,
            remaining_hp,
        });

        Status::Success
    }
}

/// Moves toward the bound target, or along the patrol path when there is
/// none.
///
/// Travels `speed` units per second of tick delta, facing the next waypoint. With a target it fails
/// beyond `range`, succeeds once within `arrive_distance`, and is Running
/// in between. Without a target it walks the path, succeeding when the last
/// waypoint is reached.
#[derive(Debug, Clone, Copy)]
pub struct Chase {
    pub range: f32,
    pub speed: f32,
    pub arrive_distance: f32,
}

impl Chase {
    pub fn new(range: f32, speed: f32, arrive_distance: f32) -> Self {
        Self {
            range,
            speed,
            arrive_distance,
        }
    }

    fn step(&self, ctx: &mut AiContext, destination: Point) -> Point {
        let from = ctx.position();
        let max_step = self.speed * ctx.delta().as_secs_f32();
        let waypoint = ctx.services.navigator.next_waypoint(from, destination);
        ctx.face(waypoint);
        let next = from.step_toward(waypoint, max_step);
        ctx.move_to(next);
        next
    }
}

impl Behavior<AiContext> for Chase {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        if let Some((_, target_position)) = ctx.resolve_target() {
            let distance = ctx.distance_to(target_position);
            if distance > self.range {
                return Status::Failure;
            }
            if distance <= self.arrive_distance {
                return Status::Success;
            }
            self.step(ctx, target_position);
            return if ctx.distance_to(target_position) <= self.arrive_distance {
                Status::Success
            } else {
                Status::Running
            };
        }

        let Some(waypoint) = ctx.state.current_waypoint() else {
            return Status::Failure;
        };
        let reached = self.step(ctx, waypoint);
        if reached != waypoint {
            return Status::Running;
        }
        if ctx.state.advance_waypoint() {
            Status::Success
        } else {
            Status::Running
        }
    }
}

/// Holds its branch for `duration` of wall-clock time.
///
/// The wait is anchored on the first tick after activation, returns Running
/// until the duration elapses and then Success exactly once. An
/// `interruptible` wait releases the monster's exclusive commitment when it
/// starts so another candidate can be chosen at the next opportunity.
#[derive(Debug)]
pub struct Wait {
    id: NodeId,
    pub duration: Duration,
    pub interruptible: bool,
}

impl Wait {
    pub fn new(duration: Duration, interruptible: bool) -> Self {
        Self {
            id: NodeId::next(),
            duration,
            interruptible,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl Behavior<AiContext> for Wait {
    fn tick(&self, ctx: &mut AiContext) -> Status {
        let now = ctx.now();
        let starting = !ctx.combat.is_waiting(self.id);
        let anchor = ctx.combat.anchor_wait(self.id, now);

        if starting && self.interruptible {
            ctx.release();
        }

        if now.saturating_duration_since(anchor) >= self.duration {
            ctx.combat.clear_wait(self.id);
            Status::Success
        } else {
            Status::Running
        }
    }

    fn reset(&self, ctx: &mut AiContext) {
        ctx.combat.clear_wait(self.id);
    }
}
