//! Per-monster world state.

use crate::{Health, MonsterId, PlayerId, Point};

/// Mutable world state of a single monster.
///
/// The behavior tree and the damage API both mutate this record through its
/// methods; health is only ever changed through [`Health`], which keeps it
/// clamped.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterState {
    pub id: MonsterId,
    pub position: Point,
    pub health: Health,
    pub path: Vec<Point>,
    pub path_index: usize,
    /// Yaw in radians, see [`Point::heading_to`].
    pub facing: f32,
    /// Bound target. Resolved through the player directory on every use.
    pub target: Option<PlayerId>,
}

impl MonsterState {
    /// A freshly spawned monster: full health, first waypoint, no target.
    pub fn new(id: MonsterId, position: Point, max_health: u32, path: Vec<Point>) -> Self {
        Self {
            id,
            position,
            health: Health::full(max_health),
            path,
            path_index: 0,
            facing: 0.0,
            target: None,
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health.is_depleted()
    }

    /// Waypoint the monster is currently heading to.
    pub fn current_waypoint(&self) -> Option<Point> {
        self.path.get(self.path_index).copied()
    }

    /// Moves on to the next waypoint.
    ///
    /// Returns `true` when the path was completed; the index then wraps so
    /// the patrol starts over.
    pub fn advance_waypoint(&mut self) -> bool {
        if self.path.is_empty() {
            return true;
        }
        self.path_index += 1;
        if self.path_index >= self.path.len() {
            self.path_index = 0;
            true
        } else {
            false
        }
    }

    /// Replaces the bound target, returning whether it changed.
    pub fn set_target(&mut self, target: Option<PlayerId>) -> bool {
        if self.target == target {
            return false;
        }
        self.target = target;
        true
    }
}
