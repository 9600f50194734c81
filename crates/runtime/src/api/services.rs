//! Capabilities injected into every monster's behavior tree.
//!
//! Trees never look collaborators up through globals. The player directory,
//! the broadcast channel and the navigator are handed to each monster as
//! trait objects bundled in [`Services`], so tests and alternative
//! transports can substitute their own implementations.
use std::sync::Arc;

use game_core::{GameMessage, PlayerId, Point};

/// A player found by [`PlayerDirectory::nearest_within`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSighting {
    pub id: PlayerId,
    pub position: Point,
    pub distance: f32,
}

/// Read/damage access to connected players.
///
/// Lookups report a miss with `None`; callers treat that as "target no
/// longer valid".
pub trait PlayerDirectory: Send + Sync {
    /// Nearest living player within `radius` of `origin`.
    fn nearest_within(&self, origin: Point, radius: f32) -> Option<PlayerSighting>;

    fn position(&self, player: &PlayerId) -> Option<Point>;

    /// Applies damage and returns the player's remaining health.
    fn apply_damage(&self, player: &PlayerId, amount: u32) -> Option<u32>;
}

/// Fan-out of state changes to connected clients.
///
/// Implementations must accept concurrent calls from many monsters. Delivery
/// is best-effort and unordered across monsters.
pub trait Broadcaster: Send + Sync {
    fn broadcast(&self, message: GameMessage);
}

/// Pathfinding and distance service.
pub trait Navigator: Send + Sync {
    /// Next intermediate point on the way from `from` to `to`.
    fn next_waypoint(&self, from: Point, to: Point) -> Point;

    fn distance(&self, a: Point, b: Point) -> f32;
}

/// Open-field navigator: walks straight at the destination.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLine;

impl Navigator for StraightLine {
    fn next_waypoint(&self, _from: Point, to: Point) -> Point {
        to
    }

    fn distance(&self, a: Point, b: Point) -> f32 {
        a.distance(b)
    }
}

/// Capability bundle shared by all monsters of a runtime.
#[derive(Clone)]
pub struct Services {
    pub players: Arc<dyn PlayerDirectory>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub navigator: Arc<dyn Navigator>,
}

impl Services {
    pub fn new(
        players: Arc<dyn PlayerDirectory>,
        broadcaster: Arc<dyn Broadcaster>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            players,
            broadcaster,
            navigator,
        }
    }

    /// Services with the [`StraightLine`] navigator.
    pub fn open_field(players: Arc<dyn PlayerDirectory>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self::new(players, broadcaster, Arc::new(StraightLine))
    }
}
