//! Concurrent in-memory player registry.

use dashmap::DashMap;
use game_core::{Health, PlayerId, Point};
use tracing::info;

use crate::api::{PlayerDirectory, PlayerSighting};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PlayerRecord {
    position: Point,
    health: Health,
}

/// Connected players keyed by session id.
///
/// Shared between the session layer (joins, moves, leaves) and every
/// monster's tree (sensing, damage) without an outer lock.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    players: DashMap<PlayerId, PlayerRecord>,
}

impl PlayerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a player at full health, replacing any previous record.
    pub fn join(&self, id: PlayerId, position: Point, max_health: u32) {
        info!(target: "runtime::players", player = %id, %position, "player joined");
        self.players.insert(
            id,
            PlayerRecord {
                position,
                health: Health::full(max_health),
            },
        );
    }

    pub fn leave(&self, id: &PlayerId) -> bool {
        let removed = self.players.remove(id).is_some();
        if removed {
            info!(target: "runtime::players", player = %id, "player left");
        }
        removed
    }

    /// Updates a player's position. Returns `false` for unknown players.
    pub fn move_to(&self, id: &PlayerId, position: Point) -> bool {
        match self.players.get_mut(id) {
            Some(mut record) => {
                record.position = position;
                true
            }
            None => false,
        }
    }

    pub fn health(&self, id: &PlayerId) -> Option<u32> {
        self.players.get(id).map(|record| record.health.current())
    }

    /// Assigns a player's health, clamped into range.
    pub fn set_health(&self, id: &PlayerId, value: i64) -> Option<u32> {
        self.players
            .get_mut(id)
            .map(|mut record| record.health.set(value))
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl PlayerDirectory for PlayerRegistry {
    fn nearest_within(&self, origin: Point, radius: f32) -> Option<PlayerSighting> {
        self.players
            .iter()
            .filter(|entry| !entry.health.is_depleted())
            .filter_map(|entry| {
                let distance = origin.distance(entry.position);
                (distance <= radius).then(|| PlayerSighting {
                    id: entry.key().clone(),
                    position: entry.position,
                    distance,
                })
            })
            .min_by(|a, b| {
                a.distance
                    .total_cmp(&b.distance)
                    .then_with(|| a.id.cmp(&b.id))
            })
    }

    fn position(&self, player: &PlayerId) -> Option<Point> {
        self.players.get(player).map(|record| record.position)
    }

    fn apply_damage(&self, player: &PlayerId, amount: u32) -> Option<u32> {
        self.players
            .get_mut(player)
            .map(|mut record| record.health.apply_damage(amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> PlayerRegistry {
        let players = PlayerRegistry::new();
        players.join(PlayerId::from("near"), Point::new(3.0, 0.0), 100);
        players.join(PlayerId::from("far"), Point::new(30.0, 0.0), 100);
        players
    }

    #[test]
    fn nearest_within_picks_closest() {
        let players = registry();
        let sighting = players.nearest_within(Point::ORIGIN, 50.0);
        assert_eq!(sighting.map(|s| s.id), Some(PlayerId::from("near")));
        assert!(players.nearest_within(Point::ORIGIN, 2.0).is_none());
    }

    #[test]
    fn ties_break_by_id() {
        let players = PlayerRegistry::new();
        players.join(PlayerId::from("b"), Point::new(1.0, 0.0), 10);
        players.join(PlayerId::from("a"), Point::new(-1.0, 0.0), 10);
        let sighting = players.nearest_within(Point::ORIGIN, 5.0);
        assert_eq!(sighting.map(|s| s.id), Some(PlayerId::from("a")));
    }

    #[test]
    fn defeated_players_are_invisible() {
        let players = registry();
        let near = PlayerId::from("near");
        assert_eq!(players.apply_damage(&near, 250), Some(0));
        let sighting = players.nearest_within(Point::ORIGIN, 50.0);
        assert_eq!(sighting.map(|s| s.id), Some(PlayerId::from("far")));
    }

    #[test]
    fn unknown_players_miss() {
        let players = registry();
        let ghost = PlayerId::from("ghost");
        assert_eq!(players.position(&ghost), None);
        assert_eq!(players.apply_damage(&ghost, 5), None);
        assert!(!players.move_to(&ghost, Point::ORIGIN));
        assert!(!players.leave(&ghost));
    }
}
