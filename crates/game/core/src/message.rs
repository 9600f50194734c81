//! Logical broadcast messages.
//!
//! These are the state changes clients are told about. Encoding them for the
//! wire is the transport's job; this crate only fixes their content.

use std::time::Duration;

use crate::{AttackKind, MonsterId, PlayerId, Point};

/// Routing topic of a [`GameMessage`].
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Topic {
    /// Spawns, patrol routes and despawns.
    Lifecycle,
    /// Position and facing updates.
    Movement,
    /// Targeting, attacks and damage.
    Combat,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Lifecycle, Topic::Movement, Topic::Combat];
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameMessage {
    SpawnMonster {
        monster_id: MonsterId,
        position: Point,
        max_health: u32,
    },
    MoveMonster {
        monster_id: MonsterId,
        position: Point,
    },
    /// New facing, to be turned to over `duration`.
    MonsterRotate {
        monster_id: MonsterId,
        rotation: f32,
        duration: Duration,
    },
    /// Patrol route assigned at spawn; lets clients draw the path.
    MonsterPath {
        monster_id: MonsterId,
        path: Vec<Point>,
    },
    /// The monster acquired or lost its target.
    MonsterTarget {
        monster_id: MonsterId,
        target: Option<PlayerId>,
    },
    MonsterAttack {
        monster_id: MonsterId,
        target: PlayerId,
        attack: AttackKind,
        damage: u32,
    },
    PlayerDamage {
        player_id: PlayerId,
        attack: AttackKind,
        damage: u32,
        hit_point: Point,
        remaining_hp: u32,
    },
    MeteorStrike {
        monster_id: MonsterId,
        impact: Point,
    },
    /// Sent on every damage application, including to an already dead monster.
    MonsterDamage {
        monster_id: MonsterId,
        damage: u32,
        current_hp: u32,
    },
    MonsterDespawned {
        monster_id: MonsterId,
    },
}

impl GameMessage {
    pub fn topic(&self) -> Topic {
        match self {
            Self::SpawnMonster { .. }
            | Self::MonsterPath { .. }
            | Self::MonsterDespawned { .. } => Topic::Lifecycle,
            Self::MoveMonster { .. } | Self::MonsterRotate { .. } => Topic::Movement,
            Self::MonsterTarget { .. }
            | Self::MonsterAttack { .. }
            | Self::PlayerDamage { .. }
            | Self::MeteorStrike { .. }
            | Self::MonsterDamage { .. } => Topic::Combat,
        }
    }

    /// Monster the message is about, if any.
    pub fn monster_id(&self) -> Option<MonsterId> {
        match self {
            Self::SpawnMonster { monster_id, .. }
            | Self::MoveMonster { monster_id, .. }
            | Self::MonsterRotate { monster_id, .. }
            | Self::MonsterPath { monster_id, .. }
            | Self::MonsterTarget { monster_id, .. }
            | Self::MonsterAttack { monster_id, .. }
            | Self::MeteorStrike { monster_id, .. }
            | Self::MonsterDamage { monster_id, .. }
            | Self::MonsterDespawned { monster_id } => Some(*monster_id),
            Self::PlayerDamage { .. } => None,
        }
    }
}
