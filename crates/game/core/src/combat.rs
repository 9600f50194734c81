//! Per-monster combat bookkeeping.
//!
//! [`CombatState`] is the single mutable record every node of a monster's
//! tree reads and writes: cooldown timestamps, the mutual-exclusion
//! commitment, composite resume indices and wait anchors. One instance
//! exists per monster and lives exactly as long as the monster.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use behavior_tree::{Commitment, NodeId, NodeMemory};

/// Attack families with independent cooldowns.
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
pub enum AttackKind {
    Melee,
    Ranged,
    Meteor,
}

#[derive(Debug, Clone, Default)]
pub struct CombatState {
    last_used: HashMap<AttackKind, Instant>,
    commitment: Option<Commitment>,
    memory: NodeMemory,
    wait_anchors: HashMap<NodeId, Instant>,
}

impl CombatState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `kind` may fire at `now` given its `cooldown`.
    ///
    /// An attack that was never used is always ready.
    pub fn is_ready(&self, kind: AttackKind, cooldown: Duration, now: Instant) -> bool {
        match self.last_used.get(&kind) {
            Some(last) => now.saturating_duration_since(*last) >= cooldown,
            None => true,
        }
    }

    pub fn record_use(&mut self, kind: AttackKind, now: Instant) {
        self.last_used.insert(kind, now);
    }

    pub fn last_used(&self, kind: AttackKind) -> Option<Instant> {
        self.last_used.get(&kind).copied()
    }

    pub fn commitment(&self) -> Option<Commitment> {
        self.commitment
    }

    pub fn commit(&mut self, commitment: Commitment) {
        self.commitment = Some(commitment);
    }

    pub fn release(&mut self) {
        self.commitment = None;
    }

    pub fn memory_mut(&mut self) -> &mut NodeMemory {
        &mut self.memory
    }

    /// Returns the wait anchor of `node`, placing it at `now` if absent.
    pub fn anchor_wait(&mut self, node: NodeId, now: Instant) -> Instant {
        *self.wait_anchors.entry(node).or_insert(now)
    }

    pub fn clear_wait(&mut self, node: NodeId) {
        self.wait_anchors.remove(&node);
    }

    pub fn is_waiting(&self, node: NodeId) -> bool {
        self.wait_anchors.contains_key(&node)
    }
}
