//! Behavior-tree AI for monsters.
//!
//! - [`AiContext`]: per-monster blackboard threaded through every node
//! - [`nodes`]: sensors and actions
//! - [`presets`]: complete trees built from a [`MonsterProfile`](game_core::MonsterProfile)

pub mod context;
pub mod nodes;
pub mod presets;

pub use context::AiContext;
pub use presets::{BehaviorTree, monster_behavior_tree};
