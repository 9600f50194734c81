//! Runtime orchestration for monster behavior trees.
//!
//! This crate wires together the injected capabilities, the monster and
//! player registries, the behavior-tree AI and the tick worker into a
//! cohesive runtime API. Servers embed [`Runtime`] to spawn and damage
//! monsters, subscribe to broadcast topics, and manage players through
//! [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the handle, errors and capability traits
//! - [`ai`] holds the tick context, nodes and tree presets
//! - [`events`] provides the topic-based event bus
//! - [`registry`] stores monsters and players
//! - [`monster`] defines the monster entity
//! - [`workers`] keeps background tasks internal to the crate
pub mod ai;
pub mod api;
pub mod config;
pub mod events;
pub mod monster;
pub mod registry;
pub mod runtime;

mod workers;

pub use ai::{AiContext, BehaviorTree, monster_behavior_tree};
pub use api::{
    Broadcaster, Navigator, PlayerDirectory, PlayerSighting, Result, RuntimeError, RuntimeHandle,
    Services, StraightLine,
};
pub use config::RuntimeConfig;
pub use events::{EventBus, GameMessage, Topic};
pub use monster::Monster;
pub use registry::{MonsterRegistry, PlayerRegistry, TickSummary};
pub use runtime::{Runtime, RuntimeBuilder};
