//! Lightweight behavior tree library for real-time agents.
//!
//! Trees are built once and never mutated afterward. Nodes take `&self`, and
//! every piece of per-agent progress (resume indices, commitments, timers) is
//! stored in the tick context, so a single tree can drive many agents.
//!
//! - **Tri-state outcome**: `Running` is a polled result, never a suspension
//! - **Reactive and resuming composites**: pick per subtree
//! - **Mutual exclusion**: at most one committed candidate per agent
//! - **Zero dependencies**: Pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Behavior`]: Core trait for all nodes
//! - [`Status`]: Success, Failure or Running
//! - [`Blackboard`] / [`NodeMemory`]: per-agent composite memory
//! - Composite nodes: [`Sequence`], [`Selector`], [`MemSequence`], [`MemSelector`]
//! - Exclusive selection: [`MutuallyExclusiveSelector`] over an [`Exclusive`] context
//! - [`builder`]: `sequence`, `selector`, `exclusive`, ... shorthands

pub mod behavior;
pub mod builder;
pub mod composite;
pub mod exclusive;
pub mod memory;
pub mod status;

// Re-export core types for ergonomic API
pub use behavior::Behavior;
pub use builder::{exclusive, mem_selector, mem_sequence, selector, sequence};
pub use composite::{MemSelector, MemSequence, Selector, Sequence};
pub use exclusive::{Commitment, Exclusive, MutuallyExclusiveSelector};
pub use memory::{Blackboard, NodeId, NodeMemory};
pub use status::Status;
