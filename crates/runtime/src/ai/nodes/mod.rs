//! Game-specific behavior tree nodes.
//!
//! This module contains concrete implementations of behavior tree nodes
//! that operate on an [`AiContext`](crate::ai::AiContext). Nodes are divided into:
//!
//! - `conditions`: Sensors that bind targets (return Success/Failure)
//! - `actions`: Attacks, movement and waits that change the world

pub mod actions;
pub mod conditions;

pub use actions::*;
pub use conditions::*;
