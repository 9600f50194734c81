//! Core behavior trait.
//!
//! This module defines the [`Behavior`] trait, which is the fundamental
//! abstraction for all behavior tree nodes. The trait is generic over a
//! context type `C`, allowing nodes to access agent state and make decisions.

use crate::Status;

/// A behavior tree node that can be evaluated against a context.
///
/// Nodes are immutable once built. Anything that has to survive between
/// ticks (resume indices, wait anchors, cooldowns) is stored in the context,
/// which makes a single tree shareable between many agents.
pub trait Behavior<C>: Send + Sync {
    /// Evaluate this behavior node against the given context.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Mutable reference to the context/blackboard. Nodes can read
    ///   agent state and modify it (e.g., to store intermediate results).
    ///
    /// # Returns
    ///
    /// - `Status::Success` if the behavior succeeded
    /// - `Status::Failure` if the behavior failed
    /// - `Status::Running` if the behavior needs further ticks
    fn tick(&self, ctx: &mut C) -> Status;

    /// Forget any progress this node (and its subtree) stored in `ctx`.
    ///
    /// Called by parents when an interrupted subtree must start over.
    fn reset(&self, _ctx: &mut C) {}
}

/// Blanket implementation for boxed behaviors.
///
/// This allows `Box<dyn Behavior<C>>` to also implement `Behavior<C>`,
/// enabling dynamic dispatch and heterogeneous collections of nodes.
impl<C> Behavior<C> for Box<dyn Behavior<C>> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (**self).tick(ctx)
    }

    #[inline]
    fn reset(&self, ctx: &mut C) {
        (**self).reset(ctx)
    }
}
