//! Composite behavior nodes.
//!
//! Composite nodes control the execution flow of multiple child behaviors.
//! Two families are provided:
//!
//! - **Reactive** ([`Sequence`], [`Selector`]): every tick restarts from the
//!   first child, so conditions placed before a running action are
//!   re-checked each frame.
//! - **Resuming** ([`MemSequence`], [`MemSelector`]): a child that returned
//!   `Running` is resumed directly on the next tick; earlier children are
//!   not re-evaluated until the composite finishes.
//!
//! Both families keep their bookkeeping in the agent's
//! [`NodeMemory`](crate::NodeMemory), never in the node itself.

use crate::{Behavior, Blackboard, NodeId, Status};

type Children<C> = Vec<Box<dyn Behavior<C>>>;

fn reset_children<C>(id: NodeId, children: &[Box<dyn Behavior<C>>], ctx: &mut C)
where
    C: Blackboard,
{
    ctx.memory().clear(id);
    for child in children {
        child.reset(ctx);
    }
}

/// Records `index` as the running child of a reactive composite, resetting
/// the previously running child when another one took over.
fn note_running<C>(id: NodeId, children: &[Box<dyn Behavior<C>>], index: usize, ctx: &mut C)
where
    C: Blackboard,
{
    if let Some(previous) = ctx.memory().cursor(id)
        && previous != index
    {
        children[previous].reset(ctx);
    }
    ctx.memory().set_cursor(id, index);
}

/// Executes child behaviors in sequence until one fails.
///
/// # Semantics
///
/// A `Sequence` node evaluates its children from left to right, starting
/// over from the first child on every tick:
/// - If a child returns `Failure`, the sequence **stops immediately** and returns `Failure`
/// - If a child returns `Running`, the sequence stops and returns `Running`
/// - If a child returns `Success`, the sequence **continues** to the next child
/// - If all children return `Success`, the sequence returns `Success`
///
/// This is analogous to a short-circuited logical AND (&&) operation.
pub struct Sequence<C> {
    id: NodeId,
    children: Children<C>,
}

impl<C> Sequence<C> {
    /// Creates a new sequence with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A sequence with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Sequence must have at least one child"
        );
        Self {
            id: NodeId::next(),
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<C: Blackboard> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for (index, child) in self.children.iter().enumerate() {
            match child.tick(ctx) {
                Status::Success => continue,
                Status::Failure => {
                    self.reset(ctx);
                    return Status::Failure;
                }
                Status::Running => {
                    note_running(self.id, &self.children, index, ctx);
                    return Status::Running;
                }
            }
        }
        self.reset(ctx);
        Status::Success
    }

    fn reset(&self, ctx: &mut C) {
        reset_children(self.id, &self.children, ctx);
    }
}

/// Executes child behaviors in priority order until one does not fail.
///
/// # Semantics
///
/// A `Selector` node evaluates its children from left to right, starting
/// over from the first child on every tick:
/// - If a child returns `Success` or `Running`, the selector **stops immediately**
///   and returns that status
/// - If a child returns `Failure`, the selector **continues** to the next child
/// - If all children return `Failure`, the selector returns `Failure`
///
/// This is analogous to a short-circuited logical OR (||) operation.
pub struct Selector<C> {
    id: NodeId,
    children: Children<C>,
}

impl<C> Selector<C> {
    /// Creates a new selector with the given child behaviors.
    ///
    /// # Panics
    ///
    /// Panics if `children` is empty. A selector with no children is
    /// meaningless and likely indicates a programming error.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "Selector must have at least one child"
        );
        Self {
            id: NodeId::next(),
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<C: Blackboard> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for (index, child) in self.children.iter().enumerate() {
            match child.tick(ctx) {
                Status::Failure => continue,
                Status::Success => {
                    self.reset(ctx);
                    return Status::Success;
                }
                Status::Running => {
                    note_running(self.id, &self.children, index, ctx);
                    return Status::Running;
                }
            }
        }
        self.reset(ctx);
        Status::Failure
    }

    fn reset(&self, ctx: &mut C) {
        reset_children(self.id, &self.children, ctx);
    }
}

/// Sequence that resumes at its running child.
///
/// Same outcome rules as [`Sequence`], but when a child returns `Running`
/// its index is stored and the next tick continues from that child instead
/// of starting over. Memory is cleared as soon as the sequence succeeds or
/// fails.
pub struct MemSequence<C> {
    id: NodeId,
    children: Children<C>,
}

impl<C> MemSequence<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "MemSequence must have at least one child"
        );
        Self {
            id: NodeId::next(),
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<C: Blackboard> Behavior<C> for MemSequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let mut index = ctx.memory().cursor(self.id).unwrap_or(0);
        while let Some(child) = self.children.get(index) {
            match child.tick(ctx) {
                Status::Success => index += 1,
                Status::Failure => {
                    self.reset(ctx);
                    return Status::Failure;
                }
                Status::Running => {
                    ctx.memory().set_cursor(self.id, index);
                    return Status::Running;
                }
            }
        }
        self.reset(ctx);
        Status::Success
    }

    fn reset(&self, ctx: &mut C) {
        reset_children(self.id, &self.children, ctx);
    }
}

/// Selector that resumes at its running child.
///
/// Same outcome rules as [`Selector`], but a child that returned `Running`
/// is ticked directly on the next tick, skipping the higher-priority
/// children that failed before it.
pub struct MemSelector<C> {
    id: NodeId,
    children: Children<C>,
}

impl<C> MemSelector<C> {
    /// # Panics
    ///
    /// Panics if `children` is empty.
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !children.is_empty(),
            "MemSelector must have at least one child"
        );
        Self {
            id: NodeId::next(),
            children,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<C: Blackboard> Behavior<C> for MemSelector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        let mut index = ctx.memory().cursor(self.id).unwrap_or(0);
        while let Some(child) = self.children.get(index) {
            match child.tick(ctx) {
                Status::Failure => index += 1,
                Status::Success => {
                    self.reset(ctx);
                    return Status::Success;
                }
                Status::Running => {
                    ctx.memory().set_cursor(self.id, index);
                    return Status::Running;
                }
            }
        }
        self.reset(ctx);
        Status::Failure
    }

    fn reset(&self, ctx: &mut C) {
        reset_children(self.id, &self.children, ctx);
    }
}
