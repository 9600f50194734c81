//! Per-agent node memory.
//!
//! Composite nodes are immutable, so the child index a composite has to
//! resume at lives in a [`NodeMemory`] owned by the agent being ticked. The
//! memory is reached through the [`Blackboard`] trait implemented by the
//! tick context.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_NODE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identifier of a stateful node.
///
/// Allocated when the node is constructed and stable for the node's
/// lifetime, so it can key per-agent memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Allocates a fresh identifier.
    pub fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Resume indices of composites that returned `Running`.
#[derive(Debug, Clone, Default)]
pub struct NodeMemory {
    cursors: HashMap<NodeId, usize>,
}

impl NodeMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Child index stored for `node`, if it is mid-run.
    pub fn cursor(&self, node: NodeId) -> Option<usize> {
        self.cursors.get(&node).copied()
    }

    pub fn set_cursor(&mut self, node: NodeId, index: usize) {
        self.cursors.insert(node, index);
    }

    pub fn clear(&mut self, node: NodeId) {
        self.cursors.remove(&node);
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }
}

/// Context capability exposing the agent's [`NodeMemory`].
pub trait Blackboard {
    fn memory(&mut self) -> &mut NodeMemory;
}

impl Blackboard for NodeMemory {
    fn memory(&mut self) -> &mut NodeMemory {
        self
    }
}
