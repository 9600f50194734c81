//! Builder utilities for ergonomic behavior tree construction.
//!
//! This module provides helper functions to reduce boilerplate when building
//! behavior trees. Instead of writing verbose `Box::new(Sequence::new(vec![...]))`,
//! you can use shorter functions like `sequence(vec![...])`.

use crate::{
    Behavior, Blackboard, Exclusive, MemSelector, MemSequence, MutuallyExclusiveSelector,
    Selector, Sequence,
};

/// Creates a reactive sequence node.
///
/// Shorthand for `Box::new(Sequence::new(children))`.
#[inline]
pub fn sequence<C: Blackboard + 'static>(
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(Sequence::new(children))
}

/// Creates a reactive selector node.
///
/// Shorthand for `Box::new(Selector::new(children))`.
#[inline]
pub fn selector<C: Blackboard + 'static>(
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(Selector::new(children))
}

/// Creates a resuming sequence node.
///
/// Shorthand for `Box::new(MemSequence::new(children))`.
#[inline]
pub fn mem_sequence<C: Blackboard + 'static>(
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(MemSequence::new(children))
}

/// Creates a resuming selector node.
///
/// Shorthand for `Box::new(MemSelector::new(children))`.
#[inline]
pub fn mem_selector<C: Blackboard + 'static>(
    children: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(MemSelector::new(children))
}

/// Creates a mutually exclusive selector node.
///
/// Shorthand for `Box::new(MutuallyExclusiveSelector::new(weight, candidates))`.
#[inline]
pub fn exclusive<C: Exclusive + 'static>(
    weight: f64,
    candidates: Vec<Box<dyn Behavior<C>>>,
) -> Box<dyn Behavior<C>> {
    Box::new(MutuallyExclusiveSelector::new(weight, candidates))
}
