//! Mutually exclusive selection.
//!
//! A [`MutuallyExclusiveSelector`] owns a set of candidate subtrees of which
//! at most one may be active at a time. The active candidate is recorded as a
//! [`Commitment`] in the agent context; there is a single commitment slot per
//! agent, so two candidates can never be committed simultaneously.

use crate::{Behavior, Blackboard, NodeId, Status};

/// Which candidate of which selector currently owns the action slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment {
    pub group: NodeId,
    pub candidate: usize,
}

/// Context capability required by [`MutuallyExclusiveSelector`].
pub trait Exclusive: Blackboard {
    /// The commitment currently held, if any.
    fn commitment(&self) -> Option<Commitment>;

    /// Claims the slot, replacing any previous commitment.
    fn commit(&mut self, commitment: Commitment);

    /// Frees the slot.
    fn release(&mut self);

    /// Returns `true` with probability `weight`.
    ///
    /// Backed by the agent's seedable random source so selection is
    /// reproducible.
    fn roll(&mut self, weight: f64) -> bool;
}

/// Randomly gated selector whose candidates exclude each other.
///
/// # Semantics
///
/// 1. If one of its candidates is committed, only that candidate is ticked.
///    The commitment is released once the candidate finishes.
/// 2. A running candidate that gave up the commitment itself (an
///    interruptible wait) stays parked: it is resumed on later ticks until it
///    finishes, while the slot is free for other selectors.
/// 3. If another selector holds the commitment, returns `Failure`.
/// 4. Otherwise, with probability `weight` the candidates are evaluated in
///    order and the first one that does not fail is committed (the slot is
///    claimed right before the candidate is ticked); with probability
///    `1 - weight` the tick is skipped and `Failure` is returned.
///
/// The running candidate's index is kept in the agent's
/// [`NodeMemory`](crate::NodeMemory) under the selector's id.
pub struct MutuallyExclusiveSelector<C> {
    id: NodeId,
    weight: f64,
    candidates: Vec<Box<dyn Behavior<C>>>,
}

impl<C> MutuallyExclusiveSelector<C> {
    /// # Panics
    ///
    /// Panics if `candidates` is empty or `weight` is outside `[0, 1]`.
    pub fn new(weight: f64, candidates: Vec<Box<dyn Behavior<C>>>) -> Self {
        assert!(
            !candidates.is_empty(),
            "MutuallyExclusiveSelector must have at least one candidate"
        );
        assert!(
            (0.0..=1.0).contains(&weight),
            "MutuallyExclusiveSelector weight must be within [0, 1], got {weight}"
        );
        Self {
            id: NodeId::next(),
            weight,
            candidates,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<C: Exclusive> MutuallyExclusiveSelector<C> {
    fn release_own(&self, ctx: &mut C) {
        if ctx
            .commitment()
            .is_some_and(|held| held.group == self.id)
        {
            ctx.release();
        }
    }

    fn resume(&self, ctx: &mut C, candidate: usize) -> Status {
        let status = match self.candidates.get(candidate) {
            Some(node) => node.tick(ctx),
            None => Status::Failure,
        };
        self.settle(ctx, candidate, status);
        status
    }

    fn settle(&self, ctx: &mut C, candidate: usize, status: Status) {
        if status.is_done() {
            ctx.memory().clear(self.id);
            self.release_own(ctx);
        } else {
            ctx.memory().set_cursor(self.id, candidate);
        }
    }
}

impl<C: Exclusive> Behavior<C> for MutuallyExclusiveSelector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        if let Some(held) = ctx.commitment()
            && held.group == self.id
        {
            return self.resume(ctx, held.candidate);
        }

        if let Some(parked) = ctx.memory().cursor(self.id) {
            return self.resume(ctx, parked);
        }

        if ctx.commitment().is_some() || !ctx.roll(self.weight) {
            return Status::Failure;
        }

        for (index, candidate) in self.candidates.iter().enumerate() {
            // Leftovers of an interrupted run must not leak into a fresh one.
            candidate.reset(ctx);
            ctx.commit(Commitment {
                group: self.id,
                candidate: index,
            });

            let status = candidate.tick(ctx);
            if status != Status::Failure {
                self.settle(ctx, index, status);
                return status;
            }
            self.release_own(ctx);
        }

        Status::Failure
    }

    fn reset(&self, ctx: &mut C) {
        ctx.memory().clear(self.id);
        self.release_own(ctx);
        for candidate in &self.candidates {
            candidate.reset(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::NodeMemory;

    #[derive(Default)]
    struct TestContext {
        ticked: Vec<&'static str>,
        rolls: VecDeque<bool>,
        commitment: Option<Commitment>,
        remaining: u32,
        memory: NodeMemory,
    }

    impl Blackboard for TestContext {
        fn memory(&mut self) -> &mut NodeMemory {
            &mut self.memory
        }
    }

    impl Exclusive for TestContext {
        fn commitment(&self) -> Option<Commitment> {
            self.commitment
        }

        fn commit(&mut self, commitment: Commitment) {
            self.commitment = Some(commitment);
        }

        fn release(&mut self) {
            self.commitment = None;
        }

        fn roll(&mut self, _weight: f64) -> bool {
            self.rolls.pop_front().unwrap_or(false)
        }
    }

    struct Named(&'static str, Status);
    impl Behavior<TestContext> for Named {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.ticked.push(self.0);
            self.1
        }
    }

    /// Running while `remaining > 0`, counting down each tick.
    struct Countdown(&'static str);
    impl Behavior<TestContext> for Countdown {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            ctx.ticked.push(self.0);
            if ctx.remaining == 0 {
                Status::Success
            } else {
                ctx.remaining -= 1;
                Status::Running
            }
        }
    }

    /// Gives the slot up on its first tick, then counts down like [`Countdown`].
    struct Yielding(&'static str);
    impl Behavior<TestContext> for Yielding {
        fn tick(&self, ctx: &mut TestContext) -> Status {
            if ctx.ticked.last() != Some(&self.0) {
                ctx.release();
            }
            ctx.ticked.push(self.0);
            if ctx.remaining == 0 {
                Status::Success
            } else {
                ctx.remaining -= 1;
                Status::Running
            }
        }
    }

    fn context(rolls: &[bool]) -> TestContext {
        TestContext {
            rolls: rolls.iter().copied().collect(),
            ..TestContext::default()
        }
    }

    #[test]
    fn skipped_roll_fails_without_ticking() {
        let node = MutuallyExclusiveSelector::new(0.5, vec![Box::new(Named("a", Status::Success))]);

        let mut ctx = context(&[false]);
        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert!(ctx.ticked.is_empty());
        assert_eq!(ctx.commitment, None);
    }

    #[test]
    fn commits_to_first_running_candidate() {
        let node = MutuallyExclusiveSelector::new(
            1.0,
            vec![
                Box::new(Named("fail", Status::Failure)),
                Box::new(Countdown("run")),
                Box::new(Named("late", Status::Success)),
            ],
        );

        let mut ctx = context(&[true]);
        ctx.remaining = 1;

        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(
            ctx.commitment,
            Some(Commitment {
                group: node.id(),
                candidate: 1
            })
        );

        // Committed candidate is resumed alone; no roll is consumed.
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.ticked, vec!["fail", "run", "run"]);
        assert_eq!(ctx.commitment, None);
        assert!(ctx.memory.is_empty());
    }

    #[test]
    fn released_candidate_is_resumed_until_done() {
        let node = MutuallyExclusiveSelector::new(
            1.0,
            vec![Box::new(Yielding("yield")), Box::new(Named("other", Status::Success))],
        );

        // Only one roll is queued: a second selection would fail.
        let mut ctx = context(&[true]);
        ctx.remaining = 2;

        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.commitment, None);

        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert_eq!(ctx.commitment, None);

        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.ticked, vec!["yield", "yield", "yield"]);
        assert!(ctx.memory.is_empty());

        // Finished: the next tick is a fresh selection.
        assert_eq!(node.tick(&mut ctx), Status::Failure);
    }

    #[test]
    fn parked_candidate_ignores_foreign_commitment() {
        let node = MutuallyExclusiveSelector::new(1.0, vec![Box::new(Yielding("yield"))]);

        let mut ctx = context(&[true]);
        ctx.remaining = 1;
        assert_eq!(node.tick(&mut ctx), Status::Running);

        let foreign = Commitment {
            group: NodeId::next(),
            candidate: 0,
        };
        ctx.commitment = Some(foreign);

        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.commitment, Some(foreign));
    }

    #[test]
    fn immediate_success_leaves_slot_free() {
        let node = MutuallyExclusiveSelector::new(1.0, vec![Box::new(Named("a", Status::Success))]);

        let mut ctx = context(&[true]);
        assert_eq!(node.tick(&mut ctx), Status::Success);
        assert_eq!(ctx.commitment, None);
    }

    #[test]
    fn all_candidates_failing_fails() {
        let node = MutuallyExclusiveSelector::new(
            1.0,
            vec![
                Box::new(Named("a", Status::Failure)),
                Box::new(Named("b", Status::Failure)),
            ],
        );

        let mut ctx = context(&[true]);
        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert_eq!(ctx.ticked, vec!["a", "b"]);
        assert_eq!(ctx.commitment, None);
    }

    #[test]
    fn foreign_commitment_blocks_selection() {
        let node = MutuallyExclusiveSelector::new(1.0, vec![Box::new(Named("a", Status::Success))]);

        let mut ctx = context(&[true]);
        let foreign = Commitment {
            group: NodeId::next(),
            candidate: 0,
        };
        ctx.commitment = Some(foreign);

        assert_eq!(node.tick(&mut ctx), Status::Failure);
        assert!(ctx.ticked.is_empty());
        assert_eq!(ctx.commitment, Some(foreign));
    }

    #[test]
    fn reset_releases_own_commitment() {
        let node = MutuallyExclusiveSelector::new(1.0, vec![Box::new(Countdown("run"))]);

        let mut ctx = context(&[true]);
        ctx.remaining = 5;
        assert_eq!(node.tick(&mut ctx), Status::Running);
        assert!(ctx.commitment.is_some());

        node.reset(&mut ctx);
        assert_eq!(ctx.commitment, None);
        assert!(ctx.memory.is_empty());
    }

    #[test]
    #[should_panic(expected = "weight must be within")]
    fn rejects_weight_above_one() {
        let _ = MutuallyExclusiveSelector::<TestContext>::new(
            1.5,
            vec![Box::new(Named("a", Status::Success))],
        );
    }
}
