//! Status returned by behavior nodes.

/// The result of evaluating a behavior node.
///
/// # Real-time Semantics
///
/// Trees are ticked once per server frame. Conditions resolve immediately,
/// while timed actions (cooldown-gated attacks, waits, movement) may need
/// several frames and report [`Status::Running`] until they finish. Running is
/// a polled outcome: a tick never blocks the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The behavior completed successfully.
    ///
    /// For conditions: The condition was met.
    /// For actions: The action took effect.
    Success,

    /// The behavior failed.
    ///
    /// For conditions: The condition was not met.
    /// For actions: The action could not be performed (no target, out of
    /// range, cooling down).
    Failure,

    /// The behavior is still in progress and wants to be ticked again.
    Running,
}

impl Status {
    /// Returns `true` if this status is `Success`.
    #[inline]
    pub fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }

    /// Returns `true` if this status is `Failure`.
    #[inline]
    pub fn is_failure(self) -> bool {
        matches!(self, Status::Failure)
    }

    /// Returns `true` if this status is `Running`.
    #[inline]
    pub fn is_running(self) -> bool {
        matches!(self, Status::Running)
    }

    /// Returns `true` for the terminal outcomes (`Success` or `Failure`).
    #[inline]
    pub fn is_done(self) -> bool {
        !self.is_running()
    }

    /// Inverts the status: Success becomes Failure and vice versa.
    ///
    /// `Running` is left untouched.
    #[inline]
    pub fn invert(self) -> Self {
        match self {
            Status::Success => Status::Failure,
            Status::Failure => Status::Success,
            Status::Running => Status::Running,
        }
    }
}
