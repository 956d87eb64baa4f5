//! Scheduled operation records and their lifecycle projection.

/// Stored facts about one scheduled operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationEntry {
    /// Earliest timestamp the operation may execute
    pub ready_at: u64,
    /// Set exactly once, after the forwarded call succeeds
    pub done: bool,
}

impl OperationEntry {
    pub fn new(ready_at: u64) -> Self {
        Self {
            ready_at,
            done: false,
        }
    }

    /// Project the lifecycle state as of `now`.
    pub fn state(&self, now: u64) -> OperationState {
        if self.done {
            OperationState::Done
        } else if now < self.ready_at {
            OperationState::Waiting
        } else {
            OperationState::Ready
        }
    }
}

/// Operation lifecycle: Unset -> Waiting -> Ready -> Done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    /// No such operation has been scheduled
    Unset,
    /// Scheduled, delay not yet elapsed
    Waiting,
    /// Delay elapsed, anyone may execute
    Ready,
    /// Executed; terminal
    Done,
}
