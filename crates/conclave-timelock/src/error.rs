use conclave_types::{Address, OperationId};
use thiserror::Error;

use crate::roles::Role;

/// Errors that can occur in execution-gate operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TimelockError {
    #[error("Unauthorized: {account} does not hold role {role:?}")]
    Unauthorized { role: Role, account: Address },

    #[error("Operation already scheduled: {0}")]
    AlreadyScheduled(OperationId),

    #[error("Delay too short: {delay} < minimum {min_delay}")]
    DelayTooShort { delay: u64, min_delay: u64 },

    #[error("Unknown operation: {0}")]
    UnknownOperation(OperationId),

    #[error("Operation not ready: ready at {ready_at}, now {now}")]
    NotReady { ready_at: u64, now: u64 },

    #[error("Predecessor not done: {0}")]
    PredecessorNotDone(OperationId),

    #[error("Operation already done: {0}")]
    AlreadyDone(OperationId),

    #[error("Target call reverted: {0}")]
    TargetCallReverted(String),
}
