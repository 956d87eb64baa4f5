use conclave_ledger::LedgerError;
use conclave_timelock::TimelockError;
use conclave_types::ProposalId;
use thiserror::Error;

use crate::proposal::ProposalState;

/// Errors that can occur in governor operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GovernorError {
    #[error("Proposal not found: {0}")]
    ProposalNotFound(ProposalId),

    #[error("Duplicate proposal: {0}")]
    DuplicateProposal(ProposalId),

    #[error("Proposal has no actions")]
    EmptyProposal,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Voting not active: window [{vote_start}, {vote_end}], now {now}")]
    NotActive {
        vote_start: u64,
        vote_end: u64,
        now: u64,
    },

    #[error("Already voted")]
    AlreadyVoted,

    #[error("Invalid proposal state: {actual:?}, operation requires {required}")]
    InvalidState {
        actual: ProposalState,
        required: &'static str,
    },

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Timelock(#[from] TimelockError),
}
