//! Emitted facts for off-chain bookkeeping.

use conclave_types::{Address, CallAction, ProposalId};

use crate::proposal::VoteSupport;

/// Facts the governor emits as proposals move through their lifecycle.
///
/// The execution gate emits its own facts for scheduled and executed
/// operations; together the two streams let an observer reconstruct the
/// full history.
#[derive(Debug, Clone, PartialEq)]
pub enum GovernanceEvent {
    ProposalCreated {
        id: ProposalId,
        proposer: Address,
        actions: Vec<CallAction>,
        description: String,
        /// Block whose checkpoints fix every voter's weight
        snapshot: u64,
        vote_start: u64,
        /// Last block votes are accepted
        vote_end: u64,
    },
    VoteCast {
        id: ProposalId,
        voter: Address,
        support: VoteSupport,
        weight: u128,
    },
    ProposalQueued {
        id: ProposalId,
        ready_at: u64,
    },
    ProposalExecuted {
        id: ProposalId,
    },
    ProposalCanceled {
        id: ProposalId,
    },
}
