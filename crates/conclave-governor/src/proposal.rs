//! Proposal records and the derived lifecycle.
//!
//! A proposal stores only facts: tallies, timestamps, flags, and the set of
//! scheduled operation ids. Its lifecycle state is never stored; it is
//! always derived fresh from those facts plus the clock (see
//! `Governor::state`), which eliminates stale-status bugs by construction.

use std::collections::HashMap;

use conclave_types::{Address, CallAction, Hash, OperationId, ProposalId};

/// Derived proposal lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalState {
    /// Created, voting not yet open
    Pending,
    /// Voting window is open
    Active,
    /// Canceled by the proposer; terminal
    Canceled,
    /// Voting ended below quorum or without a majority; terminal
    Defeated,
    /// Voting ended with quorum and a majority, not yet queued
    Succeeded,
    /// Scheduled on the execution gate, waiting out the delay
    Queued,
    /// Succeeded or queued but the execution window lapsed; terminal
    Expired,
    /// All scheduled operations done; terminal
    Executed,
}

impl ProposalState {
    /// Whether no further transition can occur.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ProposalState::Canceled
                | ProposalState::Defeated
                | ProposalState::Expired
                | ProposalState::Executed
        )
    }

    /// Whether votes may still be cast.
    pub fn can_vote(&self) -> bool {
        matches!(self, ProposalState::Active)
    }
}

/// Vote support buckets: Against=0, For=1, Abstain=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteSupport {
    /// Vote against
    Against,
    /// Vote in favor
    For,
    /// Abstain (counts toward quorum but not the majority comparison)
    Abstain,
}

impl VoteSupport {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(VoteSupport::Against),
            1 => Some(VoteSupport::For),
            2 => Some(VoteSupport::Abstain),
            _ => None,
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            VoteSupport::Against => 0,
            VoteSupport::For => 1,
            VoteSupport::Abstain => 2,
        }
    }
}

/// Stored facts about one proposal.
#[derive(Debug, Clone)]
pub struct Proposal {
    /// Content-derived fingerprint
    pub id: ProposalId,
    /// Proposer address
    pub proposer: Address,
    /// Ordered actions to perform on approval
    pub actions: Vec<CallAction>,
    /// Hash of the human-readable description (also the scheduling salt)
    pub description_hash: Hash,
    /// Block the proposal was created at
    pub created_at: u64,
    /// First block votes are accepted
    pub vote_start: u64,
    /// Last block votes are accepted
    pub vote_end: u64,
    /// Weighted tally, monotonically non-decreasing during the window
    pub for_votes: u128,
    pub against_votes: u128,
    pub abstain_votes: u128,
    /// voter -> support cast
    pub has_voted: HashMap<Address, VoteSupport>,
    /// Set by proposer cancellation
    pub canceled: bool,
    /// Set once the gate confirms every operation done
    pub executed: bool,
    /// Operation fingerprints, in action order; empty until queued
    pub operation_ids: Vec<OperationId>,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        proposer: Address,
        actions: Vec<CallAction>,
        description_hash: Hash,
        created_at: u64,
        vote_start: u64,
        vote_end: u64,
    ) -> Self {
        Self {
            id,
            proposer,
            actions,
            description_hash,
            created_at,
            vote_start,
            vote_end,
            for_votes: 0,
            against_votes: 0,
            abstain_votes: 0,
            has_voted: HashMap::new(),
            canceled: false,
            executed: false,
            operation_ids: Vec::new(),
        }
    }

    /// Block whose checkpoints fix every voter's weight.
    pub fn snapshot(&self) -> u64 {
        self.vote_start.saturating_sub(1)
    }

    /// Total votes cast across all buckets.
    pub fn total_votes(&self) -> u128 {
        self.for_votes
            .saturating_add(self.against_votes)
            .saturating_add(self.abstain_votes)
    }

    pub fn has_voted(&self, voter: &Address) -> bool {
        self.has_voted.contains_key(voter)
    }

    /// Whether the proposal has been scheduled on the gate.
    pub fn is_queued(&self) -> bool {
        !self.operation_ids.is_empty()
    }

    /// Record one vote. Caller has already enforced the window and the
    /// once-per-account rule.
    pub(crate) fn record_vote(&mut self, voter: Address, support: VoteSupport, weight: u128) {
        match support {
            VoteSupport::For => self.for_votes = self.for_votes.saturating_add(weight),
            VoteSupport::Against => self.against_votes = self.against_votes.saturating_add(weight),
            VoteSupport::Abstain => self.abstain_votes = self.abstain_votes.saturating_add(weight),
        }
        self.has_voted.insert(voter, support);
    }
}
