//! The proposal registry and its lifecycle engine.
//!
//! All weights and thresholds are read from historical checkpoints, never
//! from live balances: the proposer's power at the block before creation,
//! every voter's power at the block before voting opened, and quorum
//! against total supply at that same snapshot. Moving tokens after the
//! snapshot therefore cannot change a live proposal's outcome.

use std::collections::HashMap;

use conclave_ledger::VotingLedger;
use conclave_timelock::{Dispatcher, Timelock};
use conclave_types::{Address, CallAction, Hash, OperationId, ProposalId};
use tracing::{debug, info};

use crate::config::GovernorConfig;
use crate::error::GovernorError;
use crate::events::GovernanceEvent;
use crate::proposal::{Proposal, ProposalState, VoteSupport};

/// Token-weighted proposal registry gated by a timelock.
#[derive(Debug)]
pub struct Governor {
    /// The governor's own identity; holds the proposer role on the gate
    address: Address,
    config: GovernorConfig,
    proposals: HashMap<ProposalId, Proposal>,
    events: Vec<GovernanceEvent>,
}

impl Governor {
    pub fn new(address: Address, config: GovernorConfig) -> Self {
        Self {
            address,
            config,
            proposals: HashMap::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn config(&self) -> &GovernorConfig {
        &self.config
    }

    /// Pure fingerprint derivation from proposal content.
    pub fn hash_proposal(actions: &[CallAction], description_hash: Hash) -> ProposalId {
        ProposalId::derive(actions, description_hash)
    }

    /// Submit a proposal.
    ///
    /// The proposer's power is checked at the immediately preceding block,
    /// so power acquired in the current block cannot clear the threshold.
    pub fn propose(
        &mut self,
        ledger: &VotingLedger,
        proposer: Address,
        actions: Vec<CallAction>,
        description: &str,
        now_block: u64,
    ) -> Result<ProposalId, GovernorError> {
        if actions.is_empty() {
            return Err(GovernorError::EmptyProposal);
        }

        let power = if now_block == 0 {
            0
        } else {
            ledger.get_past_votes(&proposer, now_block - 1, now_block)?
        };
        if power < self.config.proposal_threshold {
            return Err(GovernorError::Unauthorized(format!(
                "voting power {} below proposal threshold {}",
                power, self.config.proposal_threshold
            )));
        }

        let description_hash = Hash::compute(description.as_bytes());
        let id = Self::hash_proposal(&actions, description_hash);
        if self.proposals.contains_key(&id) {
            return Err(GovernorError::DuplicateProposal(id));
        }

        let vote_start = now_block + self.config.voting_delay;
        let vote_end = vote_start + self.config.voting_period;

        let proposal = Proposal::new(
            id,
            proposer,
            actions.clone(),
            description_hash,
            now_block,
            vote_start,
            vote_end,
        );
        let snapshot = proposal.snapshot();
        self.proposals.insert(id, proposal);

        info!(%id, proposer = %proposer, snapshot, vote_start, vote_end, "proposal created");
        self.events.push(GovernanceEvent::ProposalCreated {
            id,
            proposer,
            actions,
            description: description.to_string(),
            snapshot,
            vote_start,
            vote_end,
        });

        Ok(id)
    }

    /// Cast a vote with the voter's snapshot-block weight.
    pub fn cast_vote(
        &mut self,
        ledger: &VotingLedger,
        voter: Address,
        id: &ProposalId,
        support: VoteSupport,
        now_block: u64,
    ) -> Result<u128, GovernorError> {
        let (vote_start, vote_end, snapshot) = {
            let proposal = self
                .proposals
                .get(id)
                .ok_or(GovernorError::ProposalNotFound(*id))?;

            if proposal.canceled {
                return Err(GovernorError::NotActive {
                    vote_start: proposal.vote_start,
                    vote_end: proposal.vote_end,
                    now: now_block,
                });
            }
            if proposal.has_voted(&voter) {
                return Err(GovernorError::AlreadyVoted);
            }
            (proposal.vote_start, proposal.vote_end, proposal.snapshot())
        };

        if now_block < vote_start || now_block > vote_end {
            return Err(GovernorError::NotActive {
                vote_start,
                vote_end,
                now: now_block,
            });
        }

        let weight = ledger.get_past_votes(&voter, snapshot, now_block)?;

        // Lookup cannot fail after the checks above.
        if let Some(proposal) = self.proposals.get_mut(id) {
            proposal.record_vote(voter, support, weight);
        }

        debug!(%id, voter = %voter, support = support.as_u8(), weight, "vote cast");
        self.events.push(GovernanceEvent::VoteCast {
            id: *id,
            voter,
            support,
            weight,
        });

        Ok(weight)
    }

    /// Derive the lifecycle state from stored facts and the clock.
    ///
    /// Nothing here mutates: calling `state` twice with the same clock
    /// always yields the same answer, and terminal answers never reverse.
    pub fn state(
        &self,
        ledger: &VotingLedger,
        timelock: &Timelock,
        id: &ProposalId,
        now_block: u64,
        now_ts: u64,
    ) -> Result<ProposalState, GovernorError> {
        let proposal = self
            .proposals
            .get(id)
            .ok_or(GovernorError::ProposalNotFound(*id))?;

        if proposal.canceled {
            return Ok(ProposalState::Canceled);
        }
        if proposal.executed {
            return Ok(ProposalState::Executed);
        }
        if now_block < proposal.vote_start {
            return Ok(ProposalState::Pending);
        }
        if now_block <= proposal.vote_end {
            return Ok(ProposalState::Active);
        }

        // Voting over: evaluate the tally against the snapshot.
        let quorum = self.quorum(ledger, proposal.snapshot(), now_block)?;
        if proposal.for_votes <= proposal.against_votes || proposal.total_votes() < quorum {
            return Ok(ProposalState::Defeated);
        }

        if proposal.is_queued() {
            let all_done = proposal
                .operation_ids
                .iter()
                .all(|op| timelock.is_operation_done(op));
            if all_done {
                return Ok(ProposalState::Executed);
            }

            let ready_at = proposal
                .operation_ids
                .iter()
                .filter_map(|op| timelock.get_timestamp(op))
                .max()
                .unwrap_or(0);
            if now_ts > ready_at.saturating_add(self.config.execution_grace) {
                return Ok(ProposalState::Expired);
            }
            return Ok(ProposalState::Queued);
        }

        if now_block > proposal.vote_end + self.config.queue_window {
            return Ok(ProposalState::Expired);
        }
        Ok(ProposalState::Succeeded)
    }

    /// Quorum requirement against total supply at `snapshot`.
    pub fn quorum(
        &self,
        ledger: &VotingLedger,
        snapshot: u64,
        now_block: u64,
    ) -> Result<u128, GovernorError> {
        let supply = ledger.past_total_supply(snapshot, now_block)?;
        Ok(supply.saturating_mul(self.config.quorum_bps as u128) / 10_000)
    }

    /// Schedule a succeeded proposal's actions on the execution gate.
    ///
    /// Actions are chained through predecessors so they can only execute
    /// in proposal order; the description hash salts every operation so
    /// identical actions from different proposals never collide.
    pub fn queue(
        &mut self,
        ledger: &VotingLedger,
        timelock: &mut Timelock,
        id: &ProposalId,
        now_block: u64,
        now_ts: u64,
    ) -> Result<u64, GovernorError> {
        let state = self.state(ledger, timelock, id, now_block, now_ts)?;
        if state != ProposalState::Succeeded {
            return Err(GovernorError::InvalidState {
                actual: state,
                required: "Succeeded",
            });
        }

        let (actions, salt) = {
            let proposal = self
                .proposals
                .get(id)
                .ok_or(GovernorError::ProposalNotFound(*id))?;
            (proposal.actions.clone(), proposal.description_hash)
        };

        let delay = timelock.min_delay();
        let mut predecessor: Option<OperationId> = None;
        let mut operation_ids = Vec::with_capacity(actions.len());
        for action in actions {
            let op_id =
                timelock.schedule(self.address, action, predecessor, salt, delay, now_ts)?;
            operation_ids.push(op_id);
            predecessor = Some(op_id);
        }

        let ready_at = now_ts.saturating_add(delay);
        if let Some(proposal) = self.proposals.get_mut(id) {
            proposal.operation_ids = operation_ids;
        }

        info!(%id, ready_at, "proposal queued");
        self.events
            .push(GovernanceEvent::ProposalQueued { id: *id, ready_at });

        Ok(ready_at)
    }

    /// Execute a queued, ready proposal through the gate.
    ///
    /// Any caller may drive this once the delay has elapsed. Operations
    /// already done (from a previous partially-failed attempt) are skipped,
    /// so a retry resumes where the revert happened.
    pub fn execute<D: Dispatcher>(
        &mut self,
        ledger: &VotingLedger,
        timelock: &mut Timelock,
        caller: Address,
        id: &ProposalId,
        now_block: u64,
        now_ts: u64,
        dispatcher: &mut D,
    ) -> Result<(), GovernorError> {
        let state = self.state(ledger, timelock, id, now_block, now_ts)?;
        if state != ProposalState::Queued {
            return Err(GovernorError::InvalidState {
                actual: state,
                required: "Queued",
            });
        }

        let (actions, salt, operation_ids) = {
            let proposal = self
                .proposals
                .get(id)
                .ok_or(GovernorError::ProposalNotFound(*id))?;
            (
                proposal.actions.clone(),
                proposal.description_hash,
                proposal.operation_ids.clone(),
            )
        };

        let mut predecessor: Option<OperationId> = None;
        for (action, op_id) in actions.iter().zip(operation_ids.iter()) {
            if !timelock.is_operation_done(op_id) {
                timelock.execute(caller, action, predecessor, salt, now_ts, dispatcher)?;
            }
            predecessor = Some(*op_id);
        }

        if let Some(proposal) = self.proposals.get_mut(id) {
            proposal.executed = true;
        }

        info!(%id, "proposal executed");
        self.events.push(GovernanceEvent::ProposalExecuted { id: *id });

        Ok(())
    }

    /// Cancel a proposal. Only the proposer may cancel, and only before or
    /// during voting; once queued the gate's guarantees take precedence.
    pub fn cancel(
        &mut self,
        ledger: &VotingLedger,
        timelock: &Timelock,
        caller: Address,
        id: &ProposalId,
        now_block: u64,
        now_ts: u64,
    ) -> Result<(), GovernorError> {
        let proposer = self
            .proposals
            .get(id)
            .ok_or(GovernorError::ProposalNotFound(*id))?
            .proposer;
        if caller != proposer {
            return Err(GovernorError::Unauthorized(
                "only the proposer can cancel".to_string(),
            ));
        }

        let state = self.state(ledger, timelock, id, now_block, now_ts)?;
        if !matches!(state, ProposalState::Pending | ProposalState::Active) {
            return Err(GovernorError::InvalidState {
                actual: state,
                required: "Pending or Active",
            });
        }

        if let Some(proposal) = self.proposals.get_mut(id) {
            proposal.canceled = true;
        }

        info!(%id, "proposal canceled");
        self.events.push(GovernanceEvent::ProposalCanceled { id: *id });

        Ok(())
    }

    /// Block whose checkpoints fix the proposal's voting weights.
    pub fn proposal_snapshot(&self, id: &ProposalId) -> Result<u64, GovernorError> {
        self.proposals
            .get(id)
            .map(|p| p.snapshot())
            .ok_or(GovernorError::ProposalNotFound(*id))
    }

    /// Last block votes are accepted.
    pub fn proposal_deadline(&self, id: &ProposalId) -> Result<u64, GovernorError> {
        self.proposals
            .get(id)
            .map(|p| p.vote_end)
            .ok_or(GovernorError::ProposalNotFound(*id))
    }

    pub fn proposal_threshold(&self) -> u128 {
        self.config.proposal_threshold
    }

    /// `(against, for, abstain)` tallies.
    pub fn proposal_votes(&self, id: &ProposalId) -> Result<(u128, u128, u128), GovernorError> {
        self.proposals
            .get(id)
            .map(|p| (p.against_votes, p.for_votes, p.abstain_votes))
            .ok_or(GovernorError::ProposalNotFound(*id))
    }

    pub fn proposal(&self, id: &ProposalId) -> Option<&Proposal> {
        self.proposals.get(id)
    }

    /// Emitted facts so far, in order.
    pub fn events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    /// Take and clear the emitted facts.
    pub fn drain_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }
}
