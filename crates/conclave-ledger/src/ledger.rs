//! Token balances, delegation, and checkpointed voting power.
//!
//! Raw balance and voting power are deliberately decoupled: tokens carry no
//! power until their holder names a delegate, and self-delegation is how a
//! holder activates their own power. Every balance movement shifts power
//! between the two affected delegates' accumulators and checkpoints them,
//! so historical queries always see a consistent past.

use std::collections::HashMap;

use conclave_types::Address;
use tracing::{debug, info};

use crate::checkpoints::CheckpointHistory;
use crate::error::LedgerError;

/// Balance-weighted voting-power ledger.
#[derive(Debug, Default)]
pub struct VotingLedger {
    /// Raw token balances
    balances: HashMap<Address, u128>,
    /// Conserved total supply
    total_supply: u128,
    /// holder -> chosen delegate
    delegates: HashMap<Address, Address>,
    /// delegate -> checkpointed voting-power accumulator
    power: HashMap<Address, CheckpointHistory>,
    /// Checkpointed total supply (quorum basis)
    supply_history: CheckpointHistory,
}

impl VotingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create new supply and credit it to `to`.
    pub fn mint(&mut self, to: Address, amount: u128, block: u64) -> Result<(), LedgerError> {
        self.total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;

        let balance = self.balances.entry(to).or_insert(0);
        *balance += amount;

        self.supply_history.push(block, self.total_supply);

        // Newly minted tokens move power only if the recipient has a delegate.
        let to_delegate = self.delegates.get(&to).copied();
        self.move_power(None, to_delegate, amount, block);

        info!(to = %to, amount, block, "minted tokens");
        Ok(())
    }

    /// Raw token balance of `account`.
    pub fn balance_of(&self, account: &Address) -> u128 {
        self.balances.get(account).copied().unwrap_or(0)
    }

    /// Current total supply.
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Total supply as of `block`. Fails unless `block` is strictly in the
    /// past, so quorum math never reads not-yet-final state.
    pub fn past_total_supply(&self, block: u64, current_block: u64) -> Result<u128, LedgerError> {
        if block >= current_block {
            return Err(LedgerError::InvalidQuery {
                block,
                current_block,
            });
        }
        Ok(self.supply_history.value_at(block))
    }

    /// Transfer tokens, moving voting power between the two sides' delegates.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: u128,
        block: u64,
    ) -> Result<(), LedgerError> {
        if amount == 0 {
            return Err(LedgerError::ZeroAmount);
        }

        let have = self.balance_of(&from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance {
                account: from,
                have,
                need: amount,
            });
        }

        *self.balances.entry(from).or_insert(0) -= amount;
        *self.balances.entry(to).or_insert(0) += amount;

        let from_delegate = self.delegates.get(&from).copied();
        let to_delegate = self.delegates.get(&to).copied();
        self.move_power(from_delegate, to_delegate, amount, block);

        debug!(from = %from, to = %to, amount, block, "transfer");
        Ok(())
    }

    /// Reassign `who`'s delegate, moving their full balance's worth of power
    /// from the old delegate's accumulator to the new one.
    ///
    /// Returns the previous delegate, if any.
    pub fn delegate(&mut self, who: Address, to: Address, block: u64) -> Option<Address> {
        let previous = self.delegates.insert(who, to);
        let weight = self.balance_of(&who);
        self.move_power(previous, Some(to), weight, block);

        info!(who = %who, to = %to, weight, block, "delegate changed");
        previous
    }

    /// Current delegate of `who`, if set.
    pub fn delegates(&self, who: &Address) -> Option<Address> {
        self.delegates.get(who).copied()
    }

    /// Current voting power of `account`.
    pub fn get_votes(&self, account: &Address) -> u128 {
        self.power
            .get(account)
            .map(|h| h.latest())
            .unwrap_or(0)
    }

    /// Voting power of `account` as of `block`.
    ///
    /// Binary-searches the checkpoint history for the latest checkpoint at
    /// or before `block`. Fails unless `block` is strictly before
    /// `current_block` (guards against using not-yet-final state).
    pub fn get_past_votes(
        &self,
        account: &Address,
        block: u64,
        current_block: u64,
    ) -> Result<u128, LedgerError> {
        if block >= current_block {
            return Err(LedgerError::InvalidQuery {
                block,
                current_block,
            });
        }
        Ok(self
            .power
            .get(account)
            .map(|h| h.value_at(block))
            .unwrap_or(0))
    }

    /// Checkpoint history for an account's power, if any.
    pub fn power_history(&self, account: &Address) -> Option<&CheckpointHistory> {
        self.power.get(account)
    }

    /// Shift `amount` of power from one delegate's accumulator to another's,
    /// checkpointing each touched accumulator at `block`. Undelegated sides
    /// are skipped: their tokens carry no power.
    fn move_power(
        &mut self,
        from: Option<Address>,
        to: Option<Address>,
        amount: u128,
        block: u64,
    ) {
        if amount == 0 || from == to {
            return;
        }

        if let Some(from) = from {
            let history = self.power.entry(from).or_default();
            let next = history.latest().saturating_sub(amount);
            history.push(block, next);
        }

        if let Some(to) = to {
            let history = self.power.entry(to).or_default();
            let next = history.latest().saturating_add(amount);
            history.push(block, next);
        }
    }
}
