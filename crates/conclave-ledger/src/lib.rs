//! Conclave Ledger - Voting-power accounting.
//!
//! This crate provides:
//! - Token balances with a conserved total supply
//! - Delegation (self-delegation activates a holder's own power)
//! - Per-delegate voting-power accumulators
//! - Historical checkpoint queries for power and total supply

pub mod checkpoints;
pub mod error;
pub mod ledger;

pub use checkpoints::{Checkpoint, CheckpointHistory};
pub use error::LedgerError;
pub use ledger::VotingLedger;
