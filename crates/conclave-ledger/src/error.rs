use conclave_types::Address;
use thiserror::Error;

/// Errors that can occur in ledger operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Insufficient balance for {account}: have {have}, need {need}")]
    InsufficientBalance {
        account: Address,
        have: u128,
        need: u128,
    },

    #[error("Invalid query: block {block} is not strictly before current block {current_block}")]
    InvalidQuery { block: u64, current_block: u64 },

    #[error("Amount overflow")]
    AmountOverflow,

    #[error("Cannot transfer zero tokens")]
    ZeroAmount,
}
