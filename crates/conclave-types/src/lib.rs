//! Conclave Types - Core type definitions for the Conclave governance engine.
//!
//! This crate provides the fundamental types used throughout Conclave:
//! - Addresses (20-byte, Bech32m encoded)
//! - Hashes (32-byte, blake3 digests)
//! - Proposal and operation fingerprints
//! - Encoded governed calls

pub mod action;
pub mod address;
pub mod error;
pub mod fingerprint;
pub mod hash;

#[cfg(feature = "serde")]
mod serialization;

pub use action::CallAction;
pub use address::Address;
pub use error::TypesError;
pub use fingerprint::{OperationId, ProposalId};
pub use hash::Hash;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Address, CallAction, Hash, OperationId, ProposalId, TypesError};
}
