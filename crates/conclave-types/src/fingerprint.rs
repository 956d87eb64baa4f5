//! Content-derived identifiers for proposals and scheduled operations.
//!
//! Both identifier spaces are blake3 digests over a domain-tagged,
//! length-prefixed encoding of their inputs, so identical content always
//! yields the identical fingerprint and the two spaces cannot collide.

use crate::action::CallAction;
use crate::hash::Hash;
use std::fmt;

const PROPOSAL_DOMAIN: &[u8] = b"conclave/proposal/v1";
const OPERATION_DOMAIN: &[u8] = b"conclave/operation/v1";

/// Fingerprint identifying a proposal by its content.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ProposalId(Hash);

impl ProposalId {
    pub const ZERO: Self = Self(Hash::ZERO);

    pub const fn from_hash(hash: Hash) -> Self {
        Self(hash)
    }

    pub const fn as_hash(&self) -> &Hash {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Derive the fingerprint from the proposal's ordered actions and the
    /// hash of its human-readable description.
    pub fn derive(actions: &[CallAction], description_hash: Hash) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(PROPOSAL_DOMAIN);
        hasher.update(&(actions.len() as u64).to_le_bytes());
        for action in actions {
            action.write_to(&mut hasher);
        }
        hasher.update(description_hash.as_bytes());
        Self(Hash::from_bytes(*hasher.finalize().as_bytes()))
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalId({})", self.0)
    }
}

/// Fingerprint identifying a scheduled operation by its content.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OperationId(Hash);

impl OperationId {
    pub const ZERO: Self = Self(Hash::ZERO);

    pub const fn from_hash(hash: Hash) -> Self {
        Self(hash)
    }

    pub const fn as_hash(&self) -> &Hash {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Derive the fingerprint from a single call, an optional predecessor
    /// operation (zero if none), and a salt.
    pub fn derive(action: &CallAction, predecessor: Option<OperationId>, salt: Hash) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(OPERATION_DOMAIN);
        action.write_to(&mut hasher);
        let pred = predecessor.unwrap_or(OperationId::ZERO);
        hasher.update(pred.as_hash().as_bytes());
        hasher.update(salt.as_bytes());
        Self(Hash::from_bytes(*hasher.finalize().as_bytes()))
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OperationId({})", self.0)
    }
}
