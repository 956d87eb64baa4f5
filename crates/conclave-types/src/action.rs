//! Encoded calls against a governed target.

use crate::address::Address;
use std::fmt;

/// One encoded call against an arbitrary target: the unit a proposal asks
/// governance to perform and the unit the execution gate forwards.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct CallAction {
    /// Target address the call is delivered to
    pub target: Address,
    /// Native value transferred with the call
    pub value: u128,
    /// Opaque encoded arguments, interpreted only by the target
    pub data: Vec<u8>,
}

impl CallAction {
    pub fn new(target: Address, value: u128, data: Vec<u8>) -> Self {
        Self {
            target,
            value,
            data,
        }
    }

    /// Feed the canonical encoding of this action into a hasher.
    ///
    /// Length-prefixes the data so adjacent fields cannot be confused.
    pub fn write_to(&self, hasher: &mut blake3::Hasher) {
        hasher.update(self.target.as_bytes());
        hasher.update(&self.value.to_le_bytes());
        hasher.update(&(self.data.len() as u64).to_le_bytes());
        hasher.update(&self.data);
    }
}

impl fmt::Debug for CallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CallAction {{ target: {:?}, value: {}, data: 0x{} }}",
            self.target,
            self.value,
            hex::encode(&self.data)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Hash;

    fn digest(action: &CallAction) -> Hash {
        let mut hasher = blake3::Hasher::new();
        action.write_to(&mut hasher);
        Hash::from_bytes(*hasher.finalize().as_bytes())
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let a = CallAction::new(Address::from_bytes([1u8; 20]), 5, vec![1, 2, 3]);
        assert_eq!(digest(&a), digest(&a.clone()));
    }

    #[test]
    fn test_encoding_separates_fields() {
        // Same concatenated bytes, different field split
        let a = CallAction::new(Address::from_bytes([1u8; 20]), 0, vec![1, 2]);
        let b = CallAction::new(Address::from_bytes([1u8; 20]), 0, vec![1, 2, 0]);
        assert_ne!(digest(&a), digest(&b));
    }
}
