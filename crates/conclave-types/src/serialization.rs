//! Serialization implementations for conclave-types
//!
//! String-based serde representations: addresses as Bech32m, hashes and
//! fingerprints as 0x-prefixed hex.

use crate::*;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// Hash
impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Hash::from_str(&s).map_err(serde::de::Error::custom)
    }
}

// Address
impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_string().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}

// ProposalId
impl Serialize for ProposalId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_hash().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ProposalId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(ProposalId::from_hash(Hash::deserialize(deserializer)?))
    }
}

// OperationId
impl Serialize for OperationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_hash().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for OperationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(OperationId::from_hash(Hash::deserialize(deserializer)?))
    }
}

// CallAction
#[derive(Serialize, Deserialize)]
struct CallActionRepr {
    target: Address,
    value: u128,
    data: String,
}

impl Serialize for CallAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CallActionRepr {
            target: self.target,
            value: self.value,
            data: format!("0x{}", hex::encode(&self.data)),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for CallAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = CallActionRepr::deserialize(deserializer)?;
        let s = repr.data.strip_prefix("0x").unwrap_or(&repr.data);
        let data = hex::decode(s).map_err(serde::de::Error::custom)?;
        Ok(CallAction::new(repr.target, repr.value, data))
    }
}
