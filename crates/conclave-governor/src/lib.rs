//! Conclave Governor - Proposal registry and lifecycle engine.
//!
//! This crate provides:
//! - Content-derived proposal identity
//! - Snapshot-weighted vote tallies
//! - Pure proposal state derivation
//! - The queue/execute flow into the timelocked execution gate
//! - The authorization binding between governor and gate

pub mod binding;
pub mod config;
pub mod error;
pub mod events;
pub mod governor;
pub mod proposal;

pub use binding::bind_governor;
pub use config::GovernorConfig;
pub use error::GovernorError;
pub use events::GovernanceEvent;
pub use governor::Governor;
pub use proposal::{Proposal, ProposalState, VoteSupport};
