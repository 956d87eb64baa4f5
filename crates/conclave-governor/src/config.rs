//! Governance parameters.

/// Tunable parameters of a governor instance.
///
/// Block-denominated windows govern the voting phase; the execution grace
/// is denominated in the gate's timestamp domain.
#[derive(Debug, Clone)]
pub struct GovernorConfig {
    /// Blocks between proposal creation and the start of voting
    pub voting_delay: u64,
    /// Blocks the voting window stays open
    pub voting_period: u64,
    /// Minimum voting power required to submit a proposal
    pub proposal_threshold: u128,
    /// Quorum as basis points of snapshot total supply (400 = 4%)
    pub quorum_bps: u16,
    /// Blocks after the deadline within which a succeeded proposal must be
    /// queued before it expires
    pub queue_window: u64,
    /// Seconds after an operation becomes ready within which a queued
    /// proposal must execute before it expires
    pub execution_grace: u64,
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            voting_delay: 1,
            voting_period: 100_800, // ~1 week at 6s blocks
            proposal_threshold: 0,
            quorum_bps: 400, // 4%
            queue_window: 100_800,
            execution_grace: 1_209_600, // 14 days
        }
    }
}
