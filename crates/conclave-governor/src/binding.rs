//! Wiring the governor to its execution gate.
//!
//! After binding, the gate administers itself: role changes can only be
//! enacted by a proposal that passes a vote and waits out the delay, and
//! the deployer retains no special power.

use conclave_timelock::{Role, Timelock, TimelockError};
use conclave_types::Address;
use tracing::info;

/// Hand control of `timelock` to `governor` and renounce the deployer.
///
/// Order matters: the gate must become its own admin before the deployer's
/// grant is revoked, otherwise the role table would be left with no admin
/// at all. Execution is opened to everyone via the zero-address sentinel.
pub fn bind_governor(
    timelock: &mut Timelock,
    deployer: Address,
    governor: Address,
) -> Result<(), TimelockError> {
    timelock.grant_role(deployer, Role::Proposer, governor)?;
    timelock.grant_role(deployer, Role::Executor, Address::ZERO)?;
    timelock.grant_role(deployer, Role::Admin, timelock.address())?;
    timelock.revoke_role(deployer, Role::Admin, deployer)?;

    info!(governor = %governor, gate = %timelock.address(), "governor bound to execution gate");
    Ok(())
}
