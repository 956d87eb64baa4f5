//! The execution gate: schedule behind a delay, execute when ready.
//!
//! Scheduling requires the proposer role. Execution requires the executor
//! role, which is normally granted to the zero-address sentinel so that
//! once the delay has elapsed no party can censor an approved decision.

use std::collections::HashMap;

use conclave_types::{Address, CallAction, Hash, OperationId};
use tracing::{debug, info, warn};

use crate::error::TimelockError;
use crate::events::GateEvent;
use crate::operation::{OperationEntry, OperationState};
use crate::roles::{Role, RoleTable};

/// Seam to the governed target: delivers one forwarded call.
///
/// Implementations interpret `action.data` however the target dictates.
/// A returned `Err` propagates as `TargetCallReverted` and leaves the
/// operation pending.
pub trait Dispatcher {
    fn dispatch(&mut self, action: &CallAction) -> Result<Vec<u8>, String>;
}

/// Delay-enforcing scheduler for governed calls.
#[derive(Debug)]
pub struct Timelock {
    /// The gate's own identity; holds its own admin grant after bootstrap
    address: Address,
    /// Minimum delay between scheduling and readiness
    min_delay: u64,
    /// Scheduled and completed operations by fingerprint
    operations: HashMap<OperationId, OperationEntry>,
    /// Role grants
    roles: RoleTable,
    /// Emitted facts, in order
    events: Vec<GateEvent>,
}

impl Timelock {
    /// Create a gate administered by `admin` (typically the deployer, whose
    /// grant is revoked again once binding completes).
    pub fn new(address: Address, min_delay: u64, admin: Address) -> Self {
        let mut roles = RoleTable::new();
        roles.grant(Role::Admin, admin);

        Self {
            address,
            min_delay,
            operations: HashMap::new(),
            roles,
            events: vec![GateEvent::RoleGranted {
                role: Role::Admin,
                account: admin,
                by: admin,
            }],
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn min_delay(&self) -> u64 {
        self.min_delay
    }

    /// Pure fingerprint derivation for an operation.
    pub fn hash_operation(
        action: &CallAction,
        predecessor: Option<OperationId>,
        salt: Hash,
    ) -> OperationId {
        OperationId::derive(action, predecessor, salt)
    }

    /// Lifecycle state of an operation as of `now`.
    pub fn operation_state(&self, id: &OperationId, now: u64) -> OperationState {
        match self.operations.get(id) {
            Some(entry) => entry.state(now),
            None => OperationState::Unset,
        }
    }

    pub fn is_operation_ready(&self, id: &OperationId, now: u64) -> bool {
        self.operation_state(id, now) == OperationState::Ready
    }

    pub fn is_operation_done(&self, id: &OperationId) -> bool {
        matches!(self.operations.get(id), Some(entry) if entry.done)
    }

    /// Ready timestamp of an operation, if it exists.
    pub fn get_timestamp(&self, id: &OperationId) -> Option<u64> {
        self.operations.get(id).map(|e| e.ready_at)
    }

    /// Schedule an operation to become executable after `delay`.
    pub fn schedule(
        &mut self,
        caller: Address,
        action: CallAction,
        predecessor: Option<OperationId>,
        salt: Hash,
        delay: u64,
        now: u64,
    ) -> Result<OperationId, TimelockError> {
        self.require_role(Role::Proposer, caller)?;

        let id = Self::hash_operation(&action, predecessor, salt);
        if self.operations.contains_key(&id) {
            return Err(TimelockError::AlreadyScheduled(id));
        }

        if delay < self.min_delay {
            return Err(TimelockError::DelayTooShort {
                delay,
                min_delay: self.min_delay,
            });
        }

        let ready_at = now.saturating_add(delay);
        self.operations.insert(id, OperationEntry::new(ready_at));

        info!(%id, target = %action.target, delay, ready_at, "operation scheduled");
        self.events.push(GateEvent::OperationScheduled {
            id,
            action,
            predecessor,
            salt,
            delay,
            ready_at,
        });

        Ok(id)
    }

    /// Execute a ready operation, forwarding the call to the target.
    ///
    /// The operation is marked done only after the forwarded call succeeds;
    /// a reverting target leaves it pending and re-executable.
    pub fn execute<D: Dispatcher>(
        &mut self,
        caller: Address,
        action: &CallAction,
        predecessor: Option<OperationId>,
        salt: Hash,
        now: u64,
        dispatcher: &mut D,
    ) -> Result<Vec<u8>, TimelockError> {
        self.require_role(Role::Executor, caller)?;

        let id = Self::hash_operation(action, predecessor, salt);
        let entry = self
            .operations
            .get(&id)
            .ok_or(TimelockError::UnknownOperation(id))?;

        if entry.done {
            return Err(TimelockError::AlreadyDone(id));
        }
        if now < entry.ready_at {
            return Err(TimelockError::NotReady {
                ready_at: entry.ready_at,
                now,
            });
        }
        if let Some(pred) = predecessor {
            if !pred.is_zero() && !self.is_operation_done(&pred) {
                return Err(TimelockError::PredecessorNotDone(pred));
            }
        }

        let output = dispatcher.dispatch(action).map_err(|reason| {
            warn!(%id, target = %action.target, %reason, "forwarded call reverted");
            TimelockError::TargetCallReverted(reason)
        })?;

        // Reachable: the entry was present above and nothing removed it.
        if let Some(entry) = self.operations.get_mut(&id) {
            entry.done = true;
        }

        info!(%id, target = %action.target, "operation executed");
        self.events.push(GateEvent::OperationExecuted { id });

        Ok(output)
    }

    /// Grant `role` to `account`. Caller must hold the admin role.
    pub fn grant_role(
        &mut self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), TimelockError> {
        self.require_role(Role::Admin, caller)?;

        if self.roles.grant(role, account) {
            debug!(role = role.as_str(), account = %account, by = %caller, "role granted");
            self.events.push(GateEvent::RoleGranted {
                role,
                account,
                by: caller,
            });
        }
        Ok(())
    }

    /// Revoke `role` from `account`. Caller must hold the admin role.
    pub fn revoke_role(
        &mut self,
        caller: Address,
        role: Role,
        account: Address,
    ) -> Result<(), TimelockError> {
        self.require_role(Role::Admin, caller)?;

        if self.roles.revoke(role, account) {
            debug!(role = role.as_str(), account = %account, by = %caller, "role revoked");
            self.events.push(GateEvent::RoleRevoked {
                role,
                account,
                by: caller,
            });
        }
        Ok(())
    }

    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.roles.has_role(role, account)
    }

    /// Emitted facts so far, in order.
    pub fn events(&self) -> &[GateEvent] {
        &self.events
    }

    /// Take and clear the emitted facts.
    pub fn drain_events(&mut self) -> Vec<GateEvent> {
        std::mem::take(&mut self.events)
    }

    fn require_role(&self, role: Role, account: Address) -> Result<(), TimelockError> {
        if self.roles.has_role(role, &account) {
            Ok(())
        } else {
            Err(TimelockError::Unauthorized { role, account })
        }
    }
}
