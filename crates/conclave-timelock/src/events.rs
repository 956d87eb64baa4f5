//! Emitted facts for off-chain bookkeeping.

use conclave_types::{Address, CallAction, Hash, OperationId};

use crate::roles::Role;

/// Facts the gate emits as operations and grants change.
#[derive(Debug, Clone, PartialEq)]
pub enum GateEvent {
    OperationScheduled {
        id: OperationId,
        action: CallAction,
        predecessor: Option<OperationId>,
        salt: Hash,
        delay: u64,
        ready_at: u64,
    },
    OperationExecuted {
        id: OperationId,
    },
    RoleGranted {
        role: Role,
        account: Address,
        by: Address,
    },
    RoleRevoked {
        role: Role,
        account: Address,
        by: Address,
    },
}
