//! Role-based authorization as a capability table.
//!
//! A grant is a `(role, account)` pair. Granting a role to the zero address
//! opens it to any caller: that sentinel is how execution is left
//! permissionless once an operation's delay has elapsed.

use std::collections::HashSet;

use conclave_types::Address;

/// Capabilities on the execution gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// May grant and revoke roles
    Admin,
    /// May schedule operations
    Proposer,
    /// May execute ready operations
    Executor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Proposer => "proposer",
            Role::Executor => "executor",
        }
    }
}

/// Grant table keyed by `(role, account)`.
#[derive(Debug, Default, Clone)]
pub struct RoleTable {
    grants: HashSet<(Role, Address)>,
}

impl RoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a grant. Idempotent; returns true if it was new.
    pub fn grant(&mut self, role: Role, account: Address) -> bool {
        self.grants.insert((role, account))
    }

    /// Remove a grant. Returns true if it existed.
    pub fn revoke(&mut self, role: Role, account: Address) -> bool {
        self.grants.remove(&(role, account))
    }

    /// Whether `account` holds `role`, directly or via the open sentinel.
    pub fn has_role(&self, role: Role, account: &Address) -> bool {
        self.grants.contains(&(role, *account)) || self.is_open(role)
    }

    /// Whether `role` is open to anyone (granted to the zero address).
    pub fn is_open(&self, role: Role) -> bool {
        self.grants.contains(&(role, Address::ZERO))
    }
}
