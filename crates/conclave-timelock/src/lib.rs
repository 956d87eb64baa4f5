//! Conclave Timelock - Delay-enforcing execution gate.
//!
//! This crate provides:
//! - Operation scheduling behind a mandatory minimum delay
//! - The Unset -> Waiting -> Ready -> Done operation lifecycle
//! - Predecessor ordering between operations
//! - Role-based authorization with an open-role sentinel

pub mod error;
pub mod events;
pub mod gate;
pub mod operation;
pub mod roles;

pub use error::TimelockError;
pub use events::GateEvent;
pub use gate::{Dispatcher, Timelock};
pub use operation::OperationState;
pub use roles::{Role, RoleTable};
