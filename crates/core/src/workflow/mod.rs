//! Transaction validation workflow for Kasira.
//!
//! This module implements the validation lifecycle state machine and the
//! role/amount authorization gates applied before status changes.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (ValidationStatus, ValidationAction)
//! - `error` - Workflow-specific error types
//! - `service` - State transition logic
//! - `gates` - Role hierarchy and amount-tier authorization

pub mod error;
pub mod gates;
pub mod service;
pub mod types;

#[cfg(test)]
mod gates_props;
#[cfg(test)]
mod service_props;

pub use error::WorkflowError;
pub use gates::{StaffRole, ValidationGate};
pub use service::WorkflowService;
pub use types::{ValidationAction, ValidationStatus};
