//! Workflow error types for transaction validation.
//!
//! This module defines all error types that can occur during
//! workflow operations such as status transitions and authorization.

use kasira_shared::types::{ActorId, TransactionId};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::workflow::gates::StaffRole;
use crate::workflow::types::ValidationStatus;

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: ValidationStatus,
        /// The attempted target status.
        to: ValidationStatus,
    },

    /// Actor's role is not allowed to validate financial transactions.
    #[error("Role {role} is not allowed to validate financial transactions")]
    NoValidationRole {
        /// The acting role.
        role: StaffRole,
    },

    /// Transaction amount requires manager-level approval.
    #[error("Amount {amount} exceeds the high-value threshold {threshold} and requires manager-level approval")]
    RequiresManagerApproval {
        /// The transaction amount.
        amount: Decimal,
        /// The configured high-value threshold.
        threshold: Decimal,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// Revision notes are required but not provided.
    #[error("Revision notes are required")]
    RevisionNotesRequired,

    /// Revert reason is required but not provided.
    #[error("Revert reason is required")]
    RevertReasonRequired,

    /// Note text is required but not provided.
    #[error("Note text is required")]
    NoteTextRequired,

    /// Transaction not found.
    #[error("Transaction {0} not found")]
    TransactionNotFound(TransactionId),

    /// Actor not found.
    #[error("Actor {0} not found")]
    ActorNotFound(ActorId),

    /// No acting identity available for the operation.
    #[error("No acting identity available")]
    NoActingIdentity,

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidTransition { .. }
            | Self::RejectionReasonRequired
            | Self::RevisionNotesRequired
            | Self::RevertReasonRequired
            | Self::NoteTextRequired => 400,

            Self::NoValidationRole { .. }
            | Self::RequiresManagerApproval { .. }
            | Self::NoActingIdentity => 403,

            Self::TransactionNotFound(_) | Self::ActorNotFound(_) => 404,

            Self::Storage(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::NoValidationRole { .. } => "NO_VALIDATION_ROLE",
            Self::RequiresManagerApproval { .. } => "REQUIRES_MANAGER_APPROVAL",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::RevisionNotesRequired => "REVISION_NOTES_REQUIRED",
            Self::RevertReasonRequired => "REVERT_REASON_REQUIRED",
            Self::NoteTextRequired => "NOTE_TEXT_REQUIRED",
            Self::TransactionNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::ActorNotFound(_) => "ACTOR_NOT_FOUND",
            Self::NoActingIdentity => "NO_ACTING_IDENTITY",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<WorkflowError> for kasira_shared::AppError {
    fn from(err: WorkflowError) -> Self {
        let message = err.to_string();
        match err {
            WorkflowError::InvalidTransition { .. }
            | WorkflowError::RejectionReasonRequired
            | WorkflowError::RevisionNotesRequired
            | WorkflowError::RevertReasonRequired
            | WorkflowError::NoteTextRequired => Self::Validation(message),

            WorkflowError::NoValidationRole { .. }
            | WorkflowError::RequiresManagerApproval { .. }
            | WorkflowError::NoActingIdentity => Self::Forbidden(message),

            WorkflowError::TransactionNotFound(_) | WorkflowError::ActorNotFound(_) => {
                Self::NotFound(message)
            }

            WorkflowError::Storage(_) => Self::Storage(message),
        }
    }
}
