//! Workflow service for validation status transitions.
//!
//! This module implements the core state machine logic for moving
//! transactions through the validation workflow.

use chrono::Utc;
use kasira_shared::types::ActorId;

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ValidationAction, ValidationStatus};

/// Default note recorded when an approver supplies none.
pub const DEFAULT_APPROVAL_NOTE: &str = "Approved";

/// Stateless service for managing validation workflow transitions.
///
/// All methods are associated functions that validate and execute
/// state transitions, returning the appropriate `ValidationAction`
/// with audit trail information.
pub struct WorkflowService;

impl WorkflowService {
    /// Approve a pending transaction.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the transaction
    /// * `validated_by` - The actor approving the transaction
    /// * `note` - Optional note; defaults to [`DEFAULT_APPROVAL_NOTE`]
    ///
    /// # Returns
    /// * `Ok(ValidationAction::Approve)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not in Pending status
    pub fn approve(
        current_status: ValidationStatus,
        validated_by: ActorId,
        note: Option<String>,
    ) -> Result<ValidationAction, WorkflowError> {
        match current_status {
            ValidationStatus::Pending => Ok(ValidationAction::Approve {
                new_status: ValidationStatus::Approved,
                validated_by,
                validated_at: Utc::now(),
                note: note
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_APPROVAL_NOTE.to_string()),
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: ValidationStatus::Approved,
            }),
        }
    }

    /// Reject a pending transaction.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the transaction
    /// * `validated_by` - The actor rejecting the transaction
    /// * `reason` - The reason for rejection (required)
    ///
    /// # Returns
    /// * `Ok(ValidationAction::Reject)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not in Pending status
    /// * `Err(WorkflowError::RejectionReasonRequired)` if reason is empty
    pub fn reject(
        current_status: ValidationStatus,
        validated_by: ActorId,
        reason: String,
    ) -> Result<ValidationAction, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::RejectionReasonRequired);
        }

        match current_status {
            ValidationStatus::Pending => Ok(ValidationAction::Reject {
                new_status: ValidationStatus::Rejected,
                validated_by,
                validated_at: Utc::now(),
                reason,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: ValidationStatus::Rejected,
            }),
        }
    }

    /// Send a pending transaction back for revision.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the transaction
    /// * `validated_by` - The actor requesting the revision
    /// * `notes` - What the submitter must revise (required)
    ///
    /// # Returns
    /// * `Ok(ValidationAction::RequestRevision)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if not in Pending status
    /// * `Err(WorkflowError::RevisionNotesRequired)` if notes are empty
    pub fn request_revision(
        current_status: ValidationStatus,
        validated_by: ActorId,
        notes: String,
    ) -> Result<ValidationAction, WorkflowError> {
        if notes.trim().is_empty() {
            return Err(WorkflowError::RevisionNotesRequired);
        }

        match current_status {
            ValidationStatus::Pending => Ok(ValidationAction::RequestRevision {
                new_status: ValidationStatus::NeedsRevision,
                validated_by,
                validated_at: Utc::now(),
                notes,
            }),
            _ => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: ValidationStatus::NeedsRevision,
            }),
        }
    }

    /// Revert a validated transaction back to pending.
    ///
    /// Valid from any validated state. Clears the validator audit pair
    /// and records who reverted and why as an appended system note.
    ///
    /// # Arguments
    /// * `current_status` - The current status of the transaction
    /// * `reverted_by` - The actor reverting the transaction
    /// * `reason` - The reason for reverting (required)
    ///
    /// # Returns
    /// * `Ok(ValidationAction::RevertToPending)` if the transition is valid
    /// * `Err(WorkflowError::InvalidTransition)` if already Pending
    /// * `Err(WorkflowError::RevertReasonRequired)` if reason is empty
    pub fn revert_to_pending(
        current_status: ValidationStatus,
        reverted_by: ActorId,
        reason: String,
    ) -> Result<ValidationAction, WorkflowError> {
        if reason.trim().is_empty() {
            return Err(WorkflowError::RevertReasonRequired);
        }

        match current_status {
            ValidationStatus::Approved
            | ValidationStatus::Rejected
            | ValidationStatus::NeedsRevision => Ok(ValidationAction::RevertToPending {
                new_status: ValidationStatus::Pending,
                reverted_by,
                reverted_at: Utc::now(),
                reason,
            }),
            ValidationStatus::Pending => Err(WorkflowError::InvalidTransition {
                from: current_status,
                to: ValidationStatus::Pending,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Rejected (reject)
    /// - Pending → NeedsRevision (request revision)
    /// - Approved/Rejected/NeedsRevision → Pending (revert)
    #[must_use]
    pub fn is_valid_transition(from: ValidationStatus, to: ValidationStatus) -> bool {
        matches!(
            (from, to),
            (
                ValidationStatus::Pending,
                ValidationStatus::Approved
                    | ValidationStatus::Rejected
                    | ValidationStatus::NeedsRevision
            ) | (
                ValidationStatus::Approved
                    | ValidationStatus::Rejected
                    | ValidationStatus::NeedsRevision,
                ValidationStatus::Pending
            )
        )
    }
}
