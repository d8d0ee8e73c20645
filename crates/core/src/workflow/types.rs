//! Workflow domain types for transaction validation.
//!
//! This module defines the core types used for managing validation
//! status transitions and their audit trail.

use chrono::{DateTime, Utc};
use kasira_shared::types::ActorId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validation status of a financial transaction.
///
/// Transactions start at `Pending` and move to exactly one validated
/// state. The valid transitions are:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
/// - Pending → NeedsRevision (request revision)
/// - Approved/Rejected/NeedsRevision → Pending (revert)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// Transaction is awaiting validation.
    Pending,
    /// Transaction has been approved.
    Approved,
    /// Transaction has been rejected.
    Rejected,
    /// Transaction was sent back for revision by the submitter.
    NeedsRevision,
}

impl ValidationStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::NeedsRevision => "needs_revision",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "needs_revision" => Some(Self::NeedsRevision),
            _ => None,
        }
    }

    /// Returns true if the transaction is awaiting validation.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if a validator has decided on the transaction.
    #[must_use]
    pub fn is_validated(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow action representing a state transition with audit data.
///
/// Each variant captures the action performed, the resulting status,
/// and the audit trail information (who, when, why).
#[derive(Debug, Clone)]
pub enum ValidationAction {
    /// Approve a pending transaction.
    Approve {
        /// The new status after approval.
        new_status: ValidationStatus,
        /// The actor who approved the transaction.
        validated_by: ActorId,
        /// When the transaction was approved.
        validated_at: DateTime<Utc>,
        /// Approval note (defaults when the approver supplies none).
        note: String,
    },
    /// Reject a pending transaction.
    Reject {
        /// The new status after rejection.
        new_status: ValidationStatus,
        /// The actor who rejected the transaction.
        validated_by: ActorId,
        /// When the transaction was rejected.
        validated_at: DateTime<Utc>,
        /// The reason for rejection.
        reason: String,
    },
    /// Send a pending transaction back for revision.
    RequestRevision {
        /// The new status after the revision request.
        new_status: ValidationStatus,
        /// The actor who requested the revision.
        validated_by: ActorId,
        /// When the revision was requested.
        validated_at: DateTime<Utc>,
        /// What the submitter must revise.
        notes: String,
    },
    /// Revert a validated transaction back to pending.
    RevertToPending {
        /// The new status after the revert (Pending).
        new_status: ValidationStatus,
        /// The actor who reverted the transaction.
        reverted_by: ActorId,
        /// When the transaction was reverted.
        reverted_at: DateTime<Utc>,
        /// The reason for reverting.
        reason: String,
    },
}

impl ValidationAction {
    /// Returns the new status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> ValidationStatus {
        match self {
            Self::Approve { new_status, .. }
            | Self::Reject { new_status, .. }
            | Self::RequestRevision { new_status, .. }
            | Self::RevertToPending { new_status, .. } => *new_status,
        }
    }
}
