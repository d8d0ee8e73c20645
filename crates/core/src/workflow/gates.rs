//! Authorization gates for transaction validation.
//!
//! Two orthogonal checks run before any status-changing transition:
//! the role gate (validation requires supervisor or higher) and the
//! amount-tier gate (high-value amounts require manager or higher).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::error::WorkflowError;

/// Staff role in the clinic back-office hierarchy.
///
/// Roles are ordered from lowest to highest privilege.
/// Higher roles can perform all actions of lower roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    /// Front-office staff; submits transactions, cannot validate.
    Staff = 0,
    /// Can validate transactions up to the high-value threshold.
    Supervisor = 1,
    /// Treasurer; same validation rights as supervisor plus reporting.
    Treasurer = 2,
    /// Can validate any transaction, including high-value ones.
    Manager = 3,
    /// Full access.
    Admin = 4,
}

impl StaffRole {
    /// Parses a role from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "staff" => Some(Self::Staff),
            "supervisor" => Some(Self::Supervisor),
            "treasurer" => Some(Self::Treasurer),
            "manager" => Some(Self::Manager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Supervisor => "supervisor",
            Self::Treasurer => "treasurer",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }

    /// Returns true if this role may validate financial transactions at all.
    #[must_use]
    pub fn can_validate(&self) -> bool {
        *self >= Self::Supervisor
    }

    /// Returns true if this role may validate high-value transactions.
    #[must_use]
    pub fn can_validate_high_value(&self) -> bool {
        *self >= Self::Manager
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stateless gate evaluating role and amount-tier authorization.
pub struct ValidationGate;

impl ValidationGate {
    /// Checks whether `role` may change the validation status of a
    /// transaction with the given `amount`.
    ///
    /// # Arguments
    /// * `role` - The acting staff role
    /// * `amount` - The transaction amount
    /// * `high_value_threshold` - Amounts strictly above this require
    ///   manager-level approval
    ///
    /// # Returns
    /// * `Ok(())` if both gates pass
    /// * `Err(WorkflowError::NoValidationRole)` if the role cannot validate
    /// * `Err(WorkflowError::RequiresManagerApproval)` if the amount is
    ///   above the threshold and the role is below manager
    pub fn check(
        role: StaffRole,
        amount: Decimal,
        high_value_threshold: Decimal,
    ) -> Result<(), WorkflowError> {
        if !role.can_validate() {
            return Err(WorkflowError::NoValidationRole { role });
        }

        if amount > high_value_threshold && !role.can_validate_high_value() {
            return Err(WorkflowError::RequiresManagerApproval {
                amount,
                threshold: high_value_threshold,
            });
        }

        Ok(())
    }
}
