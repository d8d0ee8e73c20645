//! The financial transaction entity.
//!
//! Income (pendapatan) and expense (pengeluaran) records share one
//! lifecycle; the only difference is the [`TransactionKind`] tag.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use kasira_shared::types::{ActorId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::workflow::types::{ValidationAction, ValidationStatus};

/// Kind of financial transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Revenue record (pendapatan).
    Income,
    /// Spending record (pengeluaran).
    Expense,
}

impl TransactionKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Parses a kind from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A financial transaction moving through the validation workflow.
///
/// Invariants:
/// - `validated_by` and `validated_at` are both present or both absent.
/// - `validation_note` is append-only (newline-separated); only the
///   lifecycle transition that sets it may replace it wholesale.
/// - `amount` is non-negative; zero is permitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialTransaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Monetary nominal; non-negative.
    pub amount: Decimal,
    /// Category tag (e.g. "konsultasi", "operasional").
    pub category: String,
    /// Calendar date the transaction is attributed to.
    pub occurred_on: NaiveDate,
    /// The staff actor who created the record.
    pub submitted_by: ActorId,
    /// Current validation status.
    pub status: ValidationStatus,
    /// The actor who last changed the status away from Pending.
    pub validated_by: Option<ActorId>,
    /// When the status last changed away from Pending.
    pub validated_at: Option<DateTime<Utc>>,
    /// Append-only log of human-readable annotations.
    pub validation_note: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl FinancialTransaction {
    /// Creates a new pending transaction.
    #[must_use]
    pub fn new(
        kind: TransactionKind,
        amount: Decimal,
        category: impl Into<String>,
        occurred_on: NaiveDate,
        submitted_by: ActorId,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            kind,
            amount,
            category: category.into(),
            occurred_on,
            submitted_by,
            status: ValidationStatus::Pending,
            validated_by: None,
            validated_at: None,
            validation_note: None,
            created_at: Utc::now(),
        }
    }

    /// Appends a note line, separated from prior notes by a newline.
    pub fn append_note(&mut self, text: &str) {
        self.validation_note = Some(match self.validation_note.take() {
            Some(existing) => format!("{existing}\n{text}"),
            None => text.to_string(),
        });
    }

    /// Returns true if the note log already contains `line` as a full line.
    #[must_use]
    pub fn has_note_line(&self, line: &str) -> bool {
        self.validation_note
            .as_deref()
            .is_some_and(|notes| notes.lines().any(|l| l == line))
    }

    /// Returns true if the transaction is attributed to a weekend date.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.occurred_on.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Applies a validation action to this record.
    ///
    /// Status-setting actions replace the note wholesale; the revert
    /// action clears the validator pair and appends a system note.
    pub fn apply(&mut self, action: &ValidationAction) {
        match action {
            ValidationAction::Approve {
                new_status,
                validated_by,
                validated_at,
                note,
            } => {
                self.status = *new_status;
                self.validated_by = Some(*validated_by);
                self.validated_at = Some(*validated_at);
                self.validation_note = Some(note.clone());
            }
            ValidationAction::Reject {
                new_status,
                validated_by,
                validated_at,
                reason,
            } => {
                self.status = *new_status;
                self.validated_by = Some(*validated_by);
                self.validated_at = Some(*validated_at);
                self.validation_note = Some(reason.clone());
            }
            ValidationAction::RequestRevision {
                new_status,
                validated_by,
                validated_at,
                notes,
            } => {
                self.status = *new_status;
                self.validated_by = Some(*validated_by);
                self.validated_at = Some(*validated_at);
                self.validation_note = Some(notes.clone());
            }
            ValidationAction::RevertToPending {
                new_status,
                reverted_by,
                reason,
                ..
            } => {
                self.status = *new_status;
                self.validated_by = None;
                self.validated_at = None;
                self.append_note(&format!("Reverted to pending by {reverted_by}: {reason}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::service::WorkflowService;
    use rust_decimal_macros::dec;

    fn expense(amount: Decimal, occurred_on: NaiveDate) -> FinancialTransaction {
        FinancialTransaction::new(
            TransactionKind::Expense,
            amount,
            "operasional",
            occurred_on,
            ActorId::new(),
        )
    }

    #[test]
    fn test_new_transaction_is_pending() {
        let tx = expense(dec!(100_000), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(tx.status, ValidationStatus::Pending);
        assert!(tx.validated_by.is_none());
        assert!(tx.validated_at.is_none());
        assert!(tx.validation_note.is_none());
    }

    #[test]
    fn test_append_note_preserves_order() {
        let mut tx = expense(dec!(100_000), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        tx.append_note("A");
        tx.append_note("B");
        assert_eq!(tx.validation_note.as_deref(), Some("A\nB"));
    }

    #[test]
    fn test_has_note_line_matches_full_lines_only() {
        let mut tx = expense(dec!(100_000), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        tx.append_note("High Value");
        tx.append_note("Another note");
        assert!(tx.has_note_line("High Value"));
        assert!(!tx.has_note_line("High"));
        assert!(!tx.has_note_line("Ultra High Value"));
    }

    #[test]
    fn test_is_weekend() {
        // 2025-03-08 is a Saturday, 2025-03-10 a Monday.
        let sat = expense(dec!(100_000), NaiveDate::from_ymd_opt(2025, 3, 8).unwrap());
        let mon = expense(dec!(100_000), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert!(sat.is_weekend());
        assert!(!mon.is_weekend());
    }

    #[test]
    fn test_apply_approve_sets_validator_pair() {
        let mut tx = expense(dec!(100_000), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let validator = ActorId::new();
        let action = WorkflowService::approve(tx.status, validator, None).unwrap();
        tx.apply(&action);

        assert_eq!(tx.status, ValidationStatus::Approved);
        assert_eq!(tx.validated_by, Some(validator));
        assert!(tx.validated_at.is_some());
        assert_eq!(tx.validation_note.as_deref(), Some("Approved"));
    }

    #[test]
    fn test_apply_revert_clears_validator_pair() {
        let mut tx = expense(dec!(100_000), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        let validator = ActorId::new();
        let approve = WorkflowService::approve(tx.status, validator, None).unwrap();
        tx.apply(&approve);

        let reverter = ActorId::new();
        let revert =
            WorkflowService::revert_to_pending(tx.status, reverter, "Wrong month".to_string())
                .unwrap();
        tx.apply(&revert);

        assert_eq!(tx.status, ValidationStatus::Pending);
        assert!(tx.validated_by.is_none());
        assert!(tx.validated_at.is_none());
        // The system note records who reverted and why, after the prior note.
        let note = tx.validation_note.as_deref().unwrap();
        assert!(note.starts_with("Approved\n"));
        assert!(note.contains("Reverted to pending by"));
        assert!(note.contains("Wrong month"));
    }

    #[test]
    fn test_apply_reject_replaces_note() {
        let mut tx = expense(dec!(100_000), NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        tx.append_note("earlier annotation");
        let action =
            WorkflowService::reject(tx.status, ActorId::new(), "No receipt".to_string()).unwrap();
        tx.apply(&action);

        assert_eq!(tx.status, ValidationStatus::Rejected);
        assert_eq!(tx.validation_note.as_deref(), Some("No receipt"));
    }

    #[test]
    fn test_kind_round_trip() {
        assert_eq!(TransactionKind::parse("income"), Some(TransactionKind::Income));
        assert_eq!(
            TransactionKind::parse("EXPENSE"),
            Some(TransactionKind::Expense)
        );
        assert_eq!(TransactionKind::parse("transfer"), None);
        assert_eq!(TransactionKind::Income.to_string(), "income");
    }
}
