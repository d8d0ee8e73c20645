//! Engine result types.

use kasira_core::transaction::FinancialTransaction;
use kasira_shared::types::TransactionId;
use rust_decimal::Decimal;
use serde::Serialize;

/// A pending transaction paired with the reviewing actor's rights.
#[derive(Debug, Clone, Serialize)]
pub struct PendingReview {
    /// The pending transaction.
    pub transaction: FinancialTransaction,
    /// Whether the reviewing actor passes both authorization gates for it.
    pub can_validate: bool,
}

/// Result of a quick-action batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QuickActionOutcome {
    /// Records mutated by the run.
    pub affected: usize,
    /// Records that matched but failed and were skipped (best-effort mode).
    pub skipped: usize,
}

/// Result for a single transaction in a bulk approval.
#[derive(Debug, Clone, Serialize)]
pub struct BulkItemOutcome {
    /// Transaction ID.
    pub transaction_id: TransactionId,
    /// Whether the approval succeeded.
    pub success: bool,
    /// Error message if failed.
    pub error: Option<String>,
}

/// Result of a bulk approval operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkOutcome {
    /// Results for each transaction.
    pub results: Vec<BulkItemOutcome>,
    /// Number of successful approvals.
    pub success_count: usize,
    /// Number of failed approvals.
    pub failure_count: usize,
}

/// Status counts and totals for dashboard-style reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Number of pending records.
    pub pending_count: usize,
    /// Number of approved records.
    pub approved_count: usize,
    /// Number of rejected records.
    pub rejected_count: usize,
    /// Number of records sent back for revision.
    pub needs_revision_count: usize,
    /// Total amount awaiting validation.
    pub pending_total: Decimal,
    /// Total amount approved.
    pub approved_total: Decimal,
}
