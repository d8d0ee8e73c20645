//! The transaction store contract.
//!
//! Persistence is an external collaborator; the engine only needs
//! `find`, `query`, and `save` with read-your-writes consistency.

use chrono::NaiveDate;
use kasira_core::budget::CalendarMonth;
use kasira_core::transaction::{FinancialTransaction, TransactionKind};
use kasira_core::workflow::ValidationStatus;
use kasira_shared::types::{ActorId, TransactionId};
use thiserror::Error;

/// Errors surfaced by a transaction store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed to serve the request.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Filter for querying transactions. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Restrict to one transaction kind.
    pub kind: Option<TransactionKind>,
    /// Restrict to one validation status.
    pub status: Option<ValidationStatus>,
    /// Exclude one validation status.
    pub exclude_status: Option<ValidationStatus>,
    /// Restrict to one category.
    pub category: Option<String>,
    /// Restrict to records attributed to this calendar month.
    pub occurred_in: Option<CalendarMonth>,
    /// Restrict to records submitted by this actor.
    pub submitted_by: Option<ActorId>,
    /// Restrict to records attributed on or after this date.
    pub occurred_on_or_after: Option<NaiveDate>,
    /// Restrict to records attributed on or before this date.
    pub occurred_on_or_before: Option<NaiveDate>,
    /// Exclude one record (e.g. the record being edited).
    pub exclude_id: Option<TransactionId>,
}

impl TransactionFilter {
    /// Returns true if `tx` matches every set field.
    #[must_use]
    pub fn matches(&self, tx: &FinancialTransaction) -> bool {
        if self.kind.is_some_and(|k| k != tx.kind) {
            return false;
        }
        if self.status.is_some_and(|s| s != tx.status) {
            return false;
        }
        if self.exclude_status.is_some_and(|s| s == tx.status) {
            return false;
        }
        if self
            .category
            .as_deref()
            .is_some_and(|c| c != tx.category.as_str())
        {
            return false;
        }
        if self
            .occurred_in
            .is_some_and(|m| !m.contains(tx.occurred_on))
        {
            return false;
        }
        if self.submitted_by.is_some_and(|a| a != tx.submitted_by) {
            return false;
        }
        if self
            .occurred_on_or_after
            .is_some_and(|d| tx.occurred_on < d)
        {
            return false;
        }
        if self
            .occurred_on_or_before
            .is_some_and(|d| tx.occurred_on > d)
        {
            return false;
        }
        if self.exclude_id.is_some_and(|id| id == tx.id) {
            return false;
        }
        true
    }
}

/// CRUD contract the engine requires from its persistence collaborator.
///
/// Implementations are expected to provide at-least read-your-writes
/// consistency; anything stronger (row locking, transactions) is the
/// backend's concern.
pub trait TransactionStore {
    /// Looks up a transaction by ID.
    fn find(&self, id: TransactionId) -> Result<Option<FinancialTransaction>, StoreError>;

    /// Returns all transactions matching the filter, newest first.
    fn query(&self, filter: &TransactionFilter) -> Result<Vec<FinancialTransaction>, StoreError>;

    /// Inserts or updates a transaction.
    fn save(&self, tx: &FinancialTransaction) -> Result<(), StoreError>;
}
