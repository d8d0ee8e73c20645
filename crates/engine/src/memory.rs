//! In-memory transaction store.
//!
//! Backs the test suites and the demo binary. Interior mutability via
//! `DashMap` keeps the trait's `&self` contract without locks at the
//! call sites.

use dashmap::DashMap;
use kasira_core::transaction::FinancialTransaction;
use kasira_shared::types::TransactionId;

use crate::store::{StoreError, TransactionFilter, TransactionStore};

/// Map-backed store with no durability.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: DashMap<TransactionId, FinancialTransaction>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl TransactionStore for InMemoryStore {
    fn find(&self, id: TransactionId) -> Result<Option<FinancialTransaction>, StoreError> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    fn query(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<FinancialTransaction>, StoreError> {
        let mut result: Vec<FinancialTransaction> = self
            .records
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    fn save(&self, tx: &FinancialTransaction) -> Result<(), StoreError> {
        self.records.insert(tx.id, tx.clone());
        Ok(())
    }
}
