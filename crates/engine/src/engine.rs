//! Validation engine orchestration.
//!
//! Every status-changing operation follows the same shape:
//! resolve actor → load record → state transition → authorization gates
//! → apply → save → notify. Batch operations iterate sequentially and
//! honor the configured [`BatchMode`].

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::{info, warn};

use kasira_core::analytics::{AnalyticsService, RiskScore};
use kasira_core::budget::{BudgetPolicy, BudgetService, BudgetVerdict, CalendarMonth};
use kasira_core::quick_actions::{ActionScope, QuickAction, QuickActionEffect, QuickActionRules};
use kasira_core::transaction::FinancialTransaction;
use kasira_core::workflow::{ValidationGate, ValidationStatus, WorkflowError, WorkflowService};
use kasira_shared::config::{AppConfig, BatchMode};
use kasira_shared::types::{ActorId, TransactionId};

use crate::identity::{Actor, IdentityProvider};
use crate::notify::{NotificationLevel, NotificationSink};
use crate::store::{StoreError, TransactionFilter, TransactionStore};
use crate::types::{
    BulkItemOutcome, BulkOutcome, PendingReview, QuickActionOutcome, ValidationSummary,
};

/// Engine configuration assembled from [`AppConfig`].
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Amounts strictly above this require manager-level approval.
    pub high_value_threshold: Decimal,
    /// Failure semantics for batch operations.
    pub batch_mode: BatchMode,
    /// Whether note-appending quick actions append on every run.
    pub append_duplicate_notes: bool,
    /// Monthly budget limits.
    pub budget: BudgetPolicy,
}

impl From<&AppConfig> for EngineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            high_value_threshold: config.engine.high_value_threshold,
            batch_mode: config.engine.batch_mode,
            append_duplicate_notes: config.engine.append_duplicate_notes,
            budget: BudgetPolicy::from(&config.budget),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// The validation workflow engine.
///
/// Generic over its three collaborators so callers can plug in real
/// persistence, identity, and delivery backends.
#[derive(Debug)]
pub struct ValidationEngine<S, I, N> {
    store: S,
    identity: I,
    notifier: N,
    config: EngineConfig,
}

impl<S, I, N> ValidationEngine<S, I, N>
where
    S: TransactionStore,
    I: IdentityProvider,
    N: NotificationSink,
{
    /// Creates an engine over the given collaborators.
    pub fn new(store: S, identity: I, notifier: N, config: EngineConfig) -> Self {
        Self {
            store,
            identity,
            notifier,
            config,
        }
    }

    /// The engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Direct access to the underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // ========================================================================
    // Single-record lifecycle operations
    // ========================================================================

    /// Approves a pending transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transaction or actor is not found
    /// - The transaction is not pending
    /// - The actor fails the role or amount-tier gate
    /// - The store rejects the save
    pub fn approve(
        &self,
        id: TransactionId,
        actor_id: ActorId,
        note: Option<String>,
    ) -> Result<FinancialTransaction, WorkflowError> {
        let actor = self.resolve(actor_id)?;
        let mut tx = self.load(id)?;

        let action = WorkflowService::approve(tx.status, actor.id, note)?;
        self.gate(&actor, tx.amount)?;

        tx.apply(&action);
        self.save(&tx)?;

        self.deliver(
            tx.submitted_by,
            &format!("Transaction {} approved", tx.id),
            NotificationLevel::Success,
        );
        Ok(tx)
    }

    /// Rejects a pending transaction with a required reason.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::approve`], plus
    /// `RejectionReasonRequired` when the reason is blank.
    pub fn reject(
        &self,
        id: TransactionId,
        actor_id: ActorId,
        reason: String,
    ) -> Result<FinancialTransaction, WorkflowError> {
        let actor = self.resolve(actor_id)?;
        let mut tx = self.load(id)?;

        let action = WorkflowService::reject(tx.status, actor.id, reason.clone())?;
        self.gate(&actor, tx.amount)?;

        tx.apply(&action);
        self.save(&tx)?;

        self.deliver(
            tx.submitted_by,
            &format!("Transaction {} rejected: {reason}", tx.id),
            NotificationLevel::Danger,
        );
        Ok(tx)
    }

    /// Sends a pending transaction back for revision.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::approve`], plus
    /// `RevisionNotesRequired` when the notes are blank.
    pub fn request_revision(
        &self,
        id: TransactionId,
        actor_id: ActorId,
        notes: String,
    ) -> Result<FinancialTransaction, WorkflowError> {
        let actor = self.resolve(actor_id)?;
        let mut tx = self.load(id)?;

        let action = WorkflowService::request_revision(tx.status, actor.id, notes.clone())?;
        self.gate(&actor, tx.amount)?;

        tx.apply(&action);
        self.save(&tx)?;

        self.deliver(
            tx.submitted_by,
            &format!("Transaction {} needs revision: {notes}", tx.id),
            NotificationLevel::Warning,
        );
        Ok(tx)
    }

    /// Reverts a validated transaction back to pending, clearing the
    /// validator audit pair and appending a system note.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::approve`], plus
    /// `RevertReasonRequired` when the reason is blank.
    pub fn revert_to_pending(
        &self,
        id: TransactionId,
        actor_id: ActorId,
        reason: String,
    ) -> Result<FinancialTransaction, WorkflowError> {
        let actor = self.resolve(actor_id)?;
        let mut tx = self.load(id)?;

        let action = WorkflowService::revert_to_pending(tx.status, actor.id, reason.clone())?;
        self.gate(&actor, tx.amount)?;

        tx.apply(&action);
        self.save(&tx)?;

        self.deliver(
            tx.submitted_by,
            &format!("Transaction {} reverted to pending: {reason}", tx.id),
            NotificationLevel::Warning,
        );
        Ok(tx)
    }

    /// Appends a timestamped note without changing the status.
    ///
    /// # Errors
    ///
    /// Returns `NoteTextRequired` when the text is blank, and the usual
    /// not-found/storage failures.
    pub fn add_note(
        &self,
        id: TransactionId,
        actor_id: ActorId,
        text: &str,
    ) -> Result<FinancialTransaction, WorkflowError> {
        if text.trim().is_empty() {
            return Err(WorkflowError::NoteTextRequired);
        }

        self.resolve(actor_id)?;
        let mut tx = self.load(id)?;

        tx.append_note(&format!(
            "[{}] {}",
            Utc::now().format("%Y-%m-%d %H:%M"),
            text.trim()
        ));
        self.save(&tx)?;
        Ok(tx)
    }

    // ========================================================================
    // Budget check
    // ========================================================================

    /// Computes the advisory budget verdict for a candidate amount.
    ///
    /// Current spend is the sum of all non-rejected transactions in the
    /// same category and calendar month, optionally excluding the record
    /// being edited. Never mutates state; callers decide whether an
    /// `Invalid` verdict blocks the save.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store query fails.
    pub fn check_budget(
        &self,
        category: &str,
        amount: Decimal,
        month: CalendarMonth,
        exclude_id: Option<TransactionId>,
    ) -> Result<BudgetVerdict, WorkflowError> {
        let filter = TransactionFilter {
            category: Some(category.to_string()),
            occurred_in: Some(month),
            exclude_status: Some(ValidationStatus::Rejected),
            exclude_id,
            ..TransactionFilter::default()
        };
        let records = self.store.query(&filter).map_err(storage_error)?;
        let current_spent: Decimal = records.iter().map(|t| t.amount).sum();

        Ok(BudgetService::check(
            amount,
            current_spent,
            self.config.budget.limit_for(category),
            self.config.budget.warning_utilization,
        ))
    }

    // ========================================================================
    // Batch operations
    // ========================================================================

    /// Runs a quick-action rule over the pending transactions in scope.
    ///
    /// Candidates are fetched once and processed one by one in a
    /// sequential loop. Under `BestEffort`, per-record failures are
    /// logged, counted as skipped, and do not stop the run; under
    /// `AllOrNothing`, any failure aborts before a single save.
    ///
    /// # Errors
    ///
    /// Returns `NoActingIdentity` when no current actor is set, store
    /// failures, and (in all-or-nothing mode) the first per-record error.
    pub fn run_quick_action(
        &self,
        action: QuickAction,
        scope: ActionScope,
    ) -> Result<QuickActionOutcome, WorkflowError> {
        let actor = self
            .identity
            .current_actor()
            .ok_or(WorkflowError::NoActingIdentity)?;

        let filter = TransactionFilter {
            status: Some(ValidationStatus::Pending),
            kind: scope.kind(),
            ..TransactionFilter::default()
        };
        let candidates = self.store.query(&filter).map_err(storage_error)?;

        let mut outcome = QuickActionOutcome::default();
        match self.config.batch_mode {
            BatchMode::BestEffort => {
                for mut tx in candidates {
                    let Some(effect) = QuickActionRules::evaluate(action, &tx) else {
                        continue;
                    };
                    match self
                        .stage_effect(&mut tx, &effect, &actor)
                        .and_then(|mutated| {
                            if mutated {
                                self.save(&tx).map(|()| true)
                            } else {
                                Ok(false)
                            }
                        }) {
                        Ok(true) => outcome.affected += 1,
                        Ok(false) => {}
                        Err(e) => {
                            warn!(transaction = %tx.id, error = %e, "quick action skipped record");
                            outcome.skipped += 1;
                        }
                    }
                }
            }
            BatchMode::AllOrNothing => {
                let mut staged = Vec::new();
                for mut tx in candidates {
                    let Some(effect) = QuickActionRules::evaluate(action, &tx) else {
                        continue;
                    };
                    if self.stage_effect(&mut tx, &effect, &actor)? {
                        staged.push(tx);
                    }
                }
                for tx in &staged {
                    self.save(tx)?;
                }
                outcome.affected = staged.len();
            }
        }

        info!(
            action = %action,
            affected = outcome.affected,
            skipped = outcome.skipped,
            "quick action completed"
        );
        Ok(outcome)
    }

    /// Approves a set of transactions on behalf of one actor.
    ///
    /// Under `BestEffort`, failing records are reported individually and
    /// the rest proceed; under `AllOrNothing`, the first failure aborts
    /// before any save.
    ///
    /// # Errors
    ///
    /// Returns `ActorNotFound` when the actor is unknown, and in
    /// all-or-nothing mode the first per-record error.
    pub fn bulk_approve(
        &self,
        ids: &[TransactionId],
        actor_id: ActorId,
        note: Option<String>,
    ) -> Result<BulkOutcome, WorkflowError> {
        let actor = self.resolve(actor_id)?;
        let mut outcome = BulkOutcome::default();

        match self.config.batch_mode {
            BatchMode::BestEffort => {
                for &id in ids {
                    match self.approve(id, actor_id, note.clone()) {
                        Ok(_) => {
                            outcome.success_count += 1;
                            outcome.results.push(BulkItemOutcome {
                                transaction_id: id,
                                success: true,
                                error: None,
                            });
                        }
                        Err(e) => {
                            outcome.failure_count += 1;
                            outcome.results.push(BulkItemOutcome {
                                transaction_id: id,
                                success: false,
                                error: Some(e.to_string()),
                            });
                        }
                    }
                }
            }
            BatchMode::AllOrNothing => {
                let mut staged = Vec::with_capacity(ids.len());
                for &id in ids {
                    let mut tx = self.load(id)?;
                    let action = WorkflowService::approve(tx.status, actor.id, note.clone())?;
                    self.gate(&actor, tx.amount)?;
                    tx.apply(&action);
                    staged.push(tx);
                }
                for tx in staged {
                    self.save(&tx)?;
                    self.deliver(
                        tx.submitted_by,
                        &format!("Transaction {} approved", tx.id),
                        NotificationLevel::Success,
                    );
                    outcome.success_count += 1;
                    outcome.results.push(BulkItemOutcome {
                        transaction_id: tx.id,
                        success: true,
                        error: None,
                    });
                }
            }
        }

        Ok(outcome)
    }

    // ========================================================================
    // Read-only queries
    // ========================================================================

    /// Lists pending transactions with the reviewing actor's rights.
    ///
    /// # Errors
    ///
    /// Returns `ActorNotFound` or `Storage` failures.
    pub fn list_pending(&self, actor_id: ActorId) -> Result<Vec<PendingReview>, WorkflowError> {
        let actor = self.resolve(actor_id)?;
        let filter = TransactionFilter {
            status: Some(ValidationStatus::Pending),
            ..TransactionFilter::default()
        };
        let pending = self.store.query(&filter).map_err(storage_error)?;

        Ok(pending
            .into_iter()
            .map(|tx| {
                let can_validate = self.gate(&actor, tx.amount).is_ok();
                PendingReview {
                    transaction: tx,
                    can_validate,
                }
            })
            .collect())
    }

    /// Counts and totals by status for the records in scope.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store query fails.
    pub fn validation_summary(
        &self,
        scope: ActionScope,
    ) -> Result<ValidationSummary, WorkflowError> {
        let filter = TransactionFilter {
            kind: scope.kind(),
            ..TransactionFilter::default()
        };
        let records = self.store.query(&filter).map_err(storage_error)?;

        let mut summary = ValidationSummary::default();
        for tx in records {
            match tx.status {
                ValidationStatus::Pending => {
                    summary.pending_count += 1;
                    summary.pending_total += tx.amount;
                }
                ValidationStatus::Approved => {
                    summary.approved_count += 1;
                    summary.approved_total += tx.amount;
                }
                ValidationStatus::Rejected => summary.rejected_count += 1,
                ValidationStatus::NeedsRevision => summary.needs_revision_count += 1,
            }
        }
        Ok(summary)
    }

    /// Percentile rank of a transaction's amount among stored records of
    /// the same kind.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store query fails.
    pub fn amount_percentile(&self, tx: &FinancialTransaction) -> Result<Decimal, WorkflowError> {
        let filter = TransactionFilter {
            kind: Some(tx.kind),
            ..TransactionFilter::default()
        };
        let amounts: Vec<Decimal> = self
            .store
            .query(&filter)
            .map_err(storage_error)?
            .iter()
            .map(|t| t.amount)
            .collect();

        Ok(AnalyticsService::amount_percentile(tx.amount, &amounts))
    }

    /// Risk score for a transaction, counting the submitter's other
    /// same-category records in the trailing 7 days.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the store query fails.
    pub fn risk_score(&self, tx: &FinancialTransaction) -> Result<RiskScore, WorkflowError> {
        let filter = TransactionFilter {
            submitted_by: Some(tx.submitted_by),
            category: Some(tx.category.clone()),
            occurred_on_or_after: Some(tx.occurred_on - Duration::days(7)),
            occurred_on_or_before: Some(tx.occurred_on),
            exclude_id: Some(tx.id),
            ..TransactionFilter::default()
        };
        let recent = self.store.query(&filter).map_err(storage_error)?.len();

        Ok(AnalyticsService::risk_score(
            tx.amount,
            &tx.category,
            recent,
        ))
    }

    /// Whether a transaction requires special attention.
    #[must_use]
    pub fn requires_attention(&self, tx: &FinancialTransaction) -> bool {
        AnalyticsService::requires_attention(tx)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn load(&self, id: TransactionId) -> Result<FinancialTransaction, WorkflowError> {
        self.store
            .find(id)
            .map_err(storage_error)?
            .ok_or(WorkflowError::TransactionNotFound(id))
    }

    fn resolve(&self, id: ActorId) -> Result<Actor, WorkflowError> {
        self.identity
            .actor(id)
            .ok_or(WorkflowError::ActorNotFound(id))
    }

    fn gate(&self, actor: &Actor, amount: Decimal) -> Result<(), WorkflowError> {
        ValidationGate::check(actor.role, amount, self.config.high_value_threshold)
    }

    fn save(&self, tx: &FinancialTransaction) -> Result<(), WorkflowError> {
        self.store.save(tx).map_err(storage_error)
    }

    /// Sink failures never roll back the mutation they follow.
    fn deliver(&self, recipient: ActorId, message: &str, level: NotificationLevel) {
        if let Err(e) = self.notifier.notify(recipient, message, level) {
            warn!(%recipient, error = %e, "notification delivery failed");
        }
    }

    /// Applies an effect to the record in memory without saving.
    /// Returns false when the effect is a no-op (duplicate note with
    /// dedup enabled).
    fn stage_effect(
        &self,
        tx: &mut FinancialTransaction,
        effect: &QuickActionEffect,
        actor: &Actor,
    ) -> Result<bool, WorkflowError> {
        match effect {
            QuickActionEffect::Approve { note } => {
                self.gate(actor, tx.amount)?;
                let action = WorkflowService::approve(tx.status, actor.id, Some(note.clone()))?;
                tx.apply(&action);
                Ok(true)
            }
            QuickActionEffect::AppendNote { note } => {
                if !self.config.append_duplicate_notes && tx.has_note_line(note) {
                    return Ok(false);
                }
                tx.append_note(note);
                Ok(true)
            }
        }
    }
}

fn storage_error(e: StoreError) -> WorkflowError {
    WorkflowError::Storage(e.to_string())
}
