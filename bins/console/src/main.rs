//! Kasira validation console.
//!
//! Seeds an in-memory store with fabricated income/expense records,
//! runs the quick-action batch rules, and reports the resulting
//! validation summary, budget posture, and risk flags.
//!
//! Usage: cargo run --bin kasira

use anyhow::Context;
use chrono::{Datelike, Utc};
use fake::Fake;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kasira_core::budget::CalendarMonth;
use kasira_core::quick_actions::{ActionScope, QuickAction};
use kasira_core::transaction::{FinancialTransaction, TransactionKind};
use kasira_core::workflow::StaffRole;
use kasira_engine::{
    EngineConfig, InMemoryStore, StaticIdentity, TracingSink, TransactionStore, ValidationEngine,
};
use kasira_shared::types::ActorId;
use kasira_shared::AppConfig;

const CATEGORIES: [&str; 4] = ["konsultasi", "operasional", "infrastruktur", "lainnya"];
const SEED_COUNT: usize = 24;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kasira=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Wire the engine over in-memory collaborators
    let treasurer = ActorId::new();
    let identity = StaticIdentity::new()
        .with_actor(treasurer, StaffRole::Treasurer)
        .acting_as(treasurer);
    let engine = ValidationEngine::new(
        InMemoryStore::new(),
        identity,
        TracingSink,
        EngineConfig::from(&config),
    );

    let submitters = [ActorId::new(), ActorId::new(), ActorId::new()];
    seed_transactions(&engine, &submitters)?;
    info!(count = SEED_COUNT, "seeded transaction store");

    // Run every quick action over both kinds
    for action in [
        QuickAction::ApproveLowValue,
        QuickAction::ApproveRoutine,
        QuickAction::FlagHighValue,
        QuickAction::CategorizeByAmount,
    ] {
        let outcome = engine.run_quick_action(action, ActionScope::Both)?;
        info!(
            action = %action,
            affected = outcome.affected,
            skipped = outcome.skipped,
            "quick action finished"
        );
    }

    // What is left for a human reviewer, and what can this role touch?
    let reviews = engine.list_pending(treasurer)?;
    let validatable = reviews.iter().filter(|r| r.can_validate).count();
    info!(
        pending = reviews.len(),
        validatable, "pending review queue"
    );

    for review in &reviews {
        let tx = &review.transaction;
        let risk = engine.risk_score(tx)?;
        if engine.requires_attention(tx) {
            info!(
                transaction = %tx.id,
                kind = %tx.kind,
                category = %tx.category,
                amount = %tx.amount,
                risk = %risk.bucket,
                "requires special attention"
            );
        }
    }

    // Budget posture for the current month
    let today = Utc::now().date_naive();
    let month = CalendarMonth::of(today);
    for category in CATEGORIES {
        let verdict = engine.check_budget(category, Decimal::ZERO, month, None)?;
        info!(
            category,
            status = %verdict.status,
            utilization = %verdict.utilization,
            spent = %verdict.current_spent,
            limit = %verdict.limit,
            "budget posture"
        );
    }

    let summary = engine.validation_summary(ActionScope::Both)?;
    info!(
        pending = summary.pending_count,
        approved = summary.approved_count,
        rejected = summary.rejected_count,
        needs_revision = summary.needs_revision_count,
        pending_total = %summary.pending_total,
        approved_total = %summary.approved_total,
        "validation summary"
    );

    Ok(())
}

/// Seeds fabricated records across categories, kinds, and value tiers.
fn seed_transactions(
    engine: &ValidationEngine<InMemoryStore, StaticIdentity, TracingSink>,
    submitters: &[ActorId],
) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let today = Utc::now().date_naive();

    for i in 0..SEED_COUNT {
        let kind = if i % 3 == 0 {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        };
        let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];
        // Mostly routine nominals with the occasional high-value record.
        let amount: i64 = if i % 7 == 0 {
            (5_000_000..15_000_000).fake()
        } else {
            (50_000..2_000_000).fake()
        };
        let day = rng.random_range(1..=today.day().max(1));
        let occurred_on = today
            .with_day(day)
            .context("invalid seeded calendar day")?;
        let submitted_by = submitters[rng.random_range(0..submitters.len())];

        let tx = FinancialTransaction::new(
            kind,
            Decimal::new(amount, 0),
            category,
            occurred_on,
            submitted_by,
        );
        engine
            .store()
            .save(&tx)
            .context("failed to seed transaction")?;
    }

    Ok(())
}
