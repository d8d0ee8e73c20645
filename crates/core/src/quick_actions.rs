//! Deterministic batch rules over pending transactions.
//!
//! Each rule is a pure function of a single record: given a pending
//! transaction it either produces an effect or leaves the record alone.
//! The engine loops over the candidate set and applies effects one by
//! one; status-changing rules only ever match `Pending` records, so
//! re-running them is idempotent.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transaction::{FinancialTransaction, TransactionKind};

/// Categories auto-approvable as routine spend.
pub const ROUTINE_CATEGORIES: [&str; 2] = ["konsultasi", "operasional"];

/// Note attached by the low-value auto-approval rule.
pub const LOW_VALUE_NOTE: &str = "Auto-approved: low value transaction";
/// Note attached by the routine auto-approval rule.
pub const ROUTINE_NOTE: &str = "Auto-approved: routine transaction";
/// Note appended by the high-value flag rule.
pub const HIGH_VALUE_FLAG_NOTE: &str = "Flagged: high value transaction requires review";

/// A quick-action batch rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    /// Auto-approve every pending transaction below the low-value limit.
    ApproveLowValue,
    /// Auto-approve routine-category transactions below the routine limit.
    ApproveRoutine,
    /// Append a flag note to high-value pending transactions.
    FlagHighValue,
    /// Append a value-tier label note to every pending transaction.
    CategorizeByAmount,
}

impl QuickAction {
    /// Returns the string representation of the rule name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApproveLowValue => "approve_low_value",
            Self::ApproveRoutine => "approve_routine",
            Self::FlagHighValue => "flag_high_value",
            Self::CategorizeByAmount => "categorize_by_amount",
        }
    }

    /// Parses a rule name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approve_low_value" => Some(Self::ApproveLowValue),
            "approve_routine" => Some(Self::ApproveRoutine),
            "flag_high_value" => Some(Self::FlagHighValue),
            "categorize_by_amount" => Some(Self::CategorizeByAmount),
            _ => None,
        }
    }
}

impl fmt::Display for QuickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which transaction kinds a batch run covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionScope {
    /// Income records only.
    Income,
    /// Expense records only.
    Expense,
    /// Both kinds.
    Both,
}

impl ActionScope {
    /// Returns true if a transaction kind falls within this scope.
    #[must_use]
    pub fn covers(&self, kind: TransactionKind) -> bool {
        match self {
            Self::Income => kind == TransactionKind::Income,
            Self::Expense => kind == TransactionKind::Expense,
            Self::Both => true,
        }
    }

    /// The single kind this scope restricts to, if any.
    #[must_use]
    pub fn kind(&self) -> Option<TransactionKind> {
        match self {
            Self::Income => Some(TransactionKind::Income),
            Self::Expense => Some(TransactionKind::Expense),
            Self::Both => None,
        }
    }
}

/// The effect a quick action has on a single matching record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuickActionEffect {
    /// Approve the record with a fixed system note.
    Approve {
        /// The system note recorded on approval.
        note: String,
    },
    /// Append a note; status unchanged.
    AppendNote {
        /// The note line to append.
        note: String,
    },
}

/// Stateless evaluator for quick-action rules.
pub struct QuickActionRules;

impl QuickActionRules {
    /// Evaluates a rule against one record.
    ///
    /// Returns `None` for records the rule does not touch. All rules
    /// only match records that are still `Pending`.
    #[must_use]
    pub fn evaluate(action: QuickAction, tx: &FinancialTransaction) -> Option<QuickActionEffect> {
        if !tx.status.is_pending() {
            return None;
        }

        match action {
            QuickAction::ApproveLowValue => {
                (tx.amount < low_value_limit()).then(|| QuickActionEffect::Approve {
                    note: LOW_VALUE_NOTE.to_string(),
                })
            }
            QuickAction::ApproveRoutine => (ROUTINE_CATEGORIES.contains(&tx.category.as_str())
                && tx.amount < routine_limit())
            .then(|| QuickActionEffect::Approve {
                note: ROUTINE_NOTE.to_string(),
            }),
            QuickAction::FlagHighValue => {
                (tx.amount > high_value_flag_limit()).then(|| QuickActionEffect::AppendNote {
                    note: HIGH_VALUE_FLAG_NOTE.to_string(),
                })
            }
            QuickAction::CategorizeByAmount => Some(QuickActionEffect::AppendNote {
                note: format!("Value tier: {}", Self::tier_label(tx.amount)),
            }),
        }
    }

    /// Value-tier label for an amount.
    #[must_use]
    pub fn tier_label(amount: Decimal) -> &'static str {
        if amount > Decimal::new(10_000_000, 0) {
            "Ultra High Value"
        } else if amount > Decimal::new(5_000_000, 0) {
            "High Value"
        } else if amount > Decimal::new(1_000_000, 0) {
            "Medium Value"
        } else {
            "Standard Value"
        }
    }
}

fn low_value_limit() -> Decimal {
    Decimal::new(500_000, 0)
}

fn routine_limit() -> Decimal {
    Decimal::new(1_000_000, 0)
}

fn high_value_flag_limit() -> Decimal {
    Decimal::new(5_000_000, 0)
}
