//! Budget data types.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use kasira_shared::config::BudgetSettings;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A calendar month used to scope budget spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// Calendar year.
    pub year: i32,
    /// Month of year, 1-12.
    pub month: u32,
}

impl CalendarMonth {
    /// Creates a calendar month.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The month a date falls in.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Returns true if `date` falls within this month.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Monthly spending limits per category with a default fallback.
#[derive(Debug, Clone)]
pub struct BudgetPolicy {
    /// Fallback limit for unmapped categories.
    pub default_limit: Decimal,
    /// Limits per category.
    pub category_limits: HashMap<String, Decimal>,
    /// Utilization percentage strictly above which the verdict warns.
    pub warning_utilization: Decimal,
}

impl BudgetPolicy {
    /// Looks up the monthly limit for a category, falling back to the
    /// default limit when the category is unmapped.
    #[must_use]
    pub fn limit_for(&self, category: &str) -> Decimal {
        self.category_limits
            .get(category)
            .copied()
            .unwrap_or(self.default_limit)
    }
}

impl From<&BudgetSettings> for BudgetPolicy {
    fn from(settings: &BudgetSettings) -> Self {
        Self {
            default_limit: settings.default_limit,
            category_limits: settings.category_limits.clone(),
            warning_utilization: settings.warning_utilization,
        }
    }
}

/// Budget verdict classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Within budget, below the warning band.
    Valid,
    /// Within budget but utilization is above the warning band.
    Warning,
    /// Projected spend exceeds the monthly limit.
    Invalid,
}

impl BudgetStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Warning => "warning",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a budget check. Advisory: the caller decides whether an
/// `Invalid` verdict blocks the save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetVerdict {
    /// Verdict classification.
    pub status: BudgetStatus,
    /// Projected utilization percentage (2dp).
    pub utilization: Decimal,
    /// The monthly limit applied.
    pub limit: Decimal,
    /// Committed or likely-committed spend already recorded this month.
    pub current_spent: Decimal,
    /// `current_spent` plus the candidate amount.
    pub projected: Decimal,
    /// Amount by which `projected` exceeds `limit`, when over budget.
    pub overage: Option<Decimal>,
}
