//! Budget verdict calculation.

use rust_decimal::Decimal;

use super::types::{BudgetStatus, BudgetVerdict};

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Computes the budget verdict for a candidate amount.
    ///
    /// `projected = current_spent + amount`. The verdict is:
    /// - Invalid when projected spend strictly exceeds the limit
    ///   (overage reported)
    /// - Warning when utilization is strictly above `warning_utilization`
    ///   but within the limit
    /// - Valid otherwise
    ///
    /// Comparisons are done on exact Decimal products, so the warning
    /// boundary is not subject to division rounding; the reported
    /// utilization percentage is rounded to 2dp. A zero limit reports
    /// utilization 0 and is Invalid for any positive projected spend.
    #[must_use]
    pub fn check(
        amount: Decimal,
        current_spent: Decimal,
        limit: Decimal,
        warning_utilization: Decimal,
    ) -> BudgetVerdict {
        let projected = current_spent + amount;

        let utilization = if limit.is_zero() {
            Decimal::ZERO
        } else {
            (projected / limit * Decimal::ONE_HUNDRED).round_dp(2)
        };

        let over_limit = projected > limit;
        let above_warning = if limit.is_zero() {
            false
        } else {
            projected * Decimal::ONE_HUNDRED > warning_utilization * limit
        };

        let status = if over_limit {
            BudgetStatus::Invalid
        } else if above_warning {
            BudgetStatus::Warning
        } else {
            BudgetStatus::Valid
        };

        BudgetVerdict {
            status,
            utilization,
            limit,
            current_spent,
            projected,
            overage: over_limit.then(|| projected - limit),
        }
    }
}
