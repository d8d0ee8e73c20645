//! Analytics calculations.

use rust_decimal::Decimal;

use super::types::{RiskBucket, RiskScore};
use crate::transaction::{FinancialTransaction, TransactionKind};

/// Categories treated as high-risk when scoring.
pub const HIGH_RISK_CATEGORIES: [&str; 2] = ["lainnya", "infrastruktur"];

/// How many same-category submissions in the trailing week push the
/// risk score up.
pub const FREQUENT_SUBMISSION_LIMIT: usize = 5;

/// Service for read-only transaction analytics.
pub struct AnalyticsService;

impl AnalyticsService {
    /// Percentile rank of `amount` within `population`: the share of
    /// amounts less than or equal to it, as a percentage rounded to
    /// 2dp. An empty population ranks at zero.
    #[must_use]
    pub fn amount_percentile(amount: Decimal, population: &[Decimal]) -> Decimal {
        if population.is_empty() {
            return Decimal::ZERO;
        }

        let at_or_below = population.iter().filter(|a| **a <= amount).count();
        (Decimal::from(at_or_below) / Decimal::from(population.len()) * Decimal::ONE_HUNDRED)
            .round_dp(2)
    }

    /// Returns true if a percentile marks an outlier (above 95 or below 5).
    #[must_use]
    pub fn is_outlier(percentile: Decimal) -> bool {
        percentile > Decimal::new(95, 0) || percentile < Decimal::new(5, 0)
    }

    /// Additive risk score for a transaction.
    ///
    /// The amount contributes its highest matching bracket only: above
    /// 10M scores 3, above 5M scores 2, above 1M scores 1. One extra
    /// point if the category is high-risk, and one if the submitter
    /// recorded more than [`FREQUENT_SUBMISSION_LIMIT`] same-category
    /// transactions in the trailing 7 days (`recent_same_category_count`,
    /// passed in explicitly, excluding the transaction itself).
    #[must_use]
    pub fn risk_score(
        amount: Decimal,
        category: &str,
        recent_same_category_count: usize,
    ) -> RiskScore {
        let mut score: u8 = if amount > Decimal::new(10_000_000, 0) {
            3
        } else if amount > Decimal::new(5_000_000, 0) {
            2
        } else if amount > Decimal::new(1_000_000, 0) {
            1
        } else {
            0
        };

        if HIGH_RISK_CATEGORIES.contains(&category) {
            score += 1;
        }

        if recent_same_category_count > FREQUENT_SUBMISSION_LIMIT {
            score += 1;
        }

        let bucket = if score >= 4 {
            RiskBucket::High
        } else if score >= 2 {
            RiskBucket::Medium
        } else {
            RiskBucket::Low
        };

        RiskScore { score, bucket }
    }

    /// Returns true if the transaction requires special attention:
    /// very large amounts, unusual income under "lainnya", large
    /// infrastructure expenses, or weekend-dated records.
    #[must_use]
    pub fn requires_attention(tx: &FinancialTransaction) -> bool {
        if tx.amount > Decimal::new(10_000_000, 0) {
            return true;
        }

        if tx.kind == TransactionKind::Income
            && tx.category == "lainnya"
            && tx.amount > Decimal::new(1_000_000, 0)
        {
            return true;
        }

        if tx.kind == TransactionKind::Expense
            && tx.category == "infrastruktur"
            && tx.amount > Decimal::new(5_000_000, 0)
        {
            return true;
        }

        tx.is_weekend()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kasira_shared::types::ActorId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn weekday_tx(
        kind: TransactionKind,
        amount: Decimal,
        category: &str,
    ) -> FinancialTransaction {
        // 2025-03-10 is a Monday.
        FinancialTransaction::new(
            kind,
            amount,
            category,
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            ActorId::new(),
        )
    }

    #[test]
    fn test_percentile_empty_population() {
        assert_eq!(
            AnalyticsService::amount_percentile(dec!(100), &[]),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_percentile_rank() {
        let population = vec![dec!(100), dec!(200), dec!(300), dec!(400)];
        assert_eq!(
            AnalyticsService::amount_percentile(dec!(200), &population),
            dec!(50.00)
        );
        assert_eq!(
            AnalyticsService::amount_percentile(dec!(400), &population),
            dec!(100.00)
        );
        assert_eq!(
            AnalyticsService::amount_percentile(dec!(50), &population),
            dec!(0.00)
        );
    }

    #[test]
    fn test_percentile_rounds_to_2dp() {
        let population = vec![dec!(1), dec!(2), dec!(3)];
        assert_eq!(
            AnalyticsService::amount_percentile(dec!(1), &population),
            dec!(33.33)
        );
    }

    #[test]
    fn test_outlier_boundaries() {
        assert!(AnalyticsService::is_outlier(dec!(95.01)));
        assert!(AnalyticsService::is_outlier(dec!(4.99)));
        assert!(!AnalyticsService::is_outlier(dec!(95)));
        assert!(!AnalyticsService::is_outlier(dec!(5)));
        assert!(!AnalyticsService::is_outlier(dec!(50)));
    }

    #[rstest]
    #[case(dec!(12_000_000), 3)]
    #[case(dec!(10_000_000), 2)]
    #[case(dec!(6_000_000), 2)]
    #[case(dec!(5_000_000), 1)]
    #[case(dec!(2_000_000), 1)]
    #[case(dec!(1_000_000), 0)]
    #[case(dec!(500_000), 0)]
    fn test_amount_bracket_scores(#[case] amount: Decimal, #[case] expected: u8) {
        let score = AnalyticsService::risk_score(amount, "konsultasi", 0);
        assert_eq!(score.score, expected);
    }

    #[test]
    fn test_high_risk_category_adds_point() {
        let base = AnalyticsService::risk_score(dec!(2_000_000), "konsultasi", 0);
        let risky = AnalyticsService::risk_score(dec!(2_000_000), "lainnya", 0);
        assert_eq!(risky.score, base.score + 1);
    }

    #[test]
    fn test_frequent_submitter_adds_point() {
        let calm = AnalyticsService::risk_score(dec!(2_000_000), "konsultasi", 5);
        let busy = AnalyticsService::risk_score(dec!(2_000_000), "konsultasi", 6);
        assert_eq!(calm.score, 1);
        assert_eq!(busy.score, 2);
    }

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(
            AnalyticsService::risk_score(dec!(500_000), "konsultasi", 0).bucket,
            RiskBucket::Low
        );
        assert_eq!(
            AnalyticsService::risk_score(dec!(6_000_000), "konsultasi", 0).bucket,
            RiskBucket::Medium
        );
        assert_eq!(
            AnalyticsService::risk_score(dec!(12_000_000), "lainnya", 0).bucket,
            RiskBucket::High
        );
    }

    #[test]
    fn test_large_income_is_at_least_medium_risk() {
        // Amount tier alone contributes 3 points for a 12M record.
        let score = AnalyticsService::risk_score(dec!(12_000_000), "konsultasi", 0);
        assert!(score.score >= 3);
        assert!(score.bucket >= RiskBucket::Medium);
    }

    #[test]
    fn test_attention_large_amount() {
        let tx = weekday_tx(TransactionKind::Income, dec!(12_000_000), "konsultasi");
        assert!(AnalyticsService::requires_attention(&tx));
    }

    #[test]
    fn test_attention_income_lainnya_over_1m() {
        let tx = weekday_tx(TransactionKind::Income, dec!(1_500_000), "lainnya");
        assert!(AnalyticsService::requires_attention(&tx));

        let below = weekday_tx(TransactionKind::Income, dec!(900_000), "lainnya");
        assert!(!AnalyticsService::requires_attention(&below));
    }

    #[test]
    fn test_attention_expense_infrastruktur_over_5m() {
        let tx = weekday_tx(TransactionKind::Expense, dec!(6_000_000), "infrastruktur");
        assert!(AnalyticsService::requires_attention(&tx));

        // The lainnya rule is income-only.
        let expense_lainnya = weekday_tx(TransactionKind::Expense, dec!(1_500_000), "lainnya");
        assert!(!AnalyticsService::requires_attention(&expense_lainnya));
    }

    #[test]
    fn test_attention_weekend() {
        // 2025-03-09 is a Sunday.
        let tx = FinancialTransaction::new(
            TransactionKind::Income,
            dec!(100_000),
            "konsultasi",
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap(),
            ActorId::new(),
        );
        assert!(AnalyticsService::requires_attention(&tx));
    }

    #[test]
    fn test_attention_ordinary_record() {
        let tx = weekday_tx(TransactionKind::Expense, dec!(400_000), "operasional");
        assert!(!AnalyticsService::requires_attention(&tx));
    }
}
