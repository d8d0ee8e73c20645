//! Application configuration management.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Validation engine configuration.
    #[serde(default)]
    pub engine: EngineSettings,
    /// Budget configuration.
    #[serde(default)]
    pub budget: BudgetSettings,
}

/// Validation engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Amounts strictly above this threshold require manager-level approval.
    #[serde(default = "default_high_value_threshold")]
    pub high_value_threshold: Decimal,
    /// How batch operations handle per-record failures.
    #[serde(default)]
    pub batch_mode: BatchMode,
    /// When true, note-appending quick actions append on every run even if
    /// an identical note line is already present (audit-log behavior).
    #[serde(default = "default_append_duplicate_notes")]
    pub append_duplicate_notes: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            high_value_threshold: default_high_value_threshold(),
            batch_mode: BatchMode::default(),
            append_duplicate_notes: default_append_duplicate_notes(),
        }
    }
}

/// Failure semantics for batch operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// Skip failing records and continue, reporting affected/skipped counts.
    #[default]
    BestEffort,
    /// Pre-validate every candidate; apply no mutation if any would fail.
    AllOrNothing,
}

/// Monthly budget configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BudgetSettings {
    /// Fallback monthly limit for categories absent from `category_limits`.
    #[serde(default = "default_budget_limit")]
    pub default_limit: Decimal,
    /// Monthly spending limit per category.
    #[serde(default = "default_category_limits")]
    pub category_limits: HashMap<String, Decimal>,
    /// Utilization percentage strictly above which the verdict is a warning.
    #[serde(default = "default_warning_utilization")]
    pub warning_utilization: Decimal,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            default_limit: default_budget_limit(),
            category_limits: default_category_limits(),
            warning_utilization: default_warning_utilization(),
        }
    }
}

fn default_high_value_threshold() -> Decimal {
    Decimal::new(5_000_000, 0)
}

fn default_append_duplicate_notes() -> bool {
    true
}

fn default_budget_limit() -> Decimal {
    Decimal::new(10_000_000, 0)
}

fn default_warning_utilization() -> Decimal {
    Decimal::new(80, 0)
}

fn default_category_limits() -> HashMap<String, Decimal> {
    HashMap::from([
        ("konsultasi".to_string(), Decimal::new(15_000_000, 0)),
        ("operasional".to_string(), Decimal::new(20_000_000, 0)),
        ("infrastruktur".to_string(), Decimal::new(30_000_000, 0)),
        ("lainnya".to_string(), Decimal::new(5_000_000, 0)),
    ])
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("KASIRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_engine_settings() {
        let settings = EngineSettings::default();
        assert_eq!(settings.high_value_threshold, dec!(5_000_000));
        assert_eq!(settings.batch_mode, BatchMode::BestEffort);
        assert!(settings.append_duplicate_notes);
    }

    #[test]
    fn test_default_budget_settings() {
        let settings = BudgetSettings::default();
        assert_eq!(settings.default_limit, dec!(10_000_000));
        assert_eq!(settings.warning_utilization, dec!(80));
        assert_eq!(
            settings.category_limits.get("konsultasi"),
            Some(&dec!(15_000_000))
        );
        assert_eq!(
            settings.category_limits.get("lainnya"),
            Some(&dec!(5_000_000))
        );
    }

    #[test]
    fn test_batch_mode_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: BatchMode,
        }

        let w: Wrapper = serde_json::from_str(r#"{"mode":"best_effort"}"#).unwrap();
        assert_eq!(w.mode, BatchMode::BestEffort);

        let w: Wrapper = serde_json::from_str(r#"{"mode":"all_or_nothing"}"#).unwrap();
        assert_eq!(w.mode, BatchMode::AllOrNothing);
    }
}
