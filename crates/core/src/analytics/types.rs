//! Analytics data types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk bucket classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBucket {
    /// Score below 2.
    Low,
    /// Score 2 or 3.
    Medium,
    /// Score 4 or above.
    High,
}

impl RiskBucket {
    /// Returns the display label for this bucket.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Additive risk score with its bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    /// The additive score.
    pub score: u8,
    /// Bucket derived from the score.
    pub bucket: RiskBucket,
}
