//! Read-only transaction analytics.
//!
//! Percentile ranking, risk scoring, and the special-attention
//! predicate. Nothing here mutates state.

pub mod service;
pub mod types;

pub use service::AnalyticsService;
pub use types::{RiskBucket, RiskScore};
