//! Monthly category budget checks.
//!
//! The budget check is advisory: it produces a verdict the caller may
//! treat as blocking or informational, and never mutates state.

pub mod service;
pub mod types;

pub use service::BudgetService;
pub use types::{BudgetPolicy, BudgetStatus, BudgetVerdict, CalendarMonth};
