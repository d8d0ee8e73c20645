//! Validation workflow engine for Kasira.
//!
//! This crate wires the pure business logic from `kasira-core` to three
//! narrow collaborator contracts: a transaction store, an identity
//! provider, and a notification sink. Persistence, authentication, and
//! message delivery stay behind those traits.
//!
//! All operations are synchronous single read-modify-write calls; batch
//! operations iterate a bounded candidate set sequentially.

pub mod engine;
pub mod identity;
pub mod memory;
pub mod notify;
pub mod store;
pub mod types;

pub use engine::{EngineConfig, ValidationEngine};
pub use identity::{Actor, IdentityProvider, StaticIdentity};
pub use memory::InMemoryStore;
pub use notify::{NotificationLevel, NotificationSink, NotifyError, TracingSink};
pub use store::{StoreError, TransactionFilter, TransactionStore};
pub use types::{BulkItemOutcome, BulkOutcome, PendingReview, QuickActionOutcome, ValidationSummary};
