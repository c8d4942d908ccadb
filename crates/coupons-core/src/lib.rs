// Rust guideline compliant 2026-10-18

//! Coupons Core Library
//!
//! This crate provides the foundational components for the Coupons discount-code tracker:
//! - Data models (DiscountCode, Status, DisplayStatus)
//! - Lifecycle logic (reconciliation, display classification)
//! - FSM logic (events, guards, transitions)
//! - Views (filtering, sorting, aggregate counts)
//! - Persistence and receipt storage collaborators (JSONL, in-memory, filesystem)
//! - Hash ID generation and resolution
//! - Error types and result handling

pub mod blob;
pub mod config;
pub mod error;
pub mod fsm;
pub mod identity;
pub mod lifecycle;
pub mod models;
pub mod store;
pub mod view;

pub use blob::{BlobStore, FsBlobStore};
pub use config::{Config, OutputFormat};
pub use error::{Error, Result};
pub use fsm::Event;
pub use lifecycle::{classify, classify_within, reconcile, Reconciliation, DEFAULT_EXPIRING_SOON_DAYS};
pub use models::{CodeEdit, DiscountCode, DisplayStatus, NewCode, Status};
pub use store::{CodeStore, FieldSet, JsonlStore, MemoryStore};
pub use view::{build_view, Counts, Filter, StatusFilter, View, ViewItem};
