// Rust guideline compliant 2026-10-18

//! Shared application services for Coupons.
//!
//! This crate provides the presentation-facing [`Tracker`] plus reusable,
//! non-CLI-specific helpers for repository discovery, ID resolution, input
//! parsing, clock access, and standardized response envelopes.

pub mod error;
pub mod ids;
pub mod input;
pub mod list;
pub mod repo;
pub mod response;
pub mod time;
pub mod tracker;

pub use error::{AppError, ErrorCode, Result};
pub use ids::resolve_code_id;
pub use input::{parse_amount, parse_date};
pub use list::{build_filter, parse_status, parse_status_filter};
pub use repo::RepoContext;
pub use response::ErrorEnvelope;
pub use time::{today, unix_millis, unix_timestamp};
pub use tracker::{ImageChange, ImageUpload, Tracker};
