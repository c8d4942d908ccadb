// Rust guideline compliant 2026-10-18

//! Persistence collaborators for discount codes.
//!
//! The engine talks to storage only through [`CodeStore`]. Two
//! implementations ship with the crate: a JSONL file store used by the CLI
//! and an in-process store for embedding and tests.

mod jsonl;
mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

use crate::{CodeEdit, DiscountCode, Result, Status};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Storage for discount code records.
///
/// Implementations return records unordered and never enforce lifecycle
/// rules. They must be shareable across threads because reconciliation
/// write-backs run in parallel.
pub trait CodeStore: Send + Sync {
    /// Fetches every record owned by `owner_id`.
    fn fetch_all(&self, owner_id: &str) -> Result<Vec<DiscountCode>>;

    /// Inserts a new record and returns it as stored.
    fn insert(&self, record: DiscountCode) -> Result<DiscountCode>;

    /// Applies a field set to the record with the given ID.
    ///
    /// Returns `NotFound` if the record does not exist.
    fn update_fields(&self, id: &str, fields: &FieldSet) -> Result<DiscountCode>;

    /// Deletes the record with the given ID.
    ///
    /// Returns `NotFound` if the record does not exist.
    fn delete(&self, id: &str) -> Result<()>;
}

/// The set of fields written by a single update.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet {
    /// New store name.
    pub store_name: Option<String>,
    /// New expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// New or cleared code.
    pub code: Option<Option<String>>,
    /// New or cleared conditions.
    pub conditions: Option<Option<String>>,
    /// New or cleared minimum amount.
    pub min_amount: Option<Option<Decimal>>,
    /// New or cleared image reference.
    pub image_url: Option<Option<String>>,
    /// New status.
    pub status: Option<Status>,
    /// Timestamp written to `updated_at`.
    pub updated_at: i64,
}

impl FieldSet {
    /// Builds a field set that only changes the status.
    pub fn status(status: Status, updated_at: i64) -> Self {
        Self {
            status: Some(status),
            updated_at,
            ..Self::default()
        }
    }

    /// Builds a field set from a user edit.
    pub fn from_edit(edit: &CodeEdit, updated_at: i64) -> Self {
        Self {
            store_name: edit.store_name.clone(),
            expiry_date: edit.expiry_date,
            code: edit.code.clone(),
            conditions: edit.conditions.clone(),
            min_amount: edit.min_amount,
            updated_at,
            ..Self::default()
        }
    }

    /// Sets or clears the image reference.
    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = Some(image_url);
        self
    }

    /// Applies the field set to a record in place.
    pub fn apply_to(&self, record: &mut DiscountCode) {
        let edit = CodeEdit {
            store_name: self.store_name.clone(),
            expiry_date: self.expiry_date,
            code: self.code.clone(),
            conditions: self.conditions.clone(),
            min_amount: self.min_amount,
        };
        edit.apply_to(record);

        if let Some(image_url) = &self.image_url {
            record.image_url = crate::models::normalize_text(image_url.clone());
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        record.updated_at = self.updated_at;
    }
}
