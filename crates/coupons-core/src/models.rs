// Rust guideline compliant 2026-10-18

//! Core data models for Coupons.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored lifecycle status of a discount code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Code can still be redeemed.
    Active,
    /// Code has been redeemed by its owner.
    Used,
    /// Code passed its expiry date while active.
    Expired,
}

impl Status {
    /// All stored statuses, in display order.
    pub const ALL: [Status; 3] = [Status::Active, Status::Used, Status::Expired];

    /// Returns the snake_case name used in storage and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Used => "used",
            Status::Expired => "expired",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Four-way status shown to the user.
///
/// `ExpiringSoon` is an overlay on top of a stored `Active` status and is
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayStatus {
    /// Active and not close to expiry.
    Active,
    /// Active and expiring within the configured window.
    ExpiringSoon,
    /// Expired, stored or detected.
    Expired,
    /// Redeemed.
    Used,
}

impl DisplayStatus {
    /// Returns the snake_case name of the display status.
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Active => "active",
            DisplayStatus::ExpiringSoon => "expiring_soon",
            DisplayStatus::Expired => "expired",
            DisplayStatus::Used => "used",
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discount code recorded by a single owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCode {
    /// Unique hash-based identifier (format: dc-XXXXXXXX).
    pub id: String,
    /// Identifier of the owning user.
    pub owner_id: String,
    /// Store the code can be redeemed at.
    pub store_name: String,
    /// Last calendar day the code is valid on.
    pub expiry_date: NaiveDate,
    /// Textual code, if any.
    #[serde(default)]
    pub code: Option<String>,
    /// Free-text usage conditions.
    #[serde(default)]
    pub conditions: Option<String>,
    /// Minimum purchase amount required to redeem.
    #[serde(default)]
    pub min_amount: Option<Decimal>,
    /// Reference to the receipt image in the blob store.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Current stored status.
    pub status: Status,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

/// Fields supplied when recording a new discount code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCode {
    /// Owner of the new record.
    pub owner_id: String,
    /// Store name.
    pub store_name: String,
    /// Expiry date; required.
    pub expiry_date: Option<NaiveDate>,
    /// Textual code.
    pub code: Option<String>,
    /// Usage conditions.
    pub conditions: Option<String>,
    /// Minimum purchase amount.
    pub min_amount: Option<Decimal>,
    /// Receipt image reference, set once the image is uploaded.
    pub image_url: Option<String>,
}

/// Edits to the user-editable fields of a record.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears an optional
/// field. Status is absent: edits never change it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeEdit {
    /// New store name.
    pub store_name: Option<String>,
    /// New expiry date.
    pub expiry_date: Option<NaiveDate>,
    /// New or cleared textual code.
    pub code: Option<Option<String>>,
    /// New or cleared conditions.
    pub conditions: Option<Option<String>>,
    /// New or cleared minimum amount.
    pub min_amount: Option<Option<Decimal>>,
}

/// Trims optional text, mapping blank values to `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

impl NewCode {
    /// Returns a copy with text fields trimmed and blank values dropped.
    pub fn normalized(self) -> Self {
        Self {
            owner_id: self.owner_id.trim().to_string(),
            store_name: self.store_name.trim().to_string(),
            expiry_date: self.expiry_date,
            code: normalize_text(self.code),
            conditions: normalize_text(self.conditions),
            min_amount: self.min_amount,
            image_url: normalize_text(self.image_url),
        }
    }

    /// Validates the request before anything is uploaded or stored.
    ///
    /// # Arguments
    ///
    /// * `image_pending` - Whether a receipt image accompanies the request
    ///
    /// # Errors
    ///
    /// Returns a validation error if:
    /// - Owner or store name is empty
    /// - Expiry date is missing
    /// - Neither a code nor an image is present
    /// - Minimum amount is negative
    pub fn validate(&self, image_pending: bool) -> crate::Result<()> {
        if self.owner_id.trim().is_empty() {
            return Err(crate::Error::Validation(
                "Owner cannot be empty".to_string(),
            ));
        }

        if self.store_name.trim().is_empty() {
            return Err(crate::Error::Validation(
                "Store name cannot be empty".to_string(),
            ));
        }

        if self.expiry_date.is_none() {
            return Err(crate::Error::Validation(
                "Expiry date is required".to_string(),
            ));
        }

        let has_code = normalize_text(self.code.clone()).is_some();
        let has_image = image_pending || normalize_text(self.image_url.clone()).is_some();
        if !has_code && !has_image {
            return Err(crate::Error::Validation(
                "Either a code or a receipt image is required".to_string(),
            ));
        }

        validate_min_amount(self.min_amount)
    }
}

impl CodeEdit {
    /// Returns true if the edit changes nothing.
    pub fn is_empty(&self) -> bool {
        self.store_name.is_none()
            && self.expiry_date.is_none()
            && self.code.is_none()
            && self.conditions.is_none()
            && self.min_amount.is_none()
    }

    /// Applies the edit to a record in place. Does not touch status or timestamps.
    pub fn apply_to(&self, record: &mut DiscountCode) {
        if let Some(store_name) = &self.store_name {
            record.store_name = store_name.trim().to_string();
        }
        if let Some(expiry_date) = self.expiry_date {
            record.expiry_date = expiry_date;
        }
        if let Some(code) = &self.code {
            record.code = normalize_text(code.clone());
        }
        if let Some(conditions) = &self.conditions {
            record.conditions = normalize_text(conditions.clone());
        }
        if let Some(min_amount) = self.min_amount {
            record.min_amount = min_amount;
        }
    }
}

impl DiscountCode {
    /// Creates a new active record from a validated request.
    ///
    /// # Arguments
    ///
    /// * `new` - The creation request
    /// * `now` - Unix timestamp used for `created_at`, `updated_at` and the ID
    /// * `nonce` - Disambiguates IDs generated for identical inputs
    ///
    /// # Errors
    ///
    /// Returns a validation error if the request is incomplete.
    pub fn create(new: NewCode, now: i64, nonce: u32) -> crate::Result<Self> {
        let new = new.normalized();
        new.validate(false)?;
        let expiry_date = new
            .expiry_date
            .ok_or_else(|| crate::Error::Validation("Expiry date is required".to_string()))?;

        let id = crate::identity::generate_id(&new.store_name, &new.owner_id, now, nonce);
        let record = Self {
            id,
            owner_id: new.owner_id,
            store_name: new.store_name,
            expiry_date,
            code: new.code,
            conditions: new.conditions,
            min_amount: new.min_amount,
            image_url: new.image_url,
            status: Status::Active,
            created_at: now,
            updated_at: now,
        };
        record.validate()?;
        Ok(record)
    }

    /// Validates the record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - ID format is invalid
    /// - Owner or store name is empty
    /// - Neither code nor image reference is present
    /// - Minimum amount is negative
    pub fn validate(&self) -> crate::Result<()> {
        crate::identity::validate_id_format(&self.id)?;

        if self.owner_id.trim().is_empty() {
            return Err(crate::Error::Validation(
                "Owner cannot be empty".to_string(),
            ));
        }

        if self.store_name.trim().is_empty() {
            return Err(crate::Error::Validation(
                "Store name cannot be empty".to_string(),
            ));
        }

        if !self.has_code() && !self.has_image() {
            return Err(crate::Error::Validation(
                "Either a code or a receipt image is required".to_string(),
            ));
        }

        validate_min_amount(self.min_amount)
    }

    /// Returns true if a non-blank textual code is present.
    pub fn has_code(&self) -> bool {
        self.code.as_deref().is_some_and(|code| !code.trim().is_empty())
    }

    /// Returns true if a receipt image reference is present.
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }

    /// Returns true if the record is stored as active but its expiry date has passed.
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        self.status == Status::Active && self.expiry_date < today
    }
}

fn validate_min_amount(min_amount: Option<Decimal>) -> crate::Result<()> {
    match min_amount {
        Some(amount) if amount < Decimal::ZERO => Err(
            crate::Error::Validation(format!("Minimum amount cannot be negative, got {}", amount)),
        ),
        _ => Ok(()),
    }
}
