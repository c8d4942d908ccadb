// Rust guideline compliant 2026-10-18

//! Presentation-facing facade over the lifecycle engine.
//!
//! A [`Tracker`] is bound to one owner. It reads that owner's records from a
//! [`CodeStore`], reconciles them against the caller's date, writes
//! corrections back, and runs user actions through the transition rules
//! before persisting them.

use crate::error::{AppError, Result};
use crate::ids::resolve_code_id;
use crate::time::{unix_millis, unix_timestamp};
use chrono::NaiveDate;
use coupons_core::blob::receipt_file_name;
use coupons_core::fsm::transition;
use coupons_core::{
    build_view, reconcile, BlobStore, CodeEdit, CodeStore, Config, DiscountCode, Error, Event,
    FieldSet, Filter, NewCode, Status, View,
};
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// How many IDs are tried before giving up on a create.
const MAX_ID_ATTEMPTS: u32 = 8;

/// How many file names are tried before giving up on an upload.
const MAX_UPLOAD_ATTEMPTS: i64 = 4;

/// A receipt image supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name; only its extension is kept.
    pub file_name: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// What an edit does to the receipt image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageChange {
    /// Leave the current image as it is.
    #[default]
    Keep,
    /// Upload a new image and drop the old one.
    Replace(ImageUpload),
    /// Drop the current image.
    Remove,
}

/// Discount code tracker for a single owner.
#[derive(Debug)]
pub struct Tracker<S, B> {
    store: S,
    blobs: B,
    owner_id: String,
    config: Config,
}

impl<S, B> Tracker<S, B>
where
    S: CodeStore,
    B: BlobStore,
{
    /// Creates a tracker for `owner_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner is blank.
    pub fn new(store: S, blobs: B, owner_id: &str, config: Config) -> Result<Self> {
        let owner_id = owner_id.trim();
        if owner_id.is_empty() {
            return Err(AppError::InvalidInput("Owner cannot be empty".to_string()));
        }
        Ok(Self {
            store,
            blobs,
            owner_id: owner_id.to_string(),
            config,
        })
    }

    /// Returns the owner this tracker acts for.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the underlying record store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying blob store.
    #[must_use]
    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    /// Builds the filtered view of the owner's records.
    ///
    /// Stale active records are expired and written back before the view is
    /// built. Write-back failures are logged and do not fail the view.
    ///
    /// # Arguments
    ///
    /// * `filter` - Status and store filters
    /// * `today` - The current calendar date
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be fetched.
    pub fn view(&self, filter: &Filter, today: NaiveDate) -> Result<View> {
        let codes = self.reconciled_codes(today)?;
        let view = build_view(&codes, filter, today, self.config.expiring_soon_days);
        debug!(
            owner = %self.owner_id,
            shown = view.items.len(),
            total = view.counts.total,
            "built view"
        );
        Ok(view)
    }

    /// Fetches the owner's records, reconciles them, and writes corrections
    /// back in parallel.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be fetched.
    pub fn reconciled_codes(&self, today: NaiveDate) -> Result<Vec<DiscountCode>> {
        let fetched = self.store.fetch_all(&self.owner_id)?;
        let outcome = reconcile(fetched, today);
        if outcome.is_clean() {
            return Ok(outcome.codes);
        }

        let now = unix_timestamp()?;
        let stale: Vec<&DiscountCode> = outcome.changed_codes().collect();
        let written: HashMap<String, DiscountCode> = stale
            .par_iter()
            .filter_map(|code| {
                match self
                    .store
                    .update_fields(&code.id, &FieldSet::status(Status::Expired, now))
                {
                    Ok(stored) => Some((stored.id.clone(), stored)),
                    Err(err) => {
                        warn!(id = %code.id, error = %err, "failed to write back expired status");
                        None
                    }
                }
            })
            .collect();

        info!(
            owner = %self.owner_id,
            expired = outcome.changed.len(),
            written = written.len(),
            "reconciled stale codes"
        );

        Ok(outcome
            .codes
            .into_iter()
            .map(|code| match written.get(&code.id) {
                Some(stored) => stored.clone(),
                None => code,
            })
            .collect())
    }

    /// Looks up one of the owner's records by full or partial ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is unknown or ambiguous.
    pub fn get(&self, id: &str) -> Result<DiscountCode> {
        let codes = self.store.fetch_all(&self.owner_id)?;
        let full_id = resolve_code_id(id, &codes)?;
        codes
            .into_iter()
            .find(|code| code.id == full_id)
            .ok_or_else(|| Error::NotFound(id.to_string()).into())
    }

    /// Marks a code as used.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is unknown or not active.
    pub fn mark_used(&self, id: &str, today: NaiveDate) -> Result<DiscountCode> {
        self.apply_event(id, Event::MarkUsed, today)
    }

    /// Restores a used code to active.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is unknown, not used, or past its
    /// expiry date.
    pub fn restore(&self, id: &str, today: NaiveDate) -> Result<DiscountCode> {
        self.apply_event(id, Event::Restore, today)
    }

    fn apply_event(&self, id: &str, event: Event, today: NaiveDate) -> Result<DiscountCode> {
        let current = self.get(id)?;
        let status = transition(&current, event, today)?;
        let updated = self
            .store
            .update_fields(&current.id, &FieldSet::status(status, unix_timestamp()?))?;

        info!(
            id = %updated.id,
            event = %event,
            from = %current.status,
            to = %updated.status,
            "applied transition"
        );
        Ok(updated)
    }

    /// Deletes a record and its receipt image.
    ///
    /// The image is removed only after the record is gone; failing to
    /// remove it is logged and does not fail the delete.
    ///
    /// # Returns
    ///
    /// The deleted record.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is unknown or the store fails.
    pub fn delete_record(&self, id: &str) -> Result<DiscountCode> {
        let current = self.get(id)?;
        self.store.delete(&current.id)?;
        if let Some(reference) = &current.image_url {
            self.discard_blob(reference);
        }
        info!(id = %current.id, "deleted discount code");
        Ok(current)
    }

    /// Records a new discount code, optionally with a receipt image.
    ///
    /// The record is always created for this tracker's owner, whatever
    /// `new.owner_id` says, and always starts `active`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request fails validation (checked before any upload)
    /// - The image is empty or too large
    /// - The blob or record store fails
    pub fn create_record(&self, new: NewCode, image: Option<ImageUpload>) -> Result<DiscountCode> {
        let mut new = NewCode {
            owner_id: self.owner_id.clone(),
            ..new
        }
        .normalized();
        new.validate(image.is_some())?;
        if let Some(upload) = &image {
            self.check_upload(upload)?;
        }

        let uploaded = match &image {
            Some(upload) => Some(self.upload_receipt(upload)?),
            None => None,
        };
        new.image_url = uploaded.clone();

        let now = unix_timestamp()?;
        match self.insert_with_fresh_id(new, now) {
            Ok(record) => {
                info!(id = %record.id, store = %record.store_name, "created discount code");
                Ok(record)
            }
            Err(err) => {
                if let Some(reference) = &uploaded {
                    self.discard_blob(reference);
                }
                Err(err)
            }
        }
    }

    fn insert_with_fresh_id(&self, new: NewCode, now: i64) -> Result<DiscountCode> {
        let mut last_id = String::new();
        for nonce in 0..MAX_ID_ATTEMPTS {
            let record = DiscountCode::create(new.clone(), now, nonce)?;
            match self.store.insert(record) {
                Ok(stored) => return Ok(stored),
                Err(Error::DuplicateId(id)) => {
                    debug!(id = %id, nonce, "ID collision, retrying");
                    last_id = id;
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(Error::DuplicateId(last_id).into())
    }

    /// Edits the user-editable fields and the receipt image of a record.
    ///
    /// The edited result is validated before anything is uploaded or
    /// written. A replaced or removed image is deleted from the blob store
    /// only after the record is saved.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The code is unknown or ambiguous
    /// - The edit requests no change
    /// - The edited record would fail validation
    /// - The image is empty or too large
    /// - The blob or record store fails
    pub fn edit_record(&self, id: &str, edit: CodeEdit, image: ImageChange) -> Result<DiscountCode> {
        if edit.is_empty() && image == ImageChange::Keep {
            return Err(AppError::InvalidInput("No changes requested".to_string()));
        }

        let current = self.get(id)?;
        let mut preview = current.clone();
        edit.apply_to(&mut preview);
        match &image {
            ImageChange::Keep => {}
            ImageChange::Remove => preview.image_url = None,
            ImageChange::Replace(upload) => {
                self.check_upload(upload)?;
                preview.image_url = Some(receipt_file_name(&upload.file_name, 0));
            }
        }
        preview.validate()?;

        let uploaded = match &image {
            ImageChange::Replace(upload) => Some(self.upload_receipt(upload)?),
            _ => None,
        };

        let fields = FieldSet::from_edit(&edit, unix_timestamp()?);
        let fields = match &image {
            ImageChange::Keep => fields,
            ImageChange::Remove => fields.with_image_url(None),
            ImageChange::Replace(_) => fields.with_image_url(uploaded.clone()),
        };

        let updated = match self.store.update_fields(&current.id, &fields) {
            Ok(updated) => updated,
            Err(err) => {
                if let Some(reference) = &uploaded {
                    self.discard_blob(reference);
                }
                return Err(err.into());
            }
        };

        if image != ImageChange::Keep {
            if let Some(old) = &current.image_url {
                self.discard_blob(old);
            }
        }

        info!(id = %updated.id, "edited discount code");
        Ok(updated)
    }

    fn check_upload(&self, upload: &ImageUpload) -> Result<()> {
        let size = upload.bytes.len() as u64;
        if size == 0 {
            return Err(Error::Validation("Receipt image is empty".to_string()).into());
        }
        if size > self.config.max_image_bytes {
            return Err(Error::Validation(format!(
                "Receipt image is {} bytes, the limit is {} bytes",
                size, self.config.max_image_bytes
            ))
            .into());
        }
        Ok(())
    }

    fn upload_receipt(&self, upload: &ImageUpload) -> Result<String> {
        let millis = unix_millis()?;
        let mut last_err = None;
        for offset in 0..MAX_UPLOAD_ATTEMPTS {
            let file_name = receipt_file_name(&upload.file_name, millis + offset);
            match self.blobs.upload(&self.owner_id, &file_name, &upload.bytes) {
                Ok(reference) => {
                    debug!(reference = %reference, bytes = upload.bytes.len(), "uploaded receipt");
                    return Ok(reference);
                }
                Err(Error::DuplicateId(name)) => {
                    last_err = Some(Error::DuplicateId(name));
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(last_err
            .unwrap_or_else(|| Error::Upstream("Receipt upload failed".to_string()))
            .into())
    }

    fn discard_blob(&self, reference: &str) {
        if let Err(err) = self.blobs.remove(&self.owner_id, reference) {
            warn!(reference = %reference, error = %err, "failed to remove receipt image");
        }
    }
}
