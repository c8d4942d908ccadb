// Rust guideline compliant 2026-10-18

//! Integration tests for the tracker facade.

use chrono::{Days, NaiveDate};
use coupons_app::{AppError, ErrorCode, ImageChange, ImageUpload, Tracker};
use coupons_core::{
    classify, BlobStore, CodeEdit, CodeStore, Config, DiscountCode, DisplayStatus, Error,
    FieldSet, Filter, FsBlobStore, MemoryStore, NewCode, Status, StatusFilter,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
}

fn days_from_today(offset: i64) -> NaiveDate {
    if offset >= 0 {
        today() + Days::new(offset as u64)
    } else {
        today() - Days::new(offset.unsigned_abs())
    }
}

fn new_code(store: &str, expiry_offset: i64, code: Option<&str>) -> NewCode {
    NewCode {
        store_name: store.to_string(),
        expiry_date: Some(days_from_today(expiry_offset)),
        code: code.map(str::to_string),
        ..NewCode::default()
    }
}

fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        bytes: bytes.to_vec(),
    }
}

/// Blob store kept in memory, with switchable removal failures.
#[derive(Debug, Default)]
struct MemoryBlobs {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    fail_removals: bool,
}

impl MemoryBlobs {
    fn failing_removals() -> Self {
        Self {
            fail_removals: true,
            ..Self::default()
        }
    }

    fn references(&self) -> Vec<String> {
        let mut refs: Vec<String> = self.blobs.lock().unwrap().keys().cloned().collect();
        refs.sort();
        refs
    }
}

impl BlobStore for MemoryBlobs {
    fn upload(&self, owner_id: &str, file_name: &str, bytes: &[u8]) -> coupons_core::Result<String> {
        let reference = format!("{}/{}", owner_id, file_name);
        let mut blobs = self.blobs.lock().unwrap();
        if blobs.contains_key(&reference) {
            return Err(Error::DuplicateId(reference));
        }
        blobs.insert(reference.clone(), bytes.to_vec());
        Ok(reference)
    }

    fn remove(&self, _owner_id: &str, reference: &str) -> coupons_core::Result<()> {
        if self.fail_removals {
            return Err(Error::Upstream("blob store offline".to_string()));
        }
        self.blobs
            .lock()
            .unwrap()
            .remove(reference)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(reference.to_string()))
    }
}

/// Record store whose updates always fail.
#[derive(Debug, Default)]
struct ReadOnlyStore {
    inner: MemoryStore,
}

impl CodeStore for ReadOnlyStore {
    fn fetch_all(&self, owner_id: &str) -> coupons_core::Result<Vec<DiscountCode>> {
        self.inner.fetch_all(owner_id)
    }

    fn insert(&self, record: DiscountCode) -> coupons_core::Result<DiscountCode> {
        self.inner.insert(record)
    }

    fn update_fields(&self, _id: &str, _fields: &FieldSet) -> coupons_core::Result<DiscountCode> {
        Err(Error::Upstream("store is read-only".to_string()))
    }

    fn delete(&self, id: &str) -> coupons_core::Result<()> {
        self.inner.delete(id)
    }
}

/// Record store whose deletes always fail.
struct UndeletableStore {
    inner: MemoryStore,
}

impl CodeStore for UndeletableStore {
    fn fetch_all(&self, owner_id: &str) -> coupons_core::Result<Vec<DiscountCode>> {
        self.inner.fetch_all(owner_id)
    }

    fn insert(&self, record: DiscountCode) -> coupons_core::Result<DiscountCode> {
        self.inner.insert(record)
    }

    fn update_fields(&self, id: &str, fields: &FieldSet) -> coupons_core::Result<DiscountCode> {
        self.inner.update_fields(id, fields)
    }

    fn delete(&self, _id: &str) -> coupons_core::Result<()> {
        Err(Error::Upstream("store down".to_string()))
    }
}

fn tracker() -> Tracker<MemoryStore, MemoryBlobs> {
    Tracker::new(MemoryStore::new(), MemoryBlobs::default(), "alice", Config::default()).unwrap()
}

#[test]
fn scenario_create_without_code_or_image_is_rejected() {
    let tracker = tracker();
    let err = tracker
        .create_record(new_code("Zara", 1, None), None)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert!(tracker.store().is_empty());
}

#[test]
fn scenario_code_created_past_expiry_becomes_expired() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", -1, Some("X1")), None)
        .unwrap();
    assert_eq!(created.status, Status::Active);

    let view = tracker.view(&Filter::default(), today()).unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].code.status, Status::Expired);
    assert_eq!(view.items[0].display, DisplayStatus::Expired);
    assert_eq!(view.counts.expired, 1);

    let stored = tracker.get(&created.id).unwrap();
    assert_eq!(stored.status, Status::Expired);
    assert_eq!(classify(&stored, today()), DisplayStatus::Expired);
}

#[test]
fn scenario_mark_used_then_restore_in_date() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("IKEA", 2, Some("HOME15")), None)
        .unwrap();

    let used = tracker.mark_used(&created.id, today()).unwrap();
    assert_eq!(used.status, Status::Used);

    let restored = tracker.restore(&created.id, today()).unwrap();
    assert_eq!(restored.status, Status::Active);
}

#[test]
fn scenario_restore_after_expiry_is_rejected() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("IKEA", -1, Some("HOME15")), None)
        .unwrap();

    let used = tracker.mark_used(&created.id, today()).unwrap();
    assert_eq!(used.status, Status::Used);

    let err = tracker.restore(&created.id, today()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::GuardViolation);
    assert_eq!(tracker.get(&created.id).unwrap().status, Status::Used);
}

#[test]
fn scenario_expiring_soon_window() {
    let tracker = tracker();
    tracker
        .create_record(new_code("Soon", 2, Some("A")), None)
        .unwrap();
    tracker
        .create_record(new_code("Later", 4, Some("B")), None)
        .unwrap();

    let view = tracker.view(&Filter::default(), today()).unwrap();
    let displays: Vec<_> = view
        .items
        .iter()
        .map(|item| (item.code.store_name.as_str(), item.display))
        .collect();
    assert_eq!(
        displays,
        vec![
            ("Soon", DisplayStatus::ExpiringSoon),
            ("Later", DisplayStatus::Active)
        ]
    );
}

#[test]
fn test_configured_window_is_used() {
    let config = Config {
        expiring_soon_days: 7,
        ..Config::default()
    };
    let tracker =
        Tracker::new(MemoryStore::new(), MemoryBlobs::default(), "alice", config).unwrap();
    tracker
        .create_record(new_code("Later", 4, Some("B")), None)
        .unwrap();

    let view = tracker.view(&Filter::default(), today()).unwrap();
    assert_eq!(view.items[0].display, DisplayStatus::ExpiringSoon);
}

#[test]
fn test_view_filters_and_counts() {
    let tracker = tracker();
    let zara = tracker
        .create_record(new_code("Zara", 10, Some("Z")), None)
        .unwrap();
    tracker
        .create_record(new_code("Zalando", 5, Some("ZL")), None)
        .unwrap();
    tracker
        .create_record(new_code("IKEA", -3, Some("I")), None)
        .unwrap();
    tracker.mark_used(&zara.id, today()).unwrap();

    let filter = Filter {
        status: StatusFilter::All,
        store: "za".to_string(),
    };
    let view = tracker.view(&filter, today()).unwrap();
    let stores: Vec<_> = view.items.iter().map(|i| i.code.store_name.as_str()).collect();
    assert_eq!(stores, vec!["Zalando", "Zara"]);
    assert_eq!(view.counts.total, 3);
    assert_eq!(view.counts.active, 1);
    assert_eq!(view.counts.used, 1);
    assert_eq!(view.counts.expired, 1);
    assert_eq!(view.available_stores, vec!["IKEA", "Zalando", "Zara"]);

    let filter = Filter {
        status: StatusFilter::Used,
        store: String::new(),
    };
    let view = tracker.view(&filter, today()).unwrap();
    assert_eq!(view.items.len(), 1);
    assert_eq!(view.items[0].code.id, zara.id);
}

#[test]
fn test_failed_write_back_does_not_fail_view() {
    let expired = DiscountCode::create(
        NewCode {
            owner_id: "alice".to_string(),
            ..new_code("Zara", -1, Some("X1"))
        },
        1_700_000_000,
        0,
    )
    .unwrap();
    let store = ReadOnlyStore {
        inner: MemoryStore::with_records([expired.clone()]),
    };
    let tracker = Tracker::new(store, MemoryBlobs::default(), "alice", Config::default()).unwrap();

    let view = tracker.view(&Filter::default(), today()).unwrap();
    assert_eq!(view.items[0].code.status, Status::Expired);
    assert_eq!(view.counts.expired, 1);

    let stored = tracker.store().inner.fetch_all("alice").unwrap();
    assert_eq!(stored[0].status, Status::Active);
}

#[test]
fn test_upstream_failure_surfaces_on_transition() {
    let record = DiscountCode::create(
        NewCode {
            owner_id: "alice".to_string(),
            ..new_code("Zara", 5, Some("X1"))
        },
        1_700_000_000,
        0,
    )
    .unwrap();
    let store = ReadOnlyStore {
        inner: MemoryStore::with_records([record.clone()]),
    };
    let tracker = Tracker::new(store, MemoryBlobs::default(), "alice", Config::default()).unwrap();

    let err = tracker.mark_used(&record.id, today()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UpstreamError);
}

#[test]
fn test_expired_code_cannot_be_marked_used() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", -2, Some("X1")), None)
        .unwrap();
    tracker.view(&Filter::default(), today()).unwrap();

    let err = tracker.mark_used(&created.id, today()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::GuardViolation);
}

#[test]
fn test_unknown_and_foreign_ids_not_found() {
    let tracker = tracker();
    let err = tracker.mark_used("dc-deadbeef", today()).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);

    let foreign = DiscountCode::create(
        NewCode {
            owner_id: "bob".to_string(),
            ..new_code("Zara", 5, Some("X1"))
        },
        1_700_000_000,
        0,
    )
    .unwrap();
    tracker.store().insert(foreign.clone()).unwrap();
    let err = tracker.delete_record(&foreign.id).unwrap_err();
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(tracker.store().len(), 1);
}

#[test]
fn test_partial_id_lookup() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", 5, Some("X1")), None)
        .unwrap();
    let hash = &created.id[3..9];
    assert_eq!(tracker.get(hash).unwrap().id, created.id);
}

#[test]
fn test_owner_is_taken_from_tracker() {
    let tracker = tracker();
    let created = tracker
        .create_record(
            NewCode {
                owner_id: "mallory".to_string(),
                ..new_code("Zara", 5, Some("X1"))
            },
            None,
        )
        .unwrap();
    assert_eq!(created.owner_id, "alice");
}

#[test]
fn test_blank_owner_rejected() {
    let result = Tracker::new(MemoryStore::new(), MemoryBlobs::default(), "  ", Config::default());
    assert!(matches!(result, Err(AppError::InvalidInput(_))));
}

#[test]
fn test_create_with_image_only() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", 5, None), Some(upload("Receipt.PNG", b"png")))
        .unwrap();

    let reference = created.image_url.clone().unwrap();
    assert!(reference.starts_with("alice/"));
    assert!(reference.ends_with(".png"));
    assert_eq!(tracker.blobs().references(), vec![reference]);
}

#[test]
fn test_oversized_or_empty_image_rejected_before_io() {
    let config = Config {
        max_image_bytes: 4,
        ..Config::default()
    };
    let tracker =
        Tracker::new(MemoryStore::new(), MemoryBlobs::default(), "alice", config).unwrap();

    let err = tracker
        .create_record(new_code("Zara", 5, None), Some(upload("r.jpg", b"12345")))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);

    let err = tracker
        .create_record(new_code("Zara", 5, None), Some(upload("r.jpg", b"")))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);

    assert!(tracker.store().is_empty());
    assert!(tracker.blobs().references().is_empty());
}

#[test]
fn test_edit_fields_keeps_status() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", 5, Some("X1")), None)
        .unwrap();
    tracker.mark_used(&created.id, today()).unwrap();

    let edit = CodeEdit {
        store_name: Some("Zara Home".to_string()),
        conditions: Some(Some("in store only".to_string())),
        ..CodeEdit::default()
    };
    let edited = tracker
        .edit_record(&created.id, edit, ImageChange::Keep)
        .unwrap();
    assert_eq!(edited.store_name, "Zara Home");
    assert_eq!(edited.conditions.as_deref(), Some("in store only"));
    assert_eq!(edited.status, Status::Used);
}

#[test]
fn test_edit_cannot_clear_last_identifier() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", 5, None), Some(upload("r.jpg", b"jpg")))
        .unwrap();

    let err = tracker
        .edit_record(&created.id, CodeEdit::default(), ImageChange::Remove)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert_eq!(tracker.blobs().references().len(), 1);
    assert_eq!(tracker.get(&created.id).unwrap(), created);
}

#[test]
fn test_edit_replaces_image_and_removes_old_blob() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", 5, None), Some(upload("old.jpg", b"old")))
        .unwrap();
    let old_reference = created.image_url.clone().unwrap();

    let edited = tracker
        .edit_record(
            &created.id,
            CodeEdit::default(),
            ImageChange::Replace(upload("new.png", b"new")),
        )
        .unwrap();
    let new_reference = edited.image_url.clone().unwrap();
    assert_ne!(new_reference, old_reference);
    assert_eq!(tracker.blobs().references(), vec![new_reference]);
}

#[test]
fn test_edit_remove_image_when_code_present() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", 5, Some("X1")), Some(upload("r.jpg", b"jpg")))
        .unwrap();

    let edited = tracker
        .edit_record(&created.id, CodeEdit::default(), ImageChange::Remove)
        .unwrap();
    assert!(edited.image_url.is_none());
    assert!(tracker.blobs().references().is_empty());
}

#[test]
fn test_empty_edit_rejected() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", 5, Some("X1")), None)
        .unwrap();
    let err = tracker
        .edit_record(&created.id, CodeEdit::default(), ImageChange::Keep)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidInput);
}

#[test]
fn test_delete_removes_image_and_record() {
    let tracker = tracker();
    let created = tracker
        .create_record(new_code("Zara", 5, Some("X1")), Some(upload("r.jpg", b"jpg")))
        .unwrap();

    let deleted = tracker.delete_record(&created.id).unwrap();
    assert_eq!(deleted.id, created.id);
    assert!(tracker.store().is_empty());
    assert!(tracker.blobs().references().is_empty());
    assert_eq!(
        tracker.delete_record(&created.id).unwrap_err().code(),
        ErrorCode::NotFound
    );
}

#[test]
fn test_failed_delete_keeps_record_and_image() {
    let store = UndeletableStore {
        inner: MemoryStore::new(),
    };
    let tracker = Tracker::new(store, MemoryBlobs::default(), "alice", Config::default()).unwrap();
    let created = tracker
        .create_record(new_code("Zara", 5, None), Some(upload("r.jpg", b"jpg")))
        .unwrap();
    let reference = created.image_url.clone().unwrap();

    let err = tracker.delete_record(&created.id).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UpstreamError);

    let stored = tracker.get(&created.id).unwrap();
    assert_eq!(stored.image_url.as_deref(), Some(reference.as_str()));
    assert_eq!(tracker.blobs().references(), vec![reference]);
}

#[test]
fn test_delete_survives_blob_removal_failure() {
    let tracker = Tracker::new(
        MemoryStore::new(),
        MemoryBlobs::failing_removals(),
        "alice",
        Config::default(),
    )
    .unwrap();
    let created = tracker
        .create_record(new_code("Zara", 5, None), Some(upload("r.jpg", b"jpg")))
        .unwrap();

    tracker.delete_record(&created.id).unwrap();
    assert!(tracker.store().is_empty());
}

#[test]
fn test_filesystem_blob_store_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let blobs = FsBlobStore::new(temp_dir.path().join("receipts"));
    let tracker = Tracker::new(MemoryStore::new(), blobs, "alice", Config::default()).unwrap();

    let created = tracker
        .create_record(new_code("Zara", 5, None), Some(upload("r.jpg", b"jpg")))
        .unwrap();
    let path = tracker
        .blobs()
        .resolve(created.image_url.as_deref().unwrap())
        .unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"jpg");

    tracker.delete_record(&created.id).unwrap();
    assert!(!path.exists());
}
