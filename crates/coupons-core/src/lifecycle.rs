// Rust guideline compliant 2026-10-18

//! Status reconciliation and display classification.
//!
//! Both functions take the current date as a parameter and never read a
//! clock, so the same inputs always produce the same outputs.

use crate::fsm::Event;
use crate::{DiscountCode, DisplayStatus, Status};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Default width, in days, of the expiring-soon window.
pub const DEFAULT_EXPIRING_SOON_DAYS: u32 = 3;

/// Result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Records in input order, with stale entries corrected.
    pub codes: Vec<DiscountCode>,
    /// IDs of the records whose status was corrected.
    pub changed: Vec<String>,
}

impl Reconciliation {
    /// Returns true if no record needed correcting.
    pub fn is_clean(&self) -> bool {
        self.changed.is_empty()
    }

    /// Returns the corrected records, for writing back to the store.
    pub fn changed_codes(&self) -> impl Iterator<Item = &DiscountCode> {
        let changed: HashSet<&str> = self.changed.iter().map(String::as_str).collect();
        self.codes
            .iter()
            .filter(move |code| changed.contains(code.id.as_str()))
    }
}

/// Corrects records stored as active whose expiry date has passed.
///
/// # Arguments
///
/// * `codes` - Records as fetched from the store
/// * `today` - The current calendar date
///
/// # Returns
///
/// The reconciled records and the IDs that changed. Used and expired
/// records are returned untouched.
pub fn reconcile(codes: Vec<DiscountCode>, today: NaiveDate) -> Reconciliation {
    let mut changed = Vec::new();
    let codes = codes
        .into_iter()
        .map(|mut code| {
            if let Ok(status) = code.status.apply(Event::Expire, code.expiry_date, today) {
                code.status = status;
                changed.push(code.id.clone());
            }
            code
        })
        .collect();

    Reconciliation { codes, changed }
}

/// Classifies a code for display using the default expiring-soon window.
pub fn classify(code: &DiscountCode, today: NaiveDate) -> DisplayStatus {
    classify_within(code, today, DEFAULT_EXPIRING_SOON_DAYS)
}

/// Classifies a code for display.
///
/// # Arguments
///
/// * `code` - The record to classify
/// * `today` - The current calendar date
/// * `window_days` - Width of the expiring-soon window; both ends inclusive
///
/// # Returns
///
/// `Used` and `Expired` follow the stored status. An active code whose
/// expiry date has passed is shown as `Expired` even before reconciliation
/// writes it back. An active code expiring within `[today, today + window]`
/// is `ExpiringSoon`.
pub fn classify_within(code: &DiscountCode, today: NaiveDate, window_days: u32) -> DisplayStatus {
    match code.status {
        Status::Used => DisplayStatus::Used,
        Status::Expired => DisplayStatus::Expired,
        Status::Active => match days_until_expiry(code, today) {
            days if days < 0 => DisplayStatus::Expired,
            days if days <= i64::from(window_days) => DisplayStatus::ExpiringSoon,
            _ => DisplayStatus::Active,
        },
    }
}

/// Returns the number of days from `today` until the code expires.
///
/// Negative once the expiry date has passed.
pub fn days_until_expiry(code: &DiscountCode, today: NaiveDate) -> i64 {
    (code.expiry_date - today).num_days()
}
