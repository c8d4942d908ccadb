// Rust guideline compliant 2026-10-18

//! Clock helpers for Coupons.
//!
//! These are the only functions in the workspace that read the system
//! clock; everything below the app layer takes dates and timestamps as
//! arguments.

use crate::error::{AppError, Result};
use chrono::{Local, NaiveDate};
use std::time::{SystemTime, UNIX_EPOCH};

fn since_epoch() -> Result<std::time::Duration> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|err| AppError::InvalidInput(format!("System time before epoch: {err}")))
}

/// Returns the current Unix timestamp in seconds.
///
/// # Errors
///
/// Returns an error if the system clock is before the Unix epoch.
pub fn unix_timestamp() -> Result<i64> {
    Ok(since_epoch()?.as_secs() as i64)
}

/// Returns the current Unix timestamp in milliseconds.
///
/// # Errors
///
/// Returns an error if the system clock is before the Unix epoch.
pub fn unix_millis() -> Result<i64> {
    Ok(since_epoch()?.as_millis() as i64)
}

/// Returns today's date in the local time zone.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
