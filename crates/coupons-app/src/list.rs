// Rust guideline compliant 2026-10-18

//! Listing and filtering helpers for Coupons.

use crate::error::{AppError, Result};
use coupons_core::{Filter, Status, StatusFilter};

/// Parses a stored status name.
///
/// # Errors
///
/// Returns an error if the status is invalid.
pub fn parse_status(value: &str) -> Result<Status> {
    match value.trim().to_lowercase().as_str() {
        "active" => Ok(Status::Active),
        "used" => Ok(Status::Used),
        "expired" => Ok(Status::Expired),
        _ => Err(AppError::InvalidInput(format!("Invalid status: {}", value))),
    }
}

/// Parses a status filter string into a `StatusFilter` value.
///
/// # Arguments
///
/// * `value` - One of `all`, `active`, `used`, `expired`
///
/// # Returns
///
/// The parsed filter.
///
/// # Errors
///
/// Returns an error if the value names no bucket.
pub fn parse_status_filter(value: &str) -> Result<StatusFilter> {
    if value.trim().eq_ignore_ascii_case("all") {
        return Ok(StatusFilter::All);
    }
    let status = parse_status(value).map_err(|_| {
        AppError::InvalidInput(format!(
            "Invalid status filter: {} (expected all, active, used or expired)",
            value
        ))
    })?;
    Ok(match status {
        Status::Active => StatusFilter::Active,
        Status::Used => StatusFilter::Used,
        Status::Expired => StatusFilter::Expired,
    })
}

/// Builds a view filter from optional command-line values.
///
/// # Arguments
///
/// * `status` - Optional status filter; defaults to `all`
/// * `store` - Optional store name fragment
///
/// # Errors
///
/// Returns an error if the status filter is invalid.
pub fn build_filter(status: Option<&str>, store: Option<&str>) -> Result<Filter> {
    let status = match status {
        Some(value) => parse_status_filter(value)?,
        None => StatusFilter::All,
    };
    Ok(Filter {
        status,
        store: store.unwrap_or_default().to_string(),
    })
}
