// Rust guideline compliant 2026-10-18

//! Parsing helpers for user-supplied values.

use crate::error::{AppError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
///
/// Returns an error if the value is not a valid date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| AppError::InvalidInput(format!("Invalid date '{}': {}", value, err)))
}

/// Parses a monetary amount such as `50` or `49.90`.
///
/// Negative amounts are accepted here and rejected by record validation.
///
/// # Errors
///
/// Returns an error if the value is not a decimal number.
pub fn parse_amount(value: &str) -> Result<Decimal> {
    Decimal::from_str(value.trim())
        .map_err(|err| AppError::InvalidInput(format!("Invalid amount '{}': {}", value, err)))
}
