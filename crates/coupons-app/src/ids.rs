// Rust guideline compliant 2026-10-18

//! ID resolution helpers for Coupons.

use crate::error::Result;
use coupons_core::{identity, DiscountCode};

/// Resolves a partial discount code ID to its canonical full ID.
///
/// # Arguments
///
/// * `partial` - Partial or full ID, with or without the `dc-` prefix
/// * `codes` - Records to match against
///
/// # Returns
///
/// The canonical ID.
///
/// # Errors
///
/// Returns an error if the partial ID is ambiguous or not found.
pub fn resolve_code_id(partial: &str, codes: &[DiscountCode]) -> Result<String> {
    Ok(identity::resolve_partial_id(partial, codes)?)
}
