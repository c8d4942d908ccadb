// Rust guideline compliant 2026-10-18

//! Hash-based ID generation and partial ID resolution.
//!
//! Discount code IDs have the form `dc-` followed by 8 lowercase hexadecimal
//! characters taken from a SHA-256 digest of the creation inputs. IDs from
//! older files may carry 6 to 8 characters; both are accepted.

use crate::{DiscountCode, Error, Result};
use sha2::{Digest, Sha256};

/// Prefix shared by every discount code ID.
pub const ID_PREFIX: &str = "dc-";

const HASH_LEN: usize = 8;
const MIN_HASH_LEN: usize = 6;

/// Generates a discount code ID.
///
/// # Arguments
///
/// * `store_name` - Store the code belongs to
/// * `owner_id` - Owner of the code
/// * `timestamp` - Creation timestamp
/// * `nonce` - Collision counter
///
/// # Returns
///
/// An ID of the form `dc-XXXXXXXX`.
pub fn generate_id(store_name: &str, owner_id: &str, timestamp: i64, nonce: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(store_name.as_bytes());
    hasher.update([0u8]);
    hasher.update(owner_id.as_bytes());
    hasher.update(timestamp.to_le_bytes());
    hasher.update(nonce.to_le_bytes());

    let hex = format!("{:x}", hasher.finalize());
    format!("{}{}", ID_PREFIX, &hex[..HASH_LEN])
}

/// Validates that an ID matches the `dc-` + hex format.
///
/// # Errors
///
/// Returns a validation error if the prefix is missing or the hash part has
/// the wrong length or non-hex characters.
pub fn validate_id_format(id: &str) -> Result<()> {
    let hash = id
        .strip_prefix(ID_PREFIX)
        .ok_or_else(|| Error::Validation(format!("ID must start with '{}': {}", ID_PREFIX, id)))?;

    if hash.len() < MIN_HASH_LEN || hash.len() > HASH_LEN {
        return Err(Error::Validation(format!(
            "ID hash must be {}-{} characters: {}",
            MIN_HASH_LEN, HASH_LEN, id
        )));
    }

    if !hash.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()) {
        return Err(Error::Validation(format!(
            "ID hash must be lowercase hexadecimal: {}",
            id
        )));
    }

    Ok(())
}

/// Resolves a full or partial ID against a set of records.
///
/// The `dc-` prefix is optional in `partial`. An exact match wins over
/// prefix matches.
///
/// # Errors
///
/// Returns an error if:
/// - The partial ID is empty
/// - No record matches
/// - More than one record matches
pub fn resolve_partial_id(partial: &str, codes: &[DiscountCode]) -> Result<String> {
    let trimmed = partial.trim().to_lowercase();
    let hash = trimmed.strip_prefix(ID_PREFIX).unwrap_or(&trimmed);
    if hash.is_empty() {
        return Err(Error::NotFound(partial.to_string()));
    }
    let wanted = format!("{}{}", ID_PREFIX, hash);

    if let Some(code) = codes.iter().find(|code| code.id == wanted) {
        return Ok(code.id.clone());
    }

    let mut matches: Vec<String> = codes
        .iter()
        .filter(|code| code.id.starts_with(&wanted))
        .map(|code| code.id.clone())
        .collect();
    matches.sort();
    matches.dedup();

    match matches.len() {
        0 => Err(Error::NotFound(partial.to_string())),
        1 => Ok(matches.remove(0)),
        _ => Err(Error::AmbiguousId(partial.to_string(), matches)),
    }
}
