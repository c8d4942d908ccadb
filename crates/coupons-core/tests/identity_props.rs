// Rust guideline compliant 2026-10-18

//! Property-based tests for identity module.
//!
//! These tests validate hash-based ID generation, validation, and partial
//! ID resolution.

use chrono::NaiveDate;
use coupons_core::identity::{generate_id, resolve_partial_id, validate_id_format};
use coupons_core::{DiscountCode, Error, Status};
use proptest::prelude::*;

fn arb_store() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 &]{1,60}").unwrap()
}

fn arb_owner() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z0-9_-]{1,30}").unwrap()
}

fn arb_timestamp() -> impl Strategy<Value = i64> {
    1i64..4_000_000_000i64
}

fn record(id: &str) -> DiscountCode {
    DiscountCode {
        id: id.to_string(),
        owner_id: "alice".to_string(),
        store_name: "Zara".to_string(),
        expiry_date: NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        code: Some("X".to_string()),
        conditions: None,
        min_amount: None,
        image_url: None,
        status: Status::Active,
        created_at: 1,
        updated_at: 1,
    }
}

proptest! {
    /// Generated IDs always pass format validation.
    #[test]
    fn prop_generated_ids_are_valid(
        store in arb_store(),
        owner in arb_owner(),
        timestamp in arb_timestamp(),
        nonce in any::<u32>(),
    ) {
        let id = generate_id(&store, &owner, timestamp, nonce);
        prop_assert!(id.starts_with("dc-"));
        prop_assert_eq!(id.len(), 11);
        prop_assert!(validate_id_format(&id).is_ok());
    }

    /// Generation is deterministic.
    #[test]
    fn prop_generation_deterministic(
        store in arb_store(),
        owner in arb_owner(),
        timestamp in arb_timestamp(),
        nonce in any::<u32>(),
    ) {
        prop_assert_eq!(
            generate_id(&store, &owner, timestamp, nonce),
            generate_id(&store, &owner, timestamp, nonce)
        );
    }

    /// Any prefix of at least one hash character resolves to the full ID
    /// when it is the only record.
    #[test]
    fn prop_partial_resolves_unique(
        store in arb_store(),
        owner in arb_owner(),
        timestamp in arb_timestamp(),
        take in 1usize..=8,
        with_prefix in any::<bool>(),
    ) {
        let id = generate_id(&store, &owner, timestamp, 0);
        let hash = &id[3..3 + take];
        let partial = if with_prefix { format!("dc-{}", hash) } else { hash.to_string() };
        let resolved = resolve_partial_id(&partial, &[record(&id)]).unwrap();
        prop_assert_eq!(resolved, id);
    }
}

#[test]
fn test_validate_rejects_bad_ids() {
    for bad in ["", "dc-", "dc-12345", "dc-123456789", "cp-123456", "dc-ABCDEF12", "dc-zzzzzz"] {
        assert!(validate_id_format(bad).is_err(), "{} should be rejected", bad);
    }
    assert!(validate_id_format("dc-abcdef").is_ok());
}

#[test]
fn test_ambiguous_partial() {
    let codes = [record("dc-ab000001"), record("dc-ab000002")];
    match resolve_partial_id("ab", &codes) {
        Err(Error::AmbiguousId(partial, matches)) => {
            assert_eq!(partial, "ab");
            assert_eq!(matches, vec!["dc-ab000001".to_string(), "dc-ab000002".to_string()]);
        }
        other => panic!("expected ambiguity, got {:?}", other),
    }
}

#[test]
fn test_exact_match_wins_over_prefix() {
    let codes = [record("dc-abcdef"), record("dc-abcdef01")];
    assert_eq!(resolve_partial_id("dc-abcdef", &codes).unwrap(), "dc-abcdef");
}

#[test]
fn test_unknown_partial_not_found() {
    let codes = [record("dc-ab000001")];
    assert!(matches!(resolve_partial_id("ff", &codes), Err(Error::NotFound(_))));
    assert!(matches!(resolve_partial_id("  ", &codes), Err(Error::NotFound(_))));
}
