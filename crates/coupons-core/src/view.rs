// Rust guideline compliant 2026-10-18

//! Filtering, sorting and aggregation of discount codes.
//!
//! Views are computed from an already reconciled collection. Nothing here
//! touches storage.

use crate::lifecycle::classify_within;
use crate::{DiscountCode, DisplayStatus, Status};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

const PARALLEL_THRESHOLD: usize = 1_000;

/// Status bucket selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    /// Every record.
    #[default]
    All,
    /// Stored status `active`, including codes expiring soon.
    Active,
    /// Stored status `used`.
    Used,
    /// Stored status `expired`.
    Expired,
}

impl StatusFilter {
    /// Returns true if the stored status falls in this bucket.
    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == Status::Active,
            StatusFilter::Used => status == Status::Used,
            StatusFilter::Expired => status == Status::Expired,
        }
    }
}

/// Filter parameters for a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Status bucket.
    pub status: StatusFilter,
    /// Case-insensitive substring of the store name; blank disables it.
    pub store: String,
}

impl Filter {
    /// Returns true if the record passes both filters.
    pub fn matches(&self, code: &DiscountCode) -> bool {
        if !self.status.matches(code.status) {
            return false;
        }

        let needle = self.store.trim();
        if needle.is_empty() {
            return true;
        }
        code.store_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Aggregate counts over the unfiltered collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Records stored as active.
    pub active: usize,
    /// Records stored as used.
    pub used: usize,
    /// Records stored as expired.
    pub expired: usize,
    /// All records.
    pub total: usize,
}

/// A record paired with its display classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewItem {
    /// The reconciled record.
    #[serde(flatten)]
    pub code: DiscountCode,
    /// Display classification for today.
    pub display: DisplayStatus,
}

/// Everything the presentation layer needs to render the code list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    /// Filtered records, sorted by expiry date then ID.
    pub items: Vec<ViewItem>,
    /// Counts over all records, independent of the filter.
    pub counts: Counts,
    /// Distinct store names across all records, sorted.
    pub available_stores: Vec<String>,
}

/// Filters and sorts records.
///
/// # Arguments
///
/// * `codes` - Reconciled records
/// * `filter` - Status and store filters
///
/// # Returns
///
/// Matching records sorted by `expiry_date` ascending, ties by `id`.
pub fn filter_codes(codes: &[DiscountCode], filter: &Filter) -> Vec<DiscountCode> {
    let mut filtered: Vec<DiscountCode> = if codes.len() >= PARALLEL_THRESHOLD {
        codes
            .par_iter()
            .filter(|code| filter.matches(code))
            .cloned()
            .collect()
    } else {
        codes
            .iter()
            .filter(|code| filter.matches(code))
            .cloned()
            .collect()
    };

    sort_codes(&mut filtered);
    filtered
}

/// Sorts records by expiry date ascending, then by ID.
pub fn sort_codes(codes: &mut [DiscountCode]) {
    codes.sort_by(|a, b| {
        a.expiry_date
            .cmp(&b.expiry_date)
            .then_with(|| a.id.cmp(&b.id))
    });
}

/// Counts records per stored status.
pub fn count_codes(codes: &[DiscountCode]) -> Counts {
    codes.iter().fold(Counts::default(), |mut counts, code| {
        match code.status {
            Status::Active => counts.active += 1,
            Status::Used => counts.used += 1,
            Status::Expired => counts.expired += 1,
        }
        counts.total += 1;
        counts
    })
}

/// Returns the distinct store names, sorted.
pub fn available_stores(codes: &[DiscountCode]) -> Vec<String> {
    codes
        .iter()
        .map(|code| code.store_name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Builds the complete view for the presentation layer.
///
/// # Arguments
///
/// * `codes` - Reconciled records
/// * `filter` - Status and store filters
/// * `today` - The current calendar date
/// * `window_days` - Width of the expiring-soon window
pub fn build_view(
    codes: &[DiscountCode],
    filter: &Filter,
    today: NaiveDate,
    window_days: u32,
) -> View {
    let items = filter_codes(codes, filter)
        .into_iter()
        .map(|code| {
            let display = classify_within(&code, today, window_days);
            ViewItem { code, display }
        })
        .collect();

    View {
        items,
        counts: count_codes(codes),
        available_stores: available_stores(codes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(id: &str, store: &str, status: Status, day: u32) -> DiscountCode {
        DiscountCode {
            id: id.to_string(),
            owner_id: "owner".to_string(),
            store_name: store.to_string(),
            expiry_date: NaiveDate::from_ymd_opt(2026, 7, day).unwrap(),
            code: Some("X".to_string()),
            conditions: None,
            min_amount: None,
            image_url: None,
            status,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_store_filter_case_insensitive_substring() {
        let codes = vec![
            code("dc-000001", "Zara Home", Status::Active, 10),
            code("dc-000002", "H&M", Status::Active, 10),
        ];
        let filter = Filter {
            store: "  zAR ".to_string(),
            ..Filter::default()
        };
        let filtered = filter_codes(&codes, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "dc-000001");
    }

    #[test]
    fn test_sort_ties_broken_by_id() {
        let codes = vec![
            code("dc-00000c", "A", Status::Active, 12),
            code("dc-00000b", "A", Status::Active, 10),
            code("dc-00000a", "A", Status::Active, 12),
        ];
        let ids: Vec<String> = filter_codes(&codes, &Filter::default())
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["dc-00000b", "dc-00000a", "dc-00000c"]);
    }

    #[test]
    fn test_available_stores_distinct_sorted() {
        let codes = vec![
            code("dc-000001", "Zara", Status::Used, 1),
            code("dc-000002", "Amazon", Status::Active, 2),
            code("dc-000003", "Zara", Status::Active, 3),
        ];
        assert_eq!(available_stores(&codes), vec!["Amazon", "Zara"]);
    }

    #[test]
    fn test_view_counts_ignore_filter() {
        let codes = vec![
            code("dc-000001", "Zara", Status::Used, 1),
            code("dc-000002", "Amazon", Status::Active, 2),
            code("dc-000003", "Zara", Status::Expired, 3),
        ];
        let filter = Filter {
            status: StatusFilter::Used,
            store: String::new(),
        };
        let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        let view = build_view(&codes, &filter, today, 3);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].display, DisplayStatus::Used);
        assert_eq!(
            view.counts,
            Counts {
                active: 1,
                used: 1,
                expired: 1,
                total: 3
            }
        );
    }

    #[test]
    fn test_view_item_serializes_flat() {
        let item = ViewItem {
            code: code("dc-000001", "Zara", Status::Active, 1),
            display: DisplayStatus::ExpiringSoon,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "dc-000001");
        assert_eq!(json["display"], "expiring_soon");
    }
}
