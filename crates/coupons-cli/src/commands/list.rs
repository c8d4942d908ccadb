// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn list` command.
//!
//! Reconciles the owner's codes, then prints the filtered list together
//! with counts and the stores available as quick filters.

use crate::session::Session;
use crate::terminal::print_warning;
use crate::OutputFormatter;
use anyhow::Result;
use coupons_app::build_filter;
use coupons_core::DisplayStatus;

/// Lists discount codes.
///
/// # Arguments
///
/// * `session` - Global settings (owner, date)
/// * `status` - Optional status filter (`all`, `active`, `used`, `expired`)
/// * `store` - Optional case-insensitive store name fragment
/// * `warn_expiring` - Whether to print a reminder for codes expiring soon
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The status filter is invalid
/// - The code file cannot be read
pub fn execute(
    session: &Session,
    status: Option<String>,
    store: Option<String>,
    warn_expiring: bool,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let filter = build_filter(status.as_deref(), store.as_deref())?;
    let tracker = session.open_tracker()?;
    let view = tracker.view(&filter, session.today())?;

    println!("{}", formatter.format_view(&view));

    let expiring = view
        .items
        .iter()
        .filter(|item| item.display == DisplayStatus::ExpiringSoon)
        .count();
    if warn_expiring && expiring > 0 {
        print_warning(&format!(
            "{} code(s) expire within {} day(s)",
            expiring,
            tracker.config().expiring_soon_days
        ));
    }

    Ok(())
}
