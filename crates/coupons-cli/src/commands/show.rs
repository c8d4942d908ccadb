// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn show` command.
//!
//! Displays one discount code with its display status and the lifecycle
//! events it currently accepts.

use crate::session::Session;
use crate::OutputFormatter;
use anyhow::Result;

/// Shows details of a discount code by full or partial ID.
///
/// The owner's records are reconciled first, so a code whose expiry date
/// has passed is shown (and stored) as expired.
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The ID is unknown or ambiguous
/// - The code file cannot be read
pub fn execute(session: &Session, id: String, formatter: &dyn OutputFormatter) -> Result<()> {
    let tracker = session.open_tracker()?;
    let today = session.today();
    tracker.reconciled_codes(today)?;

    let code = tracker.get(&id)?;
    let events = code.status.valid_events(code.expiry_date, today);
    let item = session.item(&tracker, code);
    println!("{}", formatter.format_code(&item, &events));
    Ok(())
}
