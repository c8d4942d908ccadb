// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn delete` command.

use crate::output::Action;
use crate::session::Session;
use crate::OutputFormatter;
use anyhow::Result;

/// Deletes a discount code and its receipt image.
///
/// # Errors
///
/// Returns an error if the repository is not initialized, the ID is
/// unknown or ambiguous, or the code file cannot be written.
pub fn execute(session: &Session, id: String, formatter: &dyn OutputFormatter) -> Result<()> {
    let tracker = session.open_tracker()?;
    let deleted = tracker.delete_record(&id)?;
    let item = session.item(&tracker, deleted);
    println!("{}", formatter.format_action(Action::Deleted, &item));
    Ok(())
}
