// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn restore` command.

use crate::output::Action;
use crate::session::Session;
use crate::OutputFormatter;
use anyhow::Result;

/// Restores a used discount code to active.
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The ID is unknown or ambiguous
/// - The code is not used, or its expiry date has passed
pub fn execute(session: &Session, id: String, formatter: &dyn OutputFormatter) -> Result<()> {
    let tracker = session.open_tracker()?;
    let restored = tracker.restore(&id, session.today())?;
    let item = session.item(&tracker, restored);
    println!("{}", formatter.format_action(Action::Restored, &item));
    Ok(())
}
