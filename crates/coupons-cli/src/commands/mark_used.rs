// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn use` command.

use crate::output::Action;
use crate::session::Session;
use crate::OutputFormatter;
use anyhow::Result;

/// Marks a discount code as used.
///
/// # Arguments
///
/// * `session` - Global settings (owner, date)
/// * `id` - Full or partial code ID
/// * `formatter` - The output formatter to use
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The ID is unknown or ambiguous
/// - The code is not active
pub fn execute(session: &Session, id: String, formatter: &dyn OutputFormatter) -> Result<()> {
    let tracker = session.open_tracker()?;
    let updated = tracker.mark_used(&id, session.today())?;
    let item = session.item(&tracker, updated);
    println!("{}", formatter.format_action(Action::MarkedUsed, &item));
    Ok(())
}
