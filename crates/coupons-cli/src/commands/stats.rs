// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn stats` command.

use crate::session::Session;
use crate::OutputFormatter;
use anyhow::Result;
use coupons_core::Filter;

/// Prints counts per stored status and the list of known stores.
///
/// # Errors
///
/// Returns an error if the repository is not initialized or the code file
/// cannot be read.
pub fn execute(session: &Session, formatter: &dyn OutputFormatter) -> Result<()> {
    let tracker = session.open_tracker()?;
    let view = tracker.view(&Filter::default(), session.today())?;
    println!("{}", formatter.format_stats(&view));
    Ok(())
}
