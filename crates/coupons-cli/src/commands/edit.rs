// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn edit` command.
//!
//! Edits never change a code's status; use `cpn use` and `cpn restore` for
//! that.

use crate::commands::add::read_image;
use crate::output::Action;
use crate::session::Session;
use crate::OutputFormatter;
use anyhow::Result;
use coupons_app::{parse_amount, parse_date, ImageChange};
use coupons_core::CodeEdit;

/// Arguments of `cpn edit`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EditArgs {
    /// Code ID (full or partial)
    pub id: String,

    /// New store name
    #[arg(long)]
    pub store: Option<String>,

    /// New expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub expires: Option<String>,

    /// New discount code
    #[arg(long, conflicts_with = "clear_code")]
    pub code: Option<String>,

    /// Remove the discount code
    #[arg(long)]
    pub clear_code: bool,

    /// New usage conditions
    #[arg(long, conflicts_with = "clear_conditions")]
    pub conditions: Option<String>,

    /// Remove the usage conditions
    #[arg(long)]
    pub clear_conditions: bool,

    /// New minimum purchase amount
    #[arg(long, conflicts_with = "clear_min_amount")]
    pub min_amount: Option<String>,

    /// Remove the minimum purchase amount
    #[arg(long)]
    pub clear_min_amount: bool,

    /// Replace the receipt image with this file
    #[arg(long, conflicts_with = "remove_image")]
    pub image: Option<String>,

    /// Remove the receipt image
    #[arg(long)]
    pub remove_image: bool,
}

/// Sets, clears, or leaves a nullable field.
fn set_or_clear<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

/// Edits a discount code.
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The ID is unknown or ambiguous
/// - No change is requested
/// - The edit would leave neither a code nor an image
/// - A date, amount, or image cannot be read
pub fn execute(session: &Session, args: EditArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let expiry_date = args.expires.as_deref().map(parse_date).transpose()?;
    let min_amount = args.min_amount.as_deref().map(parse_amount).transpose()?;

    let edit = CodeEdit {
        store_name: args.store,
        expiry_date,
        code: set_or_clear(args.code, args.clear_code),
        conditions: set_or_clear(args.conditions, args.clear_conditions),
        min_amount: set_or_clear(min_amount, args.clear_min_amount),
    };

    let image = match (args.image.as_deref(), args.remove_image) {
        (Some(path), _) => ImageChange::Replace(read_image(path)?),
        (None, true) => ImageChange::Remove,
        (None, false) => ImageChange::Keep,
    };

    let tracker = session.open_tracker()?;
    let updated = tracker.edit_record(&args.id, edit, image)?;
    let item = session.item(&tracker, updated);
    println!("{}", formatter.format_action(Action::Updated, &item));
    Ok(())
}
