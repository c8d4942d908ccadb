// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn add` command.

use crate::output::Action;
use crate::session::Session;
use crate::OutputFormatter;
use anyhow::Result;
use coupons_app::{parse_amount, parse_date, AppError, ImageUpload};
use coupons_core::NewCode;
use std::path::Path;

/// Arguments of `cpn add`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct AddArgs {
    /// Store the code can be used at
    pub store: String,

    /// Last day the code is valid (YYYY-MM-DD)
    #[arg(long)]
    pub expires: String,

    /// The discount code itself
    #[arg(long)]
    pub code: Option<String>,

    /// Usage conditions
    #[arg(long)]
    pub conditions: Option<String>,

    /// Minimum purchase amount
    #[arg(long)]
    pub min_amount: Option<String>,

    /// Path to a receipt image
    #[arg(long)]
    pub image: Option<String>,
}

/// Records a new discount code.
///
/// # Errors
///
/// Returns an error if:
/// - The repository is not initialized
/// - The date or amount cannot be parsed
/// - The image file cannot be read
/// - Neither a code nor an image is given
/// - The code file cannot be written
pub fn execute(session: &Session, args: AddArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let expiry_date = parse_date(&args.expires)?;
    let min_amount = args.min_amount.as_deref().map(parse_amount).transpose()?;
    let image = args.image.as_deref().map(read_image).transpose()?;

    let tracker = session.open_tracker()?;
    let new = NewCode {
        owner_id: tracker.owner_id().to_string(),
        store_name: args.store,
        expiry_date: Some(expiry_date),
        code: args.code,
        conditions: args.conditions,
        min_amount,
        image_url: None,
    };

    let created = tracker.create_record(new, image)?;
    let item = session.item(&tracker, created);
    println!("{}", formatter.format_action(Action::Created, &item));
    Ok(())
}

/// Reads a receipt image from disk.
///
/// # Errors
///
/// Returns an invalid-input error if the file cannot be read.
pub fn read_image(path: &str) -> std::result::Result<ImageUpload, AppError> {
    let bytes = std::fs::read(path)
        .map_err(|err| AppError::InvalidInput(format!("Cannot read image '{}': {}", path, err)))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(ImageUpload { file_name, bytes })
}
