// Rust guideline compliant 2026-10-18

//! Implementation of the `cpn init` command.
//!
//! Creates the `.coupons` directory with an empty code file, a default
//! configuration and the receipts directory.

use anyhow::Result;
use coupons_app::RepoContext;
use std::path::Path;

/// Initializes a Coupons repository in the current directory.
///
/// Running it in an existing repository leaves its data untouched.
///
/// # Errors
///
/// Returns an error if the directory layout cannot be created.
pub fn execute() -> Result<()> {
    let repo = RepoContext::init(Path::new("."))?;
    println!("✓ Initialized Coupons repository in {}", repo.coupons_dir().display());
    Ok(())
}
