// Rust guideline compliant 2026-10-18

//! Per-invocation settings shared by CLI commands.

use anyhow::Result;
use chrono::NaiveDate;
use coupons_app::{AppError, RepoContext, Tracker};
use coupons_core::{
    classify_within, Config, DiscountCode, FsBlobStore, JsonlStore, OutputFormat, ViewItem,
};
use std::path::PathBuf;

/// Tracker backed by the repository's JSONL file and receipts directory.
pub type FileTracker = Tracker<JsonlStore, FsBlobStore>;

/// Settings taken from global command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Owner given with `--owner`.
    pub owner: Option<String>,
    /// Date given with `--today`.
    pub today: Option<NaiveDate>,
    /// Repository root; the current directory when unset.
    pub root: Option<PathBuf>,
}

impl Session {
    /// Creates a session for the current directory.
    pub fn new(owner: Option<String>, today: Option<NaiveDate>) -> Self {
        Self {
            owner,
            today,
            root: None,
        }
    }

    /// Returns the pinned date, or the local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(coupons_app::today)
    }

    /// Discovers the repository and opens a tracker for the session owner.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository is not initialized
    /// - The configuration is invalid
    /// - No owner can be determined
    pub fn open_tracker(&self) -> Result<FileTracker> {
        let repo = RepoContext::discover(self.root.as_deref())?;
        let config = repo.load_config()?;
        let owner = resolve_owner(self.owner.as_deref(), &config)?;
        tracing::debug!(owner = %owner, repo = %repo.root().display(), "opening tracker");
        Ok(Tracker::new(
            repo.open_store()?,
            repo.open_blob_store(),
            &owner,
            config,
        )?)
    }

    /// Returns the output format configured for the repository, if any.
    ///
    /// Missing repositories and invalid configuration are ignored here; the
    /// command itself reports them.
    pub fn configured_format(&self) -> Option<OutputFormat> {
        RepoContext::discover(self.root.as_deref())
            .and_then(|repo| repo.load_config())
            .ok()
            .map(|config| config.output_format)
    }

    /// Pairs a record with its display classification for today.
    pub fn item(&self, tracker: &FileTracker, code: DiscountCode) -> ViewItem {
        let display = classify_within(&code, self.today(), tracker.config().expiring_soon_days);
        ViewItem { code, display }
    }
}

/// Picks the owner: explicit flag, then config (including `COUPONS_OWNER`),
/// then `$USER`, then `$USERNAME`.
///
/// # Errors
///
/// Returns an error if none of them is set.
pub fn resolve_owner(explicit: Option<&str>, config: &Config) -> std::result::Result<String, AppError> {
    let from_env = |name: &str| std::env::var(name).ok();
    explicit
        .map(str::to_string)
        .or_else(|| config.owner.clone())
        .or_else(|| from_env("USER"))
        .or_else(|| from_env("USERNAME"))
        .map(|owner| owner.trim().to_string())
        .filter(|owner| !owner.is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput(
                "Cannot determine owner; pass --owner or set COUPONS_OWNER".to_string(),
            )
        })
}
