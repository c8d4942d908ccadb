// Rust guideline compliant 2026-10-18

//! Repository discovery and path management utilities.

use crate::error::{AppError, Result};
use coupons_core::{Config, FsBlobStore, JsonlStore};
use std::path::{Path, PathBuf};

/// Name of the data directory inside a repository root.
pub const COUPONS_DIR: &str = ".coupons";

/// Repository path metadata for a Coupons workspace.
#[derive(Debug, Clone)]
pub struct RepoContext {
    root: PathBuf,
    coupons_dir: PathBuf,
    codes_path: PathBuf,
    receipts_dir: PathBuf,
    config_path: PathBuf,
}

impl RepoContext {
    fn at(root: PathBuf) -> Self {
        let coupons_dir = root.join(COUPONS_DIR);
        Self {
            root,
            codes_path: coupons_dir.join("codes.jsonl"),
            receipts_dir: coupons_dir.join("receipts"),
            config_path: coupons_dir.join("config.toml"),
            coupons_dir,
        }
    }

    /// Discovers a Coupons repository starting from an optional root.
    ///
    /// # Arguments
    ///
    /// * `repo_root` - Optional repository root to pin discovery
    ///
    /// # Returns
    ///
    /// A `RepoContext` with resolved paths for the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The repository root cannot be resolved
    /// - The `.coupons` directory is missing
    pub fn discover(repo_root: Option<&Path>) -> Result<Self> {
        let root = match repo_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let context = Self::at(root);
        if !context.coupons_dir.exists() {
            return Err(AppError::RepoNotInitialized {
                path: context.coupons_dir,
            });
        }
        Ok(context)
    }

    /// Creates the repository layout under `root`.
    ///
    /// Existing files are left untouched, so running it twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or file cannot be created.
    pub fn init(root: &Path) -> Result<Self> {
        let context = Self::at(root.to_path_buf());
        std::fs::create_dir_all(&context.receipts_dir)?;

        if !context.codes_path.exists() {
            std::fs::write(&context.codes_path, "")?;
        }
        if !context.config_path.exists() {
            Config::default().save(&context.coupons_dir)?;
        }

        tracing::info!(path = %context.coupons_dir.display(), "initialized coupons repository");
        Ok(context)
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Returns the `.coupons` directory path.
    #[must_use]
    pub fn coupons_dir(&self) -> &Path {
        self.coupons_dir.as_path()
    }

    /// Returns the codes JSONL path.
    #[must_use]
    pub fn codes_path(&self) -> &Path {
        self.codes_path.as_path()
    }

    /// Returns the receipts directory path.
    #[must_use]
    pub fn receipts_dir(&self) -> &Path {
        self.receipts_dir.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        self.config_path.as_path()
    }

    /// Opens the discount code store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn open_store(&self) -> Result<JsonlStore> {
        Ok(JsonlStore::new(self.codes_path.clone())?)
    }

    /// Opens the receipt image store.
    #[must_use]
    pub fn open_blob_store(&self) -> FsBlobStore {
        FsBlobStore::new(self.receipts_dir.clone())
    }

    /// Loads repository configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.coupons_dir())?)
    }
}
