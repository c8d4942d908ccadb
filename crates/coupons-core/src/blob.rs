// Rust guideline compliant 2026-10-18

//! Receipt image storage.
//!
//! The engine never inspects image content; it only stores the reference
//! string returned by [`BlobStore::upload`] in a record's `image_url`.

use crate::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Storage for receipt images, keyed by owner and file name.
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under the owner's namespace and returns the reference.
    fn upload(&self, owner_id: &str, file_name: &str, bytes: &[u8]) -> Result<String>;

    /// Removes the blob behind a reference previously returned by `upload`.
    fn remove(&self, owner_id: &str, reference: &str) -> Result<()>;
}

/// Builds the stored file name for an uploaded receipt.
///
/// The extension is taken from the original file name and lower-cased;
/// `bin` is used when there is none.
pub fn receipt_file_name(original_name: &str, timestamp_millis: i64) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or_else(|| "bin".to_string());
    format!("{}.{}", timestamp_millis, extension)
}

/// Returns the file name component of a blob reference.
pub fn reference_file_name(reference: &str) -> Option<&str> {
    reference
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
}

/// Receipt store backed by a directory on the local filesystem.
///
/// Blobs live at `<root>/<owner>/<file>` and references have the form
/// `<owner>/<file>`.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates a store rooted at `root`. The directory is created lazily.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a reference to its path on disk.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the reference is malformed.
    pub fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let (owner_id, file_name) = reference
            .split_once('/')
            .ok_or_else(|| Error::Validation(format!("Invalid image reference: {}", reference)))?;
        check_segment(owner_id)?;
        check_segment(file_name)?;
        Ok(self.root.join(owner_id).join(file_name))
    }
}

fn check_segment(segment: &str) -> Result<()> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\'])
    {
        return Err(Error::Validation(format!(
            "Invalid path segment in image reference: {:?}",
            segment
        )));
    }
    Ok(())
}

impl BlobStore for FsBlobStore {
    fn upload(&self, owner_id: &str, file_name: &str, bytes: &[u8]) -> Result<String> {
        check_segment(owner_id)?;
        check_segment(file_name)?;

        let dir = self.root.join(owner_id);
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(file_name);
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(Error::DuplicateId(format!("{}/{}", owner_id, file_name)));
            }
            Err(e) => return Err(Error::Io(e)),
        };
        file.write_all(bytes)?;
        file.sync_all()?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "stored receipt image");
        Ok(format!("{}/{}", owner_id, file_name))
    }

    fn remove(&self, owner_id: &str, reference: &str) -> Result<()> {
        let file_name = reference_file_name(reference)
            .ok_or_else(|| Error::Validation(format!("Invalid image reference: {}", reference)))?;
        check_segment(owner_id)?;
        check_segment(file_name)?;

        let path = self.root.join(owner_id).join(file_name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(reference.to_string()))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}
