// Rust guideline compliant 2026-10-18

//! JSONL file store.
//!
//! One record per line, rewritten atomically (temp file + rename) on every
//! mutation. Read-modify-write cycles are serialized with an in-process
//! mutex and an exclusive file lock, so parallel write-backs and concurrent
//! CLI processes do not lose updates.

use crate::store::{CodeStore, FieldSet};
use crate::{DiscountCode, Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File-backed discount code store.
#[derive(Debug)]
pub struct JsonlStore {
    /// Path to the JSONL file.
    path: PathBuf,
    /// Serializes writers within this process.
    write_guard: Mutex<()>,
}

impl JsonlStore {
    /// Creates a new store over the given JSONL file.
    ///
    /// The file does not need to exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty.
    pub fn new(path: PathBuf) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path cannot be empty",
            )));
        }
        Ok(Self {
            path,
            write_guard: Mutex::new(()),
        })
    }

    /// Returns a reference to the JSONL file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every record in the file, one JSON object per line.
    ///
    /// Malformed lines are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be opened
    /// - A record fails validation
    pub fn load_all(&self) -> Result<Vec<DiscountCode>> {
        use std::fs::File;
        use std::io::{BufRead, BufReader};

        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut codes = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<DiscountCode>(&line) {
                Ok(code) => {
                    code.validate()?;
                    codes.push(code);
                }
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = index + 1,
                        error = %e,
                        "skipping malformed JSON line"
                    );
                }
            }
        }

        Ok(codes)
    }

    /// Loads a single record by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has the ID.
    pub fn load_by_id(&self, id: &str) -> Result<DiscountCode> {
        self.load_all()?
            .into_iter()
            .find(|code| code.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Replaces the file contents with the given records.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any record fails validation
    /// - The temp file cannot be written or renamed
    pub fn save_all(&self, codes: &[DiscountCode]) -> Result<()> {
        use std::fs::File;
        use std::io::Write;

        for code in codes {
            code.validate()?;
        }

        let temp_path = self.path.with_extension("jsonl.tmp");
        {
            let mut file = File::create(&temp_path)?;
            for code in codes {
                let json = serde_json::to_string(code)?;
                file.write_all(json.as_bytes())?;
                file.write_all(b"\n")?;
            }
            file.sync_all()?;
        }

        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Executes a closure while holding the store's write locks.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock file cannot be opened or locked, or if
    /// the closure fails.
    pub fn with_lock<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        use fs2::FileExt;
        use std::fs::OpenOptions;

        let _guard = self
            .write_guard
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let lock_path = self.path.with_extension("lock");
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)?;

        lock_file.lock_exclusive().map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::WouldBlock,
                format!("Failed to acquire lock: {}", e),
            ))
        })?;

        let result = f(self);

        if let Err(e) = lock_file.unlock() {
            tracing::warn!(path = %lock_path.display(), error = %e, "failed to release store lock");
        }

        result
    }
}

impl CodeStore for JsonlStore {
    fn fetch_all(&self, owner_id: &str) -> Result<Vec<DiscountCode>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|code| code.owner_id == owner_id)
            .collect())
    }

    fn insert(&self, record: DiscountCode) -> Result<DiscountCode> {
        record.validate()?;
        self.with_lock(|store| {
            let mut codes = store.load_all()?;
            if codes.iter().any(|code| code.id == record.id) {
                return Err(Error::DuplicateId(record.id.clone()));
            }
            codes.push(record.clone());
            store.save_all(&codes)?;
            Ok(record)
        })
    }

    fn update_fields(&self, id: &str, fields: &FieldSet) -> Result<DiscountCode> {
        self.with_lock(|store| {
            let mut codes = store.load_all()?;
            let slot = codes
                .iter_mut()
                .find(|code| code.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;

            let mut updated = slot.clone();
            fields.apply_to(&mut updated);
            updated.validate()?;
            *slot = updated.clone();

            store.save_all(&codes)?;
            Ok(updated)
        })
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.with_lock(|store| {
            let mut codes = store.load_all()?;
            let initial_len = codes.len();
            codes.retain(|code| code.id != id);

            if codes.len() == initial_len {
                return Err(Error::NotFound(id.to_string()));
            }

            store.save_all(&codes)
        })
    }
}
