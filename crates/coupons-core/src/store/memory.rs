// Rust guideline compliant 2026-10-18

//! In-process discount code store.

use crate::store::{CodeStore, FieldSet};
use crate::{DiscountCode, Error, Result};
use std::collections::HashMap;
use std::sync::RwLock;

/// Discount code store held in memory.
///
/// Useful when embedding the engine behind another persistence layer and
/// in tests. Records are returned in unspecified order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, DiscountCode>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with records.
    pub fn with_records(records: impl IntoIterator<Item = DiscountCode>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();
        Self {
            records: RwLock::new(map),
        }
    }

    /// Returns the number of stored records across all owners.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, DiscountCode>> {
        self.records
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, DiscountCode>> {
        self.records
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CodeStore for MemoryStore {
    fn fetch_all(&self, owner_id: &str) -> Result<Vec<DiscountCode>> {
        Ok(self
            .read()
            .values()
            .filter(|code| code.owner_id == owner_id)
            .cloned()
            .collect())
    }

    fn insert(&self, record: DiscountCode) -> Result<DiscountCode> {
        record.validate()?;
        let mut records = self.write();
        if records.contains_key(&record.id) {
            return Err(Error::DuplicateId(record.id));
        }
        records.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update_fields(&self, id: &str, fields: &FieldSet) -> Result<DiscountCode> {
        let mut records = self.write();
        let slot = records
            .get_mut(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        let mut updated = slot.clone();
        fields.apply_to(&mut updated);
        updated.validate()?;
        *slot = updated.clone();
        Ok(updated)
    }

    fn delete(&self, id: &str) -> Result<()> {
        self.write()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}
