//! Local snapshot store over the key/value table.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

use finance_tracker_core::store::LocalSnapshotStoreTrait;
use finance_tracker_core::sync::{LocalCategory, LocalTransaction};

use crate::errors::{Result, StorageError};
use crate::key_value::KeyValueStore;

use super::model::{
    LocalCategoryDB, LocalTransactionDB, CATEGORIES_KEY, MIGRATION_COMPLETED_KEY,
    TRANSACTIONS_KEY,
};

const MIGRATION_COMPLETED_VALUE: &str = "true";

pub struct LocalSnapshotStore {
    store: KeyValueStore,
}

impl LocalSnapshotStore {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(KeyValueStore::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(KeyValueStore::open_in_memory()?))
    }

    /// Reads the array stored under `key`. A missing key is an empty array.
    fn read_array<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get_item(key)? {
            None => Ok(Vec::new()),
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StorageError::invalid_json(key, e))
            }
        }
    }

    fn write_array<T: serde::Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let encoded = serde_json::to_string(records)?;
        self.store.set_item(key, &encoded)
    }

    /// Replaces the stored transaction collection.
    pub fn save_transactions(&self, transactions: &[LocalTransaction]) -> Result<()> {
        let records: Vec<LocalTransactionDB> =
            transactions.iter().map(LocalTransactionDB::from).collect();
        debug!("Saving {} local transactions", records.len());
        self.write_array(TRANSACTIONS_KEY, &records)
    }

    /// Replaces the stored category collection.
    pub fn save_categories(&self, categories: &[LocalCategory]) -> Result<()> {
        let records: Vec<LocalCategoryDB> = categories.iter().map(LocalCategoryDB::from).collect();
        debug!("Saving {} local categories", records.len());
        self.write_array(CATEGORIES_KEY, &records)
    }
}

impl LocalSnapshotStoreTrait for LocalSnapshotStore {
    fn read_local_transactions(&self) -> finance_tracker_core::Result<Vec<LocalTransaction>> {
        let records: Vec<LocalTransactionDB> = self.read_array(TRANSACTIONS_KEY)?;
        Ok(records.into_iter().map(LocalTransaction::from).collect())
    }

    fn read_local_categories(&self) -> finance_tracker_core::Result<Vec<LocalCategory>> {
        let records: Vec<LocalCategoryDB> = self.read_array(CATEGORIES_KEY)?;
        Ok(records.into_iter().map(LocalCategory::from).collect())
    }

    fn read_raw_transactions(&self) -> finance_tracker_core::Result<Vec<serde_json::Value>> {
        Ok(self.read_array(TRANSACTIONS_KEY)?)
    }

    fn read_raw_categories(&self) -> finance_tracker_core::Result<Vec<serde_json::Value>> {
        Ok(self.read_array(CATEGORIES_KEY)?)
    }

    fn clear_local_snapshot(&self) -> finance_tracker_core::Result<()> {
        self.store.remove_items(&[TRANSACTIONS_KEY, CATEGORIES_KEY])?;
        Ok(())
    }

    fn is_migration_completed(&self) -> finance_tracker_core::Result<bool> {
        let value = self.store.get_item(MIGRATION_COMPLETED_KEY)?;
        if let Some(other) = value.as_deref().filter(|v| *v != MIGRATION_COMPLETED_VALUE) {
            warn!("Ignoring unexpected migration marker value '{}'", other);
        }
        Ok(value.as_deref() == Some(MIGRATION_COMPLETED_VALUE))
    }

    fn set_migration_completed(&self, completed: bool) -> finance_tracker_core::Result<()> {
        if completed {
            self.store
                .set_item(MIGRATION_COMPLETED_KEY, MIGRATION_COMPLETED_VALUE)?;
        } else {
            self.store.remove_item(MIGRATION_COMPLETED_KEY)?;
        }
        Ok(())
    }
}
