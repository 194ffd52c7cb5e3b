//! redb-backed slot.
//!
//! One table, `scan_state`, mapping the slot key to the raw record string.
//! Each operation runs in its own transaction.

use super::StateSlot;
use crate::ScanError;
use crate::formats::STORAGE_KEY;
use redb::{Database, ReadableDatabase, TableDefinition, TableError};
use std::path::Path;

const STATE_TABLE: TableDefinition<&str, &str> = TableDefinition::new("scan_state");

/// Slot stored in an embedded redb database file.
pub struct RedbSlot {
    db: Database,
    key: String,
}

impl RedbSlot {
    /// Open the database at `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScanError> {
        let db = Database::create(path).map_err(ScanError::storage)?;
        Ok(Self {
            db,
            key: STORAGE_KEY.to_string(),
        })
    }

    /// Use a different key inside the same database.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for RedbSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbSlot").field("key", &self.key).finish()
    }
}

impl StateSlot for RedbSlot {
    fn get(&self) -> Result<Option<String>, ScanError> {
        let txn = self.db.begin_read().map_err(ScanError::storage)?;
        let table = match txn.open_table(STATE_TABLE) {
            Ok(table) => table,
            // Nothing has ever been written.
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(ScanError::storage(e)),
        };
        let value = table
            .get(self.key.as_str())
            .map_err(ScanError::storage)?
            .map(|guard| guard.value().to_string());
        Ok(value)
    }

    fn set(&mut self, raw: &str) -> Result<(), ScanError> {
        let txn = self.db.begin_write().map_err(ScanError::storage)?;
        {
            let mut table = txn.open_table(STATE_TABLE).map_err(ScanError::storage)?;
            table
                .insert(self.key.as_str(), raw)
                .map_err(ScanError::storage)?;
        }
        txn.commit().map_err(ScanError::storage)
    }

    fn remove(&mut self) -> Result<(), ScanError> {
        let txn = self.db.begin_write().map_err(ScanError::storage)?;
        {
            let mut table = txn.open_table(STATE_TABLE).map_err(ScanError::storage)?;
            table
                .remove(self.key.as_str())
                .map_err(ScanError::storage)?;
        }
        txn.commit().map_err(ScanError::storage)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_database_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let slot = RedbSlot::open(dir.path().join("scan.redb")).unwrap();
        assert_eq!(slot.get().unwrap(), None);
    }

    #[test]
    fn set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut slot = RedbSlot::open(dir.path().join("scan.redb")).unwrap();

        slot.set("{\"step\":1}").unwrap();
        assert_eq!(slot.get().unwrap().as_deref(), Some("{\"step\":1}"));

        slot.set("{\"step\":2}").unwrap();
        assert_eq!(slot.get().unwrap().as_deref(), Some("{\"step\":2}"));

        slot.remove().unwrap();
        assert_eq!(slot.get().unwrap(), None);

        // Removing twice is fine.
        slot.remove().unwrap();
    }

    #[test]
    fn value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.redb");
        {
            let mut slot = RedbSlot::open(&path).unwrap();
            slot.set("persisted").unwrap();
        }
        let slot = RedbSlot::open(&path).unwrap();
        assert_eq!(slot.get().unwrap().as_deref(), Some("persisted"));
    }

    #[test]
    fn keys_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.redb");
        let mut first = RedbSlot::open(&path).unwrap();
        first.set("a").unwrap();
        drop(first);

        let second = RedbSlot::open(&path).unwrap().with_key("other");
        assert_eq!(second.key(), "other");
        assert_eq!(second.get().unwrap(), None);
    }
}
