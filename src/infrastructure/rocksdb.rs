use crate::domain::ports::{KeyValueStore, SetMode};
use crate::error::{PagadorError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Direction, IteratorMode, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Column Family holding the key-value entries.
pub const CF_ENTRIES: &str = "entries";

/// A persistent key-value store implementation using RocksDB.
///
/// RocksDB has no native put-if-absent, so every conditional write holds
/// `write_lock` across its existence check and put. Instances must share the
/// lock (`Clone`) when they share a database.
#[derive(Clone)]
pub struct RocksDBKeyValueStore {
    db: Arc<DB>,
    write_lock: Arc<Mutex<()>>,
}

impl RocksDBKeyValueStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "entries" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_entries = ColumnFamilyDescriptor::new(CF_ENTRIES, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_entries])?;

        Ok(Self {
            db: Arc::new(db),
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn entries(&self) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(CF_ENTRIES)
            .ok_or_else(|| PagadorError::Storage("Entries column family not found".to_string()))
    }
}

#[async_trait]
impl KeyValueStore for RocksDBKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.entries()?;
        Ok(self.db.get_cf(cf, key.as_bytes())?)
    }

    async fn set(&self, key: &str, value: Vec<u8>, mode: SetMode) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let cf = self.entries()?;

        let exists = self.db.get_pinned_cf(cf, key.as_bytes())?.is_some();
        match (mode, exists) {
            (SetMode::CreateOnly, false) | (SetMode::UpdateOnly, true) => {
                self.db.put_cf(cf, key.as_bytes(), value)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn keys(&self, prefix: &str) -> Result<Vec<String>> {
        let cf = self.entries()?;
        let iter = self.db.iterator_cf(
            cf,
            IteratorMode::From(prefix.as_bytes(), Direction::Forward),
        );

        let mut keys = Vec::new();
        for item in iter {
            let (key, _value) = item?;
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            let key = String::from_utf8(key.into_vec())
                .map_err(|e| PagadorError::Storage(format!("Non UTF-8 key: {}", e)))?;
            keys.push(key);
        }

        Ok(keys)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let cf = self.entries()?;

        let existed = self.db.get_pinned_cf(cf, key.as_bytes())?.is_some();
        if existed {
            self.db.delete_cf(cf, key.as_bytes())?;
        }
        Ok(existed)
    }
}
