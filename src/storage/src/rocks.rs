//! The production [`Store`] backend: a thin wrapper over the `rocksdb`
//! crate with the three column families declared up front. Per-CF handles
//! are resolved by name on each use; the `DB` itself is held behind an
//! `Arc` so batches can carry their own handle rather than a borrowed one.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{Direction, IteratorMode, Options, DB};
use tskv_error::{Error, Result};

use crate::column_family::{ColumnFamily, ALL_COLUMN_FAMILIES};
use crate::store::{Batch, KvIter, Store};

pub struct RocksStore {
    db: Arc<DB>,
}

impl RocksStore {
    /// Opens (creating if missing) a RocksDB database at `path` with the
    /// core's three column families.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);

        let cf_names: Vec<&str> = ALL_COLUMN_FAMILIES.iter().map(|cf| cf.name()).collect();
        let path = path.as_ref();
        let db = DB::open_cf(&db_opts, path, cf_names)
            .map_err(|err| Error::storage(format!("failed to open store: {err}")))?;
        tracing::info!(path = %path.display(), "opened rocksdb store");
        Ok(Self { db: Arc::new(db) })
    }

    fn handle(&self, cf: ColumnFamily) -> Result<&rocksdb::ColumnFamily> {
        self.db
            .cf_handle(cf.name())
            .ok_or_else(|| Error::storage(format!("missing column family {}", cf.name())))
    }
}

pub struct RocksBatch {
    db: Arc<DB>,
    inner: rocksdb::WriteBatch,
    len: usize,
}

impl Batch for RocksBatch {
    fn put(&mut self, cf: ColumnFamily, key: &[u8], value: &[u8]) {
        let handle = self
            .db
            .cf_handle(cf.name())
            .unwrap_or_else(|| panic!("no column family named {}", cf.name()));
        self.inner.put_cf(handle, key, value);
        self.len += 1;
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl Store for RocksStore {
    type Batch = RocksBatch;

    fn new_batch(&self) -> Self::Batch {
        RocksBatch {
            db: Arc::clone(&self.db),
            inner: rocksdb::WriteBatch::default(),
            len: 0,
        }
    }

    fn write(&self, batch: Self::Batch) -> Result<usize> {
        let count = batch.len;
        self.db
            .write(batch.inner)
            .map_err(|err| Error::storage(format!("batch write failed: {err}")))?;
        Ok(count)
    }

    fn get(&self, cf: ColumnFamily, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let handle = self.handle(cf)?;
        self.db
            .get_cf(handle, key)
            .map_err(|err| Error::storage(format!("get failed: {err}")))
    }

    fn iter(&self, cf: ColumnFamily, lo: &[u8], hi: &[u8]) -> Result<KvIter<'_>> {
        let handle = self.handle(cf)?;
        let mode = IteratorMode::From(lo, Direction::Forward);
        let hi = hi.to_vec();
        let bounded = self
            .db
            .iterator_cf(handle, mode)
            .take_while(move |item| match item {
                Ok((key, _)) => key.as_ref() < hi.as_slice(),
                Err(_) => false,
            })
            .map(|item| {
                let (key, value) = item.expect("checked by take_while");
                (key.to_vec(), value.to_vec())
            });
        Ok(Box::new(bounded))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn open_write_get_and_scan_round_trip() {
        let dir = tempdir().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();

        let mut batch = store.new_batch();
        batch.put(ColumnFamily::Metadata, b"a", b"1");
        batch.put(ColumnFamily::Metadata, b"b", b"2");
        assert_eq!(store.write(batch).unwrap(), 2);

        assert_eq!(
            store.get(ColumnFamily::Metadata, b"a").unwrap(),
            Some(b"1".to_vec())
        );
        assert_eq!(store.get(ColumnFamily::Metadata, b"z").unwrap(), None);

        let scanned: Vec<_> = store
            .iter(ColumnFamily::Metadata, b"a", b"c")
            .unwrap()
            .collect();
        assert_eq!(
            scanned,
            vec![
                (b"a".to_vec(), b"1".to_vec()),
                (b"b".to_vec(), b"2".to_vec()),
            ]
        );
    }
}
