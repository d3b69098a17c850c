//! A `BTreeMap`-backed [`Store`] implementation. Deterministic and
//! allocation-cheap, used by the test suite and by any embedding that has
//! no filesystem to hand RocksDB.

use std::collections::BTreeMap;
use std::sync::RwLock;

use tskv_error::Result;

use crate::column_family::ColumnFamily;
use crate::store::{Batch, KvIter, Store};

/// Keys are namespaced by column family ordinal so that a single ordered
/// map can serve all three CFs while keeping per-CF iteration a contiguous
/// range.
type MapKey = (u8, Vec<u8>);

fn map_key(cf: ColumnFamily, key: &[u8]) -> MapKey {
    (cf as u8, key.to_vec())
}

#[derive(Default)]
pub struct MemStore {
    rows: RwLock<BTreeMap<MapKey, Vec<u8>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct MemBatch {
    puts: Vec<(MapKey, Vec<u8>)>,
}

impl Batch for MemBatch {
    fn put(&mut self, cf: ColumnFamily, key: &[u8], value: &[u8]) {
        self.puts.push((map_key(cf, key), value.to_vec()));
    }

    fn len(&self) -> usize {
        self.puts.len()
    }
}

impl Store for MemStore {
    type Batch = MemBatch;

    fn new_batch(&self) -> Self::Batch {
        MemBatch { puts: Vec::new() }
    }

    fn write(&self, batch: Self::Batch) -> Result<usize> {
        let count = batch.puts.len();
        let mut rows = self.rows.write().expect("mem store lock poisoned");
        for (key, value) in batch.puts {
            rows.insert(key, value);
        }
        Ok(count)
    }

    fn get(&self, cf: ColumnFamily, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let rows = self.rows.read().expect("mem store lock poisoned");
        Ok(rows.get(&map_key(cf, key)).cloned())
    }

    fn iter(&self, cf: ColumnFamily, lo: &[u8], hi: &[u8]) -> Result<KvIter<'_>> {
        let rows = self.rows.read().expect("mem store lock poisoned");
        let cf_ord = cf as u8;
        let lo_key = (cf_ord, lo.to_vec());
        let hi_key = (cf_ord, hi.to_vec());
        // Snapshot the matching rows now: the iterator must reflect a
        // point-in-time view and must not hold the lock across its
        // lifetime, since writers may run concurrently with readers.
        let snapshot: Vec<(Vec<u8>, Vec<u8>)> = rows
            .range(lo_key..hi_key)
            .map(|((_, k), v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(snapshot.into_iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_get_round_trips() {
        let store = MemStore::new();
        let mut batch = store.new_batch();
        batch.put(ColumnFamily::Payload, b"k1", b"v1");
        assert_eq!(store.write(batch).unwrap(), 1);
        assert_eq!(
            store.get(ColumnFamily::Payload, b"k1").unwrap(),
            Some(b"v1".to_vec())
        );
        assert_eq!(store.get(ColumnFamily::Payload, b"missing").unwrap(), None);
    }

    #[test]
    fn iter_is_scoped_to_its_column_family_and_range() {
        let store = MemStore::new();
        let mut batch = store.new_batch();
        batch.put(ColumnFamily::Metadata, b"a", b"1");
        batch.put(ColumnFamily::Metadata, b"b", b"2");
        batch.put(ColumnFamily::Metadata, b"z", b"9");
        batch.put(ColumnFamily::Payload, b"a", b"should not appear");
        store.write(batch).unwrap();

        let got: Vec<_> = store
            .iter(ColumnFamily::Metadata, b"a", b"c")
            .unwrap()
            .collect();
        assert_eq!(
            got,
            vec![
                (b"a".to_vec(), b"1".to_vec()),
                (b"b".to_vec(), b"2".to_vec()),
            ]
        );
    }

    #[test]
    fn writes_are_not_observable_before_write_is_called() {
        let store = MemStore::new();
        let mut batch = store.new_batch();
        batch.put(ColumnFamily::Payload, b"k", b"v");
        // `batch` has not been written yet.
        assert_eq!(store.get(ColumnFamily::Payload, b"k").unwrap(), None);
        store.write(batch).unwrap();
        assert_eq!(
            store.get(ColumnFamily::Payload, b"k").unwrap(),
            Some(b"v".to_vec())
        );
    }
}
