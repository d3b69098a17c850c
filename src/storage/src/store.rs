//! The store trait itself: an accumulator of batched puts, applied
//! atomically, plus point lookups and a bounded forward iterator.

use tskv_error::Result;

use crate::column_family::ColumnFamily;

/// A boxed forward iterator over `(key, value)` pairs in ascending key
/// order. Dropping it releases whatever scoped resource the backend holds
/// (a RocksDB raw iterator, a snapshot of an in-memory map, ...).
pub type KvIter<'a> = Box<dyn Iterator<Item = (Vec<u8>, Vec<u8>)> + 'a>;

/// An accumulator of per-column-family put operations. No I/O happens until
/// the batch is handed to [`Store::write`].
pub trait Batch: Send {
    fn put(&mut self, cf: ColumnFamily, key: &[u8], value: &[u8]);

    /// Number of puts accumulated so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The ordered key-value store contract the core is built against.
pub trait Store: Send + Sync {
    type Batch: Batch;

    /// Creates a new, empty batch.
    fn new_batch(&self) -> Self::Batch;

    /// Atomically applies every put in `batch`, returning how many were
    /// applied. The batch is consumed and must not be reused.
    fn write(&self, batch: Self::Batch) -> Result<usize>;

    /// A point lookup. Returns `Ok(None)` on a miss rather than an error.
    fn get(&self, cf: ColumnFamily, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// A forward iterator positioned at or after `lo`, valid while the
    /// current key is strictly less than `hi`.
    fn iter(&self, cf: ColumnFamily, lo: &[u8], hi: &[u8]) -> Result<KvIter<'_>>;
}
