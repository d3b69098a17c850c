//! The store adapter: the contract the state-machine core consumes from an
//! embedded ordered key-value store, plus two implementations — an
//! in-memory backend for tests and embedding without a filesystem, and a
//! RocksDB-backed backend for production.

mod column_family;
mod mem;
#[cfg(feature = "rocks")]
mod rocks;
mod store;

pub use column_family::{ALL_COLUMN_FAMILIES, ColumnFamily};
pub use mem::MemStore;
#[cfg(feature = "rocks")]
pub use rocks::RocksStore;
pub use store::{Batch, KvIter, Store};
