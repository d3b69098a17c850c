//! The three column families the core addresses. Handles are a small enum
//! rather than opaque runtime handles: they are stable for the process
//! lifetime and known at compile time.

/// A column family the store exposes. `Default` is reserved by the
/// underlying store and unused by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum ColumnFamily {
    Default,
    Metadata,
    Payload,
}

impl ColumnFamily {
    /// The on-disk column family name, for backends (like RocksDB) that
    /// address column families by name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Metadata => "metadata",
            Self::Payload => "payload",
        }
    }
}

/// Every column family the store must pre-declare on open.
pub const ALL_COLUMN_FAMILIES: [ColumnFamily; 3] = [
    ColumnFamily::Default,
    ColumnFamily::Metadata,
    ColumnFamily::Payload,
];
