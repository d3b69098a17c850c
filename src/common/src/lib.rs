//! Row-key codec and the in-memory record shapes used by the rest of the
//! tskv core.

mod record;
mod rowkey;

pub use record::{
    FetchRequest, FetchResultItem, InputRecord, MetadataValue, QueryRequest, QueryResultItem,
};
pub use rowkey::{
    OWNER_ID_LEN_LIMIT, ROW_KEY_LEN, RowKey, SALT_LEN, TIMESTAMP_LEN, decode_timestamp, encode,
    range_bounds,
};
