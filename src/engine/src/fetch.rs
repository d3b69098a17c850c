//! The fetch engine: point lookups on the payload column family by an
//! input-ordered list of opaque ids.

use tskv_error::Result;
use tskv_storage::{ColumnFamily, Store};

use crate::wire::PayloadRow;

/// Looks up each id in `ids`, in order. A miss is emitted with empty
/// `data` rather than being skipped or erroring — see `DESIGN.md` for why
/// this implementation follows that reading of the reference behavior.
pub(crate) fn run_fetch<S: Store>(store: &S, ids: &[Vec<u8>]) -> Result<Vec<PayloadRow>> {
    let mut rows = Vec::with_capacity(ids.len());
    for id in ids {
        let data = store.get(ColumnFamily::Payload, id)?.unwrap_or_default();
        rows.push(PayloadRow {
            row_key: id.clone(),
            data,
        });
    }
    tracing::debug!(count = rows.len(), "fetch complete");
    Ok(rows)
}
