//! The query engine: a range scan over the metadata column family with an
//! optional owner/qualifier post-filter.

use tskv_common::{MetadataValue, OWNER_ID_LEN_LIMIT, QueryRequest, range_bounds};
use tskv_error::{Error, Result};
use tskv_storage::{ColumnFamily, Store};

use crate::wire::MetadataRow;

pub(crate) fn run_query<S: Store>(store: &S, request: &QueryRequest) -> Result<Vec<MetadataRow>> {
    let qualifier = request
        .qualifier
        .as_ref()
        .ok_or_else(|| Error::invalid_argument("qualifier must not be null"))?;
    if request.owner_id.len() > OWNER_ID_LEN_LIMIT {
        return Err(Error::invalid_argument(format!(
            "ownerId must be {OWNER_ID_LEN_LIMIT} bytes or fewer"
        )));
    }
    if request.start >= request.end {
        return Err(Error::invalid_argument(
            "query end must be greater than start",
        ));
    }

    let (lo, hi) = range_bounds(request.start, request.end);
    let rows: Vec<MetadataRow> = store
        .iter(ColumnFamily::Metadata, &lo, &hi)?
        .map(|(row_key, value)| -> Result<MetadataRow> {
            let meta: MetadataValue = serde_json::from_slice(&value)?;
            Ok(MetadataRow {
                row_key,
                owner_id: meta.owner_id,
                qualifier: meta.qualifier,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(scanned = rows.len(), "metadata range scan complete");

    let owner_filter = !request.owner_id.is_empty();
    let qualifier_filter = !qualifier.is_empty();

    let filtered = rows
        .into_iter()
        .filter(|row| {
            (!owner_filter || row.owner_id == request.owner_id)
                && (!qualifier_filter || &row.qualifier == qualifier)
        })
        .collect();

    Ok(filtered)
}
