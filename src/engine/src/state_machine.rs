//! The block-lifecycle state machine: accumulates mutations between
//! `InitChain`/`Commit` boundaries and commits them atomically, routing
//! `Query` calls to the query/fetch engines.

use tskv_common::{FetchRequest, MetadataValue, QueryRequest};
use tskv_storage::{Batch, ColumnFamily, Store};

use crate::fetch::run_fetch;
use crate::query::run_query;
use crate::wire::{CommitResponse, InfoResponse, QueryResponse, TxEntry, TxResponse};

/// The consensus callback surface this crate implements. One instance is
/// constructed per opened store and lives for the process lifetime; the
/// driver calls its methods serially on the write path (see the
/// concurrency model this crate was built against).
pub struct StateMachine<S: Store> {
    store: S,
    metadata_batch: S::Batch,
    payload_batch: S::Batch,
}

impl<S: Store> StateMachine<S> {
    /// Opens the state machine against an already-constructed store.
    /// Mirrors `InitChain`'s batch-reset side effect: the two pending
    /// batches start out empty.
    pub fn new(store: S) -> Self {
        let metadata_batch = store.new_batch();
        let payload_batch = store.new_batch();
        Self {
            store,
            metadata_batch,
            payload_batch,
        }
    }

    pub fn info(&self) -> InfoResponse {
        InfoResponse {
            data: String::new(),
        }
    }

    /// Resets the pending batches, as required on every `InitChain` call.
    pub fn init_chain(&mut self) {
        self.metadata_batch = self.store.new_batch();
        self.payload_batch = self.store.new_batch();
    }

    pub fn begin_block(&mut self) {}

    pub fn end_block(&mut self) {}

    /// Decode-only sanity check; never touches the batches or the store.
    pub fn check_tx(&self, tx: &[u8]) -> TxResponse {
        match decode_tx(tx) {
            Ok(_) => TxResponse::ok(),
            Err(err) => {
                tracing::warn!(error = %err, "check_tx decode failed");
                TxResponse::encoding_error(err.to_string())
            }
        }
    }

    /// Decodes the transaction and, for each pair, appends one put to each
    /// pending batch. No store I/O happens here; durability waits for
    /// `commit`.
    pub fn deliver_tx(&mut self, tx: &[u8]) -> TxResponse {
        let entries = match decode_tx(tx) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "deliver_tx decode failed");
                return TxResponse::encoding_error(err.to_string());
            }
        };

        for entry in &entries {
            let meta_value = MetadataValue {
                owner_id: entry.meta_data.owner_id.clone(),
                qualifier: entry.meta_data.qualifier.clone(),
            };
            let meta_bytes = match serde_json::to_vec(&meta_value) {
                Ok(bytes) => bytes,
                Err(err) => {
                    tracing::warn!(error = %err, "deliver_tx metadata re-encode failed");
                    return TxResponse::encoding_error(err.to_string());
                }
            };
            self.metadata_batch.put(
                ColumnFamily::Metadata,
                &entry.meta_data.row_key,
                &meta_bytes,
            );
            self.payload_batch.put(
                ColumnFamily::Payload,
                &entry.real_data.row_key,
                &entry.real_data.data,
            );
        }

        tracing::debug!(pairs = entries.len(), "deliver_tx appended to pending batches");
        TxResponse::ok()
    }

    /// Atomically flushes the metadata batch, then the payload batch.
    /// Both pending batches are replaced with fresh empty ones regardless
    /// of whether either write succeeded — see `DESIGN.md` for why this
    /// implementation always resets rather than preserving a failed batch
    /// for retry.
    pub fn commit(&mut self) -> CommitResponse {
        let metadata_batch = std::mem::replace(&mut self.metadata_batch, self.store.new_batch());
        let payload_batch = std::mem::replace(&mut self.payload_batch, self.store.new_batch());

        match self.store.write(metadata_batch) {
            Ok(count) => tracing::info!(cf = "metadata", rows = count, "commit flushed"),
            Err(err) => tracing::error!(cf = "metadata", error = %err, "commit failed"),
        }
        match self.store.write(payload_batch) {
            Ok(count) => tracing::info!(cf = "payload", rows = count, "commit flushed"),
            Err(err) => tracing::error!(cf = "payload", error = %err, "commit failed"),
        }

        CommitResponse::default()
    }

    /// Routes to the query or fetch engine by path and serializes the
    /// result back to the wire `QueryResponse` shape.
    pub fn query(&self, path: &str, data: &[u8]) -> QueryResponse {
        match path {
            "/query" => self.handle_query(data),
            "/fetch" => self.handle_fetch(data),
            other => QueryResponse::invalid_argument(format!("unknown query path {other:?}")),
        }
    }

    fn handle_query(&self, data: &[u8]) -> QueryResponse {
        let request: QueryRequest = match serde_json::from_slice(data) {
            Ok(request) => request,
            Err(err) => return QueryResponse::encoding_error(err.to_string()),
        };
        match run_query(&self.store, &request) {
            Ok(rows) => match serde_json::to_vec(&rows) {
                Ok(value) => QueryResponse::ok(value),
                Err(err) => QueryResponse::encoding_error(err.to_string()),
            },
            Err(err) => query_error_response(err),
        }
    }

    fn handle_fetch(&self, data: &[u8]) -> QueryResponse {
        let request: FetchRequest = match serde_json::from_slice(data) {
            Ok(request) => request,
            Err(err) => return QueryResponse::encoding_error(err.to_string()),
        };
        match run_fetch(&self.store, &request.ids) {
            Ok(rows) => match serde_json::to_vec(&rows) {
                Ok(value) => QueryResponse::ok(value),
                Err(err) => QueryResponse::encoding_error(err.to_string()),
            },
            Err(err) => query_error_response(err),
        }
    }
}

fn decode_tx(tx: &[u8]) -> serde_json::Result<Vec<TxEntry>> {
    serde_json::from_slice(tx)
}

/// Maps a query/fetch engine failure onto the response code a caller should
/// see: `InvalidArgument` and `Storage` get their own codes, anything else
/// (re-serialization, decode) falls back to `EncodingError`.
fn query_error_response(err: tskv_error::Error) -> QueryResponse {
    match err {
        tskv_error::Error::InvalidArgument(msg) => QueryResponse::invalid_argument(msg),
        tskv_error::Error::Storage(msg) => QueryResponse::storage_error(msg),
        tskv_error::Error::Encoding(err) => QueryResponse::encoding_error(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use tskv_storage::MemStore;

    use super::*;

    // Block-lifecycle scenarios (S4-S6) are exercised end-to-end through
    // the public callback surface in `tests/state_machine.rs`; these
    // cover internals not visible from outside the crate.

    #[test]
    fn query_error_response_maps_storage_errors_to_their_own_code() {
        let resp = query_error_response(tskv_error::Error::storage("disk gone"));
        assert_eq!(resp.code, crate::wire::Code::StorageError);
        assert_eq!(resp.log, "disk gone");
    }

    #[test]
    fn check_tx_rejects_malformed_json_without_touching_batches() {
        let sm = StateMachine::new(MemStore::new());
        let resp = sm.check_tx(b"not json");
        assert_eq!(resp.code, crate::wire::Code::EncodingError);
        assert_eq!(sm.metadata_batch.len(), 0);
        assert_eq!(sm.payload_batch.len(), 0);
    }

    #[test]
    fn commit_resets_batches_even_when_block_was_empty() {
        let mut sm = StateMachine::new(MemStore::new());
        sm.init_chain();
        let resp = sm.commit();
        assert!(resp.data.is_empty());
        assert_eq!(sm.metadata_batch.len(), 0);
    }

    #[test]
    fn deliver_tx_grows_pending_batches_before_commit() {
        let mut sm = StateMachine::new(MemStore::new());
        sm.init_chain();

        let row_key = tskv_common::encode(1_000, 0);
        let tx = serde_json::to_vec(&serde_json::json!([{
            "metaData": {"rowKey": b64(&row_key), "ownerId": "owner", "qualifier": b64(b"qual")},
            "realData": {"rowKey": b64(&row_key), "data": b64(b"payload-bytes")},
        }]))
        .unwrap();

        assert_eq!(sm.deliver_tx(&tx).code, crate::wire::Code::Ok);
        assert_eq!(sm.metadata_batch.len(), 1);
        assert_eq!(sm.payload_batch.len(), 1);
    }

    fn b64(bytes: &[u8]) -> String {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }
}
