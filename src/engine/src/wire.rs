//! Wire shapes: the `DeliverTx`/`CheckTx` transaction payload, the two
//! `Query` response row shapes, and the response envelopes every callback
//! returns.

use serde::{Deserialize, Serialize};

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// One half of a `DeliverTx` pair: the metadata side.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TxMeta {
    #[serde(rename = "rowKey", with = "base64_bytes")]
    pub row_key: Vec<u8>,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(with = "base64_bytes")]
    pub qualifier: Vec<u8>,
}

/// The other half: the payload side.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TxReal {
    #[serde(rename = "rowKey", with = "base64_bytes")]
    pub row_key: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// One pair in a `DeliverTx`/`CheckTx` transaction payload.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TxEntry {
    #[serde(rename = "metaData")]
    pub meta_data: TxMeta,
    #[serde(rename = "realData")]
    pub real_data: TxReal,
}

/// A row in the `/query` response value, before client-side deserialization
/// parses the row key into a `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRow {
    #[serde(rename = "rowKey", with = "base64_bytes")]
    pub row_key: Vec<u8>,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(with = "base64_bytes")]
    pub qualifier: Vec<u8>,
}

/// A row in the `/fetch` response value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadRow {
    #[serde(rename = "rowKey", with = "base64_bytes")]
    pub row_key: Vec<u8>,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// Response code shared by `CheckTx`, `DeliverTx`, and `Query`.
///
/// `CheckTx`/`DeliverTx` only ever produce `Ok` or `EncodingError` (a
/// transaction is either well-formed JSON or it isn't); `Query` can also
/// produce `InvalidArgument` and `StorageError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    Ok,
    EncodingError,
    InvalidArgument,
    StorageError,
}

/// The reply shape for `Info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoResponse {
    pub data: String,
}

/// The reply shape for `CheckTx`/`DeliverTx`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxResponse {
    pub code: Code,
    pub log: String,
}

impl TxResponse {
    pub(crate) fn ok() -> Self {
        Self {
            code: Code::Ok,
            log: String::new(),
        }
    }

    pub(crate) fn encoding_error(log: impl Into<String>) -> Self {
        Self {
            code: Code::EncodingError,
            log: log.into(),
        }
    }
}

/// The reply shape for `Commit`. The `data` field is reserved and always
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitResponse {
    pub data: Vec<u8>,
}

/// The reply shape for `Query`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub code: Code,
    pub value: Vec<u8>,
    pub log: String,
}

impl QueryResponse {
    pub(crate) fn ok(value: Vec<u8>) -> Self {
        Self {
            code: Code::Ok,
            value,
            log: String::new(),
        }
    }

    pub(crate) fn encoding_error(log: impl Into<String>) -> Self {
        Self {
            code: Code::EncodingError,
            value: Vec::new(),
            log: log.into(),
        }
    }

    pub(crate) fn invalid_argument(log: impl Into<String>) -> Self {
        Self {
            code: Code::InvalidArgument,
            value: Vec::new(),
            log: log.into(),
        }
    }

    pub(crate) fn storage_error(log: impl Into<String>) -> Self {
        Self {
            code: Code::StorageError,
            value: Vec::new(),
            log: log.into(),
        }
    }
}
