//! The user-facing write model, query/fetch requests, and the two result
//! shapes produced by the query and fetch engines.

use serde::{Deserialize, Serialize};

/// Bytes fields on the wire are base64-encoded JSON strings; this module
/// plugs that convention into `serde` for any `Vec<u8>` field.
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

/// As [`base64_bytes`], for the `Option<Vec<u8>>` shape `QueryRequest.qualifier`
/// needs: JSON `null` maps to `None`, a base64 string maps to `Some`.
mod base64_bytes_opt {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|encoded| {
                STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}

/// As [`base64_bytes`], for `FetchRequest.ids`'s `Vec<Vec<u8>>` shape.
mod base64_bytes_vec {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ids: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(ids.len()))?;
        for id in ids {
            seq.serialize_element(&STANDARD.encode(id))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let encoded: Vec<String> = Vec::deserialize(deserializer)?;
        encoded
            .into_iter()
            .map(|encoded| {
                STANDARD
                    .decode(encoded.as_bytes())
                    .map_err(serde::de::Error::custom)
            })
            .collect()
    }
}

/// The write model a caller builds before a record is translated into a
/// `DeliverTx` transaction entry by the (out-of-scope) producer layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub timestamp: u64,
    #[serde(rename = "ownerKey", with = "base64_bytes")]
    pub owner_key: Vec<u8>,
    pub qualifier: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

/// The value stored under a row key in the metadata column family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataValue {
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(with = "base64_bytes")]
    pub qualifier: Vec<u8>,
}

/// A time-range metadata query with optional owner/qualifier filters.
///
/// `qualifier: None` represents the wire's JSON `null`, which is rejected as
/// an invalid argument; `Some(vec![])` means "match any qualifier".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub start: u64,
    pub end: u64,
    #[serde(rename = "ownerId", default)]
    pub owner_id: String,
    #[serde(default, with = "base64_bytes_opt")]
    pub qualifier: Option<Vec<u8>>,
}

/// A point-lookup-by-id request against the payload column family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    #[serde(rename = "rowKeys", with = "base64_bytes_vec")]
    pub ids: Vec<Vec<u8>>,
}

/// One row produced by the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResultItem {
    #[serde(with = "base64_bytes")]
    pub id: Vec<u8>,
    pub timestamp: u64,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    pub qualifier: String,
}

/// One row produced by the fetch engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResultItem {
    #[serde(with = "base64_bytes")]
    pub id: Vec<u8>,
    pub timestamp: u64,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}
