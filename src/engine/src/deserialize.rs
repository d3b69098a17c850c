//! The client-side result deserializer: turns the raw rows a `Query` call
//! returns over the wire back into the two user-facing result shapes,
//! parsing `timestamp` out of each row key along the way.

use tskv_common::{FetchResultItem, QueryResultItem, decode_timestamp};
use tskv_error::Result;

use crate::wire::{MetadataRow, PayloadRow};

/// Deserializes a `/query` response value into [`QueryResultItem`]s.
pub fn deserialize_metadata_rows(bytes: &[u8]) -> Result<Vec<QueryResultItem>> {
    let rows: Vec<MetadataRow> = serde_json::from_slice(bytes)?;
    Ok(rows
        .into_iter()
        .map(|row| QueryResultItem {
            timestamp: decode_timestamp(&row.row_key),
            id: row.row_key,
            owner_id: row.owner_id,
            qualifier: String::from_utf8_lossy(&row.qualifier).into_owned(),
        })
        .collect())
}

/// Deserializes a `/fetch` response value into [`FetchResultItem`]s.
pub fn deserialize_payload_rows(bytes: &[u8]) -> Result<Vec<FetchResultItem>> {
    let rows: Vec<PayloadRow> = serde_json::from_slice(bytes)?;
    Ok(rows
        .into_iter()
        .map(|row| FetchResultItem {
            timestamp: decode_timestamp(&row.row_key),
            id: row.row_key,
            data: row.data,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use tskv_common::encode;

    use super::*;

    #[test]
    fn deserializes_metadata_rows_matching_scenario_s2() {
        let k1 = encode(1_547_772_882_435_375_000, 0);
        let k2 = encode(1_547_772_960_049_177_000, 0);
        let rows = vec![
            MetadataRow {
                row_key: k1.to_vec(),
                owner_id: "ownertest".to_owned(),
                qualifier: b"testQualifier".to_vec(),
            },
            MetadataRow {
                row_key: k2.to_vec(),
                owner_id: "ownertest".to_owned(),
                qualifier: b"testQualifier".to_vec(),
            },
        ];
        let bytes = serde_json::to_vec(&rows).unwrap();

        let items = deserialize_metadata_rows(&bytes).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].timestamp, 1_547_772_882_435_375_000);
        assert_eq!(items[1].timestamp, 1_547_772_960_049_177_000);
        for item in &items {
            assert_eq!(item.owner_id, "ownertest");
            assert_eq!(item.qualifier, "testQualifier");
        }
        assert_eq!(items[0].id, k1.to_vec());
        assert_eq!(items[1].id, k2.to_vec());
    }

    #[test]
    fn deserializes_payload_rows_matching_scenario_s3() {
        let k1 = encode(1_547_772_882_435_375_000, 0);
        let k2 = encode(1_547_772_960_049_177_000, 0);
        let rows = vec![
            PayloadRow {
                row_key: k1.to_vec(),
                data: b"testData1".to_vec(),
            },
            PayloadRow {
                row_key: k2.to_vec(),
                data: b"testData2".to_vec(),
            },
        ];
        let bytes = serde_json::to_vec(&rows).unwrap();

        let items = deserialize_payload_rows(&bytes).unwrap();
        assert_eq!(items[0].timestamp, 1_547_772_882_435_375_000);
        assert_eq!(items[0].data, b"testData1");
        assert_eq!(items[1].timestamp, 1_547_772_960_049_177_000);
        assert_eq!(items[1].data, b"testData2");
    }
}
