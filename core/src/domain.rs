//! Domain models for the export job

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Database label recorded in the aggregate document metadata
pub const DATABASE_LABEL: &str = "findermeister";

/// One fetched record: an ordered mapping from column name to a JSON value.
///
/// `serde_json::Map` preserves insertion order (the crate's `preserve_order`
/// feature), so rows serialize with columns in declared schema order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Point-in-time capture of one table: declared column order plus all rows.
///
/// Both output forms (aggregate document and CSV artifact) are derived from
/// the same snapshot, never from separately-queried data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl TableSnapshot {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Run metadata attached to the aggregate document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub exported_at: DateTime<Utc>,
    pub database: String,
    pub total_tables: usize,
    pub total_records: u64,
}

/// The aggregate document written as `findermeister_<timestamp>.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub metadata: ExportMetadata,
    pub data: BTreeMap<String, Vec<Row>>,
}

impl ExportDocument {
    /// Assemble the aggregate from the snapshots of one run.
    ///
    /// Tables that failed extraction are simply absent from `snapshots` and
    /// therefore contribute nothing to `data` or the totals.
    pub fn from_snapshots(exported_at: DateTime<Utc>, snapshots: &[TableSnapshot]) -> Self {
        let total_records = snapshots.iter().map(|s| s.row_count() as u64).sum();
        let data: BTreeMap<String, Vec<Row>> = snapshots
            .iter()
            .map(|s| (s.name.clone(), s.rows.clone()))
            .collect();

        ExportDocument {
            metadata: ExportMetadata {
                exported_at,
                database: DATABASE_LABEL.to_string(),
                total_tables: data.len(),
                total_records,
            },
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(name: &str, rows: Vec<Row>) -> TableSnapshot {
        TableSnapshot {
            name: name.to_string(),
            columns: vec!["id".to_string()],
            rows,
        }
    }

    fn row(id: i64) -> Row {
        let mut row = Row::new();
        row.insert("id".to_string(), json!(id));
        row
    }

    #[test]
    fn test_from_snapshots_totals() {
        let doc = ExportDocument::from_snapshots(
            Utc::now(),
            &[
                snapshot("users", vec![row(1), row(2)]),
                snapshot("proposals", vec![row(3)]),
                snapshot("messages", vec![]),
            ],
        );

        assert_eq!(doc.metadata.database, "findermeister");
        assert_eq!(doc.metadata.total_tables, 3);
        assert_eq!(doc.metadata.total_records, 3);
        // Empty table is present in the aggregate with an empty sequence
        assert_eq!(doc.data["messages"], Vec::<Row>::new());
    }

    #[test]
    fn test_data_keys_alphabetical() {
        let doc = ExportDocument::from_snapshots(
            Utc::now(),
            &[
                snapshot("b", vec![]),
                snapshot("a", vec![]),
                snapshot("c", vec![]),
            ],
        );

        let keys: Vec<&str> = doc.data.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let doc = ExportDocument::from_snapshots(Utc::now(), &[]);
        let json = serde_json::to_string(&doc).unwrap();

        assert!(json.contains("exportedAt"));
        assert!(json.contains("totalTables"));
        assert!(json.contains("totalRecords"));
    }
}
