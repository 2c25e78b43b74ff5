//! Export orchestration: discovery, per-table extraction, persistence

use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::adapter::SourceDb;
use crate::csv;
use crate::domain::{ExportDocument, TableSnapshot};
use crate::error::Result;

/// Options controlling where a run writes its artifacts
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Base output directory
    pub output_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
        }
    }
}

/// Outcome of a completed export run
#[derive(Debug)]
pub struct ExportSummary {
    /// Path of the aggregate JSON document
    pub document_path: PathBuf,
    /// Directory holding the per-table CSV artifacts
    pub csv_dir: PathBuf,
    pub total_tables: usize,
    pub total_records: u64,
    /// Tables skipped because extraction failed
    pub skipped_tables: Vec<String>,
}

/// Run a full export against the given source.
///
/// Discovery failure aborts the run before anything is written. A failed
/// table extraction is logged and skipped; the run continues with the
/// remaining tables. Filesystem errors propagate and leave any files
/// already written in place.
pub async fn run_export<S: SourceDb>(source: &S, options: &ExportOptions) -> Result<ExportSummary> {
    let started_at = Utc::now();

    let tables = source.list_tables().await?;
    info!("Discovered {} tables", tables.len());

    // Strictly sequential: one table at a time, each query awaited before
    // the next begins
    let mut snapshots: Vec<TableSnapshot> = Vec::with_capacity(tables.len());
    let mut skipped_tables: Vec<String> = Vec::new();
    for table in &tables {
        match source.snapshot_table(table).await {
            Ok(snapshot) => {
                info!("Exported table {} ({} rows)", table, snapshot.row_count());
                snapshots.push(snapshot);
            }
            Err(e) => {
                warn!("Skipping table {}: {}", table, e);
                skipped_tables.push(table.clone());
            }
        }
    }

    let document = ExportDocument::from_snapshots(started_at, &snapshots);
    persist(&document, &snapshots, options, started_at, skipped_tables).await
}

async fn persist(
    document: &ExportDocument,
    snapshots: &[TableSnapshot],
    options: &ExportOptions,
    started_at: DateTime<Utc>,
    skipped_tables: Vec<String>,
) -> Result<ExportSummary> {
    // Filesystem-safe stamp, no colons
    let stamp = started_at.format("%Y-%m-%dT%H-%M-%S").to_string();

    tokio::fs::create_dir_all(&options.output_dir).await?;

    let document_path = options
        .output_dir
        .join(format!("findermeister_{stamp}.json"));
    tokio::fs::write(&document_path, serde_json::to_string_pretty(document)?).await?;

    let csv_dir = options.output_dir.join(format!("csv_{stamp}"));
    tokio::fs::create_dir_all(&csv_dir).await?;
    for snapshot in snapshots {
        // Empty tables appear in the aggregate but get no CSV artifact
        if snapshot.rows.is_empty() {
            continue;
        }
        let path = csv_dir.join(format!("{}.csv", snapshot.name));
        tokio::fs::write(&path, csv::encode_table(snapshot)).await?;
    }

    Ok(ExportSummary {
        document_path,
        csv_dir,
        total_tables: document.metadata.total_tables,
        total_records: document.metadata.total_records,
        skipped_tables,
    })
}
