//! PostgreSQL source implementation

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgPool, Row as _};
use tracing::debug;

use crate::adapter::SourceDb;
use crate::domain::{Row, TableSnapshot};
use crate::error::{ExportError, Result};

/// Schema whose tables are exported
const SCHEMA: &str = "public";

/// PostgreSQL source database
pub struct PostgresSource {
    /// Shared connection pool used for every query in a run
    pool: PgPool,
}

impl PostgresSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Quote an identifier for interpolation into SQL
    fn quote_ident(ident: &str) -> String {
        format!("\"{}\"", ident.replace('"', "\"\""))
    }

    /// Declared column names for a table, in ordinal position order
    async fn declared_columns(&self, table: &str) -> sqlx::Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT column_name FROM information_schema.columns \
             WHERE table_schema = $1 AND table_name = $2 \
             ORDER BY ordinal_position",
        )
        .bind(SCHEMA)
        .bind(table)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(|row| row.get("column_name")).collect())
    }

    /// Rebuild a `to_jsonb` row in declared column order.
    ///
    /// jsonb does not preserve key order, so order is re-imposed from the
    /// schema metadata; a declared column absent from the jsonb object
    /// becomes null, and any leftover keys are appended so no fetched data
    /// is dropped.
    fn reorder_row(value: Value, columns: &[String]) -> Row {
        let mut source = match value {
            Value::Object(map) => map,
            _ => Row::new(),
        };

        let mut row = Row::new();
        for col in columns {
            row.insert(col.clone(), source.remove(col).unwrap_or(Value::Null));
        }
        for (key, val) in source {
            row.insert(key, val);
        }
        row
    }
}

#[async_trait]
impl SourceDb for PostgresSource {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let rows = sqlx::query(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = $1 AND table_type = 'BASE TABLE' \
             ORDER BY table_name",
        )
        .bind(SCHEMA)
        .fetch_all(&self.pool)
        .await
        .map_err(ExportError::Discovery)?;

        Ok(rows.iter().map(|row| row.get("table_name")).collect())
    }

    async fn snapshot_table(&self, table: &str) -> Result<TableSnapshot> {
        let columns = self
            .declared_columns(table)
            .await
            .map_err(|source| ExportError::Extraction {
                table: table.to_string(),
                source,
            })?;

        // to_jsonb hands every cell over as plain JSON, so the driver's
        // type mapping never leaks into the export
        let query = format!(
            "SELECT to_jsonb(t.*) AS row_data FROM {} t",
            Self::quote_ident(table)
        );
        let fetched = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| ExportError::Extraction {
                table: table.to_string(),
                source,
            })?;

        let rows: Vec<Row> = fetched
            .iter()
            .map(|row| Self::reorder_row(row.get("row_data"), &columns))
            .collect();

        debug!("Fetched {} rows from {}", rows.len(), table);

        Ok(TableSnapshot {
            name: table.to_string(),
            columns,
            rows,
        })
    }
}
