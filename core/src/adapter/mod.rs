//! Source database abstraction for the export job

use crate::domain::TableSnapshot;
use crate::error::Result;
use async_trait::async_trait;

pub mod postgres;

pub use postgres::PostgresSource;

/// Abstract read-only view of the database being exported
///
/// Each source database type implements this trait; the export
/// orchestration only depends on it, which keeps the run testable
/// without a live database.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SourceDb: Send + Sync {
    /// List all base tables in the default schema, alphabetically by name
    async fn list_tables(&self) -> Result<Vec<String>>;

    /// Fetch one table's declared column order and all of its rows
    async fn snapshot_table(&self, table: &str) -> Result<TableSnapshot>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_source() {
        let mut mock = MockSourceDb::new();
        mock.expect_list_tables()
            .returning(|| Ok(vec!["users".to_string()]));

        let tables = mock.list_tables().await.unwrap();
        assert_eq!(tables, vec!["users"]);
    }
}
