//! Core error types for the export job

use thiserror::Error;

/// Core error type for all export operations
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Schema discovery failed: {0}")]
    Discovery(#[source] sqlx::Error),

    #[error("Extraction failed for table {table}: {source}")]
    Extraction {
        table: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExportError {
    /// Whether the run can continue past this error (skip-and-continue)
    /// or must abort.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExportError::Extraction { .. })
    }
}

/// Result type alias using ExportError
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_display() {
        let err = ExportError::Configuration("DATABASE_URL is required".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: DATABASE_URL is required"
        );
    }

    #[test]
    fn test_extraction_names_table() {
        let err = ExportError::Extraction {
            table: "orders".to_string(),
            source: sqlx::Error::RowNotFound,
        };
        assert!(err.to_string().contains("orders"));
    }

    #[test]
    fn test_only_extraction_is_recoverable() {
        let extraction = ExportError::Extraction {
            table: "users".to_string(),
            source: sqlx::Error::PoolClosed,
        };
        assert!(extraction.is_recoverable());

        let discovery = ExportError::Discovery(sqlx::Error::PoolClosed);
        assert!(!discovery.is_recoverable());
    }
}
