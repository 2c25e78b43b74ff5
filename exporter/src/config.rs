//! Exporter configuration

use fm_export_core::{ExportError, Result};

/// Exporter configuration
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// Source database URL
    pub database_url: String,
    /// Base directory for export artifacts
    pub export_dir: String,
}

impl ExporterConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ExportError::Configuration("DATABASE_URL is required".to_string()))?,
            export_dir: std::env::var("EXPORT_DIR").unwrap_or_else(|_| "exports".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/findermeister");
        let config = ExporterConfig::from_env().unwrap();

        assert_eq!(config.database_url, "postgres://localhost/findermeister");
        assert_eq!(config.export_dir, "exports");

        std::env::remove_var("DATABASE_URL");
    }
}
