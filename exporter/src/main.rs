//! FinderMeister Database Exporter
//!
//! Batch job that snapshots every table in the public schema into one
//! JSON aggregate document plus per-table CSV files under `exports/`.

mod config;

use sqlx::postgres::PgPool;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fm_export_core::adapter::PostgresSource;
use fm_export_core::export::{run_export, ExportOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,fm_exporter=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::ExporterConfig::from_env()?;

    info!("Starting FinderMeister database export");

    let pool = PgPool::connect(&config.database_url).await?;
    let source = PostgresSource::new(pool);
    let options = ExportOptions {
        output_dir: config.export_dir.into(),
    };

    let summary = run_export(&source, &options).await?;

    info!(
        "Export complete: {} tables, {} records ({} skipped). Wrote {} and {}",
        summary.total_tables,
        summary.total_records,
        summary.skipped_tables.len(),
        summary.document_path.display(),
        summary.csv_dir.display()
    );

    Ok(())
}
