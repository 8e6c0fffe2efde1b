//! Arbor Server: per-owner folder trees with blob-backed files.
//!
//! Main entry point that wires all crates together and starts the server.

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use arbor_api::AppState;
use arbor_core::config::AppConfig;
use arbor_core::error::{AppError, ErrorKind};
use arbor_database::DatabasePool;
use arbor_database::migration::run_migrations;
use arbor_storage::LocalBlobStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `ARBOR_CONFIG_DIR` (default `config`) for the
/// `ARBOR_ENV` overlay (default `development`).
fn load_configuration() -> Result<AppConfig, AppError> {
    let dir = std::env::var("ARBOR_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("ARBOR_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load_from(&dir, &env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Arbor v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Create data directories ──────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    run_migrations(db.pool()).await?;

    // ── Step 3: Blob store ───────────────────────────────────────
    let blobs = LocalBlobStore::new(&config.storage.root_path).await?;
    tracing::info!(root = %blobs.root().display(), "Local blob store ready");

    // ── Step 4: Services and HTTP server ─────────────────────────
    let state = AppState::new(config, db.clone(), Arc::new(blobs));
    let result = arbor_api::serve(state).await;

    db.close().await;
    result
}

/// Create the directory holding a file-backed SQLite database.
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    let db_path = config
        .database
        .url
        .strip_prefix("sqlite://")
        .or_else(|| config.database.url.strip_prefix("sqlite:"))
        .map(|rest| rest.split('?').next().unwrap_or(rest))
        .filter(|path| !path.is_empty() && !path.starts_with(":memory:"));

    if let Some(parent) = db_path.and_then(|p| Path::new(p).parent()) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create dir '{}'", parent.display()),
                    e,
                )
            })?;
        }
    }

    Ok(())
}
