use anyhow::{Context, Result};
use axum::Router;
use database::SqliteTodoRepository;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::routes::router;

/// Create the todo repository from the configuration
///
/// Opens the connection pool and runs the idempotent schema initializer.
/// A connection failure here is fatal and aborts startup.
pub async fn create_repository(config: &Config) -> Result<Arc<SqliteTodoRepository>> {
    let database_url = config.database_url();
    info!(%database_url, "Initializing SQLite repository");

    let repo =
        SqliteTodoRepository::with_max_connections(&database_url, config.database.max_connections)
            .await
            .context("Failed to connect to database")?;

    repo.ensure_table()
        .await
        .context("Failed to ensure todos table")?;

    Ok(Arc::new(repo))
}

/// Initialize the complete application router
pub async fn initialize_app(config: &Config) -> Result<Router> {
    let repository = create_repository(config)
        .await
        .context("Failed to create repository")?;

    info!("Application initialized");
    Ok(router(repository))
}
