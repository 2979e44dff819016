//! CLI command implementations.

pub mod methods;
pub mod package;

use orddd_compat::db::RepositoryError;
use orddd_compat::{CompatConfig, ConfigError, DirectorySnapshot, MethodRegistry};

/// Errors shared by the inspection commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Load configuration and read a fresh directory snapshot from the host
/// database.
pub async fn load_snapshot() -> Result<(CompatConfig, DirectorySnapshot), CommandError> {
    let config = CompatConfig::from_env()?;

    tracing::info!("Connecting to host database...");
    let pool = orddd_compat::db::create_pool(&config.database_url).await?;

    let registry = MethodRegistry::with_host_defaults();
    let snapshot = orddd_compat::db::PgShippingDirectory::new(&pool)
        .load(registry)
        .await?;

    Ok((config, snapshot))
}
