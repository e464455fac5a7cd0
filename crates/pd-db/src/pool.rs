use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use thiserror::Error;
use tracing::info;

use crate::settings::DbSettings;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),
    #[error("Database name not configured (set PD_DB_NAME)")]
    MissingDatabaseName,
}

/// Connect to the personal-data database.
pub async fn connect(settings: &DbSettings) -> Result<MySqlPool, DbError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_with(settings.connect_options())
        .await?;

    info!(
        host = %settings.host,
        database = %settings.database,
        "Connected to personal-data database"
    );
    Ok(pool)
}
