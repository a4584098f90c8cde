use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::Config;
use crate::error::{AppError, AppResult};

/// SQLite allows a single writer, so the pool stays small and waiting
/// handlers get a generous acquire timeout instead of a lock error.
pub async fn connect(config: &Config) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.database_url.as_str());
    options
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .sqlx_logging(true);

    Database::connect(options)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to connect to database: {}", e)))
}
