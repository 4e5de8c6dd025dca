use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;
use super::memory::MemoryStore;
use super::postgres::PgStore;
use super::store::Store;

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violated: {0}")]
    ForeignKey(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Classify a sqlx error by its Postgres SQLSTATE.
    pub fn from_sqlx(err: sqlx::Error, context: &str) -> Self {
        let code = err
            .as_database_error()
            .and_then(|db| db.code())
            .map(|c| c.into_owned());

        match code.as_deref() {
            Some("23505") => DatabaseError::UniqueViolation(context.to_string()),
            Some("23503") => DatabaseError::ForeignKey(context.to_string()),
            _ => DatabaseError::Sqlx(err),
        }
    }
}

const MEMORY_SCHEME: &str = "memory://";

/// Open the shared store named by `DATABASE_URL`.
pub async fn connect(config: &DatabaseConfig) -> Result<Arc<dyn Store>, DatabaseError> {
    if config.url.is_empty() {
        return Err(DatabaseError::ConfigMissing("DATABASE_URL"));
    }

    if config.url.starts_with(MEMORY_SCHEME) {
        info!("Using in-process memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout))
        .connect(&config.url)
        .await?;

    info!("Created database pool ({} max connections)", config.max_connections);
    Ok(Arc::new(PgStore::new(pool)))
}
