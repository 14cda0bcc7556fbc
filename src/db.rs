use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::config::EngineConfig;
use crate::store::StoreError;

pub type DbPool = SqlitePool;

/// File path behind a SQLite URL, or `None` for in-memory databases
fn sqlite_file_path(database_url: &str) -> Option<PathBuf> {
  let rest = database_url
    .strip_prefix("sqlite://")
    .or_else(|| database_url.strip_prefix("sqlite:"))?;
  let path = rest.split('?').next().unwrap_or_default();

  if path.is_empty() || path == ":memory:" {
    None
  } else {
    Some(PathBuf::from(path))
  }
}

/// Initialize the database connection pool and run migrations
pub async fn initialize_db(config: &EngineConfig) -> Result<DbPool, StoreError> {
  let file_path = sqlite_file_path(&config.database_url);

  if let Some(parent) = file_path
    .as_deref()
    .and_then(|p| p.parent())
    .filter(|p| !p.as_os_str().is_empty())
  {
    // Create directory if it doesn't exist
    fs::create_dir_all(parent)?;
  }

  info!(url = %config.database_url, "Initializing database");

  // Each connection to an in-memory database gets its own empty database
  let max_connections = if file_path.is_some() { 5 } else { 1 };

  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect(&config.database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("Database initialized successfully");

  Ok(pool)
}
