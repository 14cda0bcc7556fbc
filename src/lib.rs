pub mod commands;
pub mod config;
pub mod db;
pub mod effort;
pub mod error;
pub mod fatigue;
pub mod models;
pub mod state;
pub mod store;
pub mod volume;

#[cfg(test)]
pub mod test_utils;

pub use config::EngineConfig;
pub use error::EngineError;
pub use models::{MuscleGroup, VolumeLandmarks, VolumeStatus, WeeklyReport};
pub use state::{StateSummary, TrainingState};
pub use store::{MemoryStateStore, SqliteStateStore, StateStore};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber. `RUST_LOG` wins over
/// `default_filter`. Safe to call more than once; later calls are no-ops.
pub fn init_logging(default_filter: &str) {
  let filter = EnvFilter::try_from_default_env()
    .or_else(|_| EnvFilter::try_new(default_filter))
    .unwrap_or_else(|_| EnvFilter::new("info"));

  let _ = tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer())
    .try_init();
}

/// Open the configured database and load the saved training state,
/// falling back to a fresh state when none can be read
pub async fn start(config: &EngineConfig) -> Result<(SqliteStateStore, TrainingState), EngineError> {
  init_logging(&config.log_filter);

  let pool = db::initialize_db(config).await?;
  let store = SqliteStateStore::new(pool);
  let state = commands::load_training_state(&store, config.meso_length).await;

  tracing::info!(
    week = state.week_no,
    meso = state.meso_len,
    block = state.block_no,
    "Engine ready"
  );
  Ok((store, state))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_start_with_in_memory_database() {
    let config = EngineConfig {
      database_url: "sqlite::memory:".to_string(),
      meso_length: 5,
      ..Default::default()
    };

    let (store, state) = start(&config).await.unwrap();
    assert_eq!(state, TrainingState::with_meso_length(5));
    assert!(store.load().await.unwrap().is_none());
  }

  #[test]
  fn test_init_logging_twice_is_harmless() {
    init_logging("debug");
    init_logging("not a valid filter [");
  }
}
