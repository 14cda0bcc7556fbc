//! Persistence collaborator for training state
//!
//! The engine never persists on its own. Callers pick save points and hand a
//! `TrainingSnapshot` to a `StateStore`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use crate::state::TrainingSnapshot;
use crate::volume::WeeklyProgression;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Migration failed: {0}")]
  Migrate(#[from] sqlx::migrate::MigrateError),

  #[error("Stored snapshot is corrupt: {0}")]
  Corrupt(String),

  #[error("Failed to serialize: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("Failed to prepare database location: {0}")]
  Io(#[from] std::io::Error),
}

/// ---------------------------------------------------------------------------
/// Cycle History
/// ---------------------------------------------------------------------------

/// One completed weekly run, as appended after each save point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleRecord {
  pub block_no: u32,
  /// Week the reports were processed in (before any advance)
  pub week_no: u32,
  pub deload_triggered: bool,
  pub mrv_hits: u32,
  pub progression: WeeklyProgression,
  pub recorded_at: DateTime<Utc>,
}

impl CycleRecord {
  pub fn new(block_no: u32, week_no: u32, progression: WeeklyProgression) -> Self {
    Self {
      block_no,
      week_no,
      deload_triggered: progression.deload_triggered,
      mrv_hits: progression.mrv_hits,
      progression,
      recorded_at: Utc::now(),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Store Trait
/// ---------------------------------------------------------------------------

#[allow(async_fn_in_trait)]
pub trait StateStore {
  /// `Ok(None)` when nothing has been saved yet
  async fn load(&self) -> Result<Option<TrainingSnapshot>, StoreError>;

  /// Overwrite the stored snapshot
  async fn save(&self, snapshot: &TrainingSnapshot) -> Result<(), StoreError>;

  async fn record_cycle(&self, record: &CycleRecord) -> Result<(), StoreError>;

  /// Oldest first
  async fn cycle_history(&self) -> Result<Vec<CycleRecord>, StoreError>;
}

fn parse_snapshot(json: &str) -> Result<TrainingSnapshot, StoreError> {
  TrainingSnapshot::from_json(json).map_err(|e| StoreError::Corrupt(e.to_string()))
}

/// ---------------------------------------------------------------------------
/// SQLite Store
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteStateStore {
  pool: SqlitePool,
}

impl SqliteStateStore {
  /// Expects a pool that has already been migrated (see `db::initialize_db`)
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }
}

impl StateStore for SqliteStateStore {
  async fn load(&self) -> Result<Option<TrainingSnapshot>, StoreError> {
    let row = sqlx::query("SELECT snapshot_json FROM training_state WHERE id = 1")
      .fetch_optional(&self.pool)
      .await?;

    match row {
      Some(row) => {
        let json: String = row.try_get("snapshot_json")?;
        parse_snapshot(&json).map(Some)
      }
      None => Ok(None),
    }
  }

  async fn save(&self, snapshot: &TrainingSnapshot) -> Result<(), StoreError> {
    let json = snapshot.to_json()?;

    sqlx::query(
      r#"
      INSERT INTO training_state (id, snapshot_json, updated_at)
      VALUES (1, ?1, ?2)
      ON CONFLICT(id) DO UPDATE SET
        snapshot_json = excluded.snapshot_json,
        updated_at = excluded.updated_at
      "#,
    )
    .bind(&json)
    .bind(Utc::now())
    .execute(&self.pool)
    .await?;

    debug!(week = snapshot.week_no, block = snapshot.block_no, "Training state saved");
    Ok(())
  }

  async fn record_cycle(&self, record: &CycleRecord) -> Result<(), StoreError> {
    let progression_json = serde_json::to_string(&record.progression)?;

    sqlx::query(
      r#"
      INSERT INTO cycle_history
        (block_no, week_no, deload_triggered, mrv_hits, progression_json, recorded_at)
      VALUES (?, ?, ?, ?, ?, ?)
      "#,
    )
    .bind(record.block_no)
    .bind(record.week_no)
    .bind(record.deload_triggered)
    .bind(record.mrv_hits)
    .bind(progression_json)
    .bind(record.recorded_at)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  async fn cycle_history(&self) -> Result<Vec<CycleRecord>, StoreError> {
    let rows = sqlx::query(
      r#"
      SELECT block_no, week_no, deload_triggered, mrv_hits, progression_json, recorded_at
      FROM cycle_history
      ORDER BY id ASC
      "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows
      .iter()
      .map(|row| {
        let progression_json: String = row.try_get("progression_json")?;
        let progression = serde_json::from_str(&progression_json)
          .map_err(|e| StoreError::Corrupt(e.to_string()))?;

        Ok(CycleRecord {
          block_no: row.try_get("block_no")?,
          week_no: row.try_get("week_no")?,
          deload_triggered: row.try_get("deload_triggered")?,
          mrv_hits: row.try_get("mrv_hits")?,
          progression,
          recorded_at: row.try_get("recorded_at")?,
        })
      })
      .collect()
  }
}

/// ---------------------------------------------------------------------------
/// In-Memory Store
/// ---------------------------------------------------------------------------

/// Keeps the snapshot as JSON so it round-trips the same way SQLite does
#[derive(Debug, Default)]
pub struct MemoryStateStore {
  snapshot_json: Mutex<Option<String>>,
  history: Mutex<Vec<CycleRecord>>,
}

impl MemoryStateStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seed with raw JSON, e.g. to simulate a corrupt row
  pub fn with_raw_json(json: impl Into<String>) -> Self {
    Self {
      snapshot_json: Mutex::new(Some(json.into())),
      history: Mutex::new(Vec::new()),
    }
  }
}

impl StateStore for MemoryStateStore {
  async fn load(&self) -> Result<Option<TrainingSnapshot>, StoreError> {
    let guard = self.snapshot_json.lock().await;
    guard.as_deref().map(parse_snapshot).transpose()
  }

  async fn save(&self, snapshot: &TrainingSnapshot) -> Result<(), StoreError> {
    let json = snapshot.to_json()?;
    *self.snapshot_json.lock().await = Some(json);
    Ok(())
  }

  async fn record_cycle(&self, record: &CycleRecord) -> Result<(), StoreError> {
    self.history.lock().await.push(record.clone());
    Ok(())
  }

  async fn cycle_history(&self) -> Result<Vec<CycleRecord>, StoreError> {
    Ok(self.history.lock().await.clone())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::MuscleGroup;
  use crate::state::TrainingState;
  use crate::test_utils::{setup_test_db, teardown_test_db};
  use std::collections::BTreeMap;

  fn sample_progression(deload_triggered: bool) -> WeeklyProgression {
    WeeklyProgression {
      progression_log: BTreeMap::new(),
      deload_triggered,
      mrv_hits: 2,
      recommendation: "Continue progression".to_string(),
    }
  }

  #[tokio::test]
  async fn test_sqlite_load_empty_returns_none() {
    let pool = setup_test_db().await;
    let store = SqliteStateStore::new(pool.clone());

    assert!(store.load().await.unwrap().is_none());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_sqlite_save_then_load() {
    let pool = setup_test_db().await;
    let store = SqliteStateStore::new(pool.clone());

    let mut state = TrainingState::new();
    state.update_weekly_sets(MuscleGroup::Chest, 14);
    state.week_no = 3;
    store.save(&state.snapshot()).await.unwrap();

    let loaded = store.load().await.unwrap().expect("snapshot saved");
    assert_eq!(loaded, state.snapshot());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_sqlite_save_overwrites_single_row() {
    let pool = setup_test_db().await;
    let store = SqliteStateStore::new(pool.clone());

    let mut state = TrainingState::new();
    store.save(&state.snapshot()).await.unwrap();
    state.next_week();
    store.save(&state.snapshot()).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM training_state")
      .fetch_one(&pool)
      .await
      .unwrap();
    assert_eq!(count, 1);
    assert_eq!(store.load().await.unwrap().unwrap().week_no, 2);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_sqlite_corrupt_row_is_reported() {
    let pool = setup_test_db().await;
    sqlx::query("INSERT INTO training_state (id, snapshot_json, updated_at) VALUES (1, 'not json', '2024-01-01')")
      .execute(&pool)
      .await
      .unwrap();

    let store = SqliteStateStore::new(pool.clone());
    assert!(matches!(store.load().await, Err(StoreError::Corrupt(_))));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_sqlite_cycle_history_appends_in_order() {
    let pool = setup_test_db().await;
    let store = SqliteStateStore::new(pool.clone());

    store
      .record_cycle(&CycleRecord::new(1, 1, sample_progression(false)))
      .await
      .unwrap();
    store
      .record_cycle(&CycleRecord::new(1, 2, sample_progression(true)))
      .await
      .unwrap();

    let history = store.cycle_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].week_no, 1);
    assert!(!history[0].deload_triggered);
    assert_eq!(history[1].week_no, 2);
    assert!(history[1].deload_triggered);
    assert_eq!(history[1].mrv_hits, 2);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_memory_store_round_trip() {
    let store = MemoryStateStore::new();
    assert!(store.load().await.unwrap().is_none());

    let snapshot = TrainingState::with_meso_length(5).snapshot();
    store.save(&snapshot).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(snapshot));
  }

  #[tokio::test]
  async fn test_memory_store_corrupt_json() {
    let store = MemoryStateStore::with_raw_json("{broken");
    assert!(matches!(store.load().await, Err(StoreError::Corrupt(_))));
  }
}
