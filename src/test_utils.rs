//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Weekly report fixtures
//! - Training state factories
//! - Helper assertions

use sqlx::SqlitePool;

use crate::models::{MuscleGroup, StimulusFeedback, WeeklyReport};
use crate::state::{TrainingSnapshot, TrainingState};
use crate::store::{CycleRecord, StateStore, StoreError};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Store whose every call fails, for exercising error paths
pub struct FailingStore;

impl StateStore for FailingStore {
  async fn load(&self) -> Result<Option<TrainingSnapshot>, StoreError> {
    Err(StoreError::Corrupt("unreadable".to_string()))
  }

  async fn save(&self, _snapshot: &TrainingSnapshot) -> Result<(), StoreError> {
    Err(StoreError::Corrupt("read-only".to_string()))
  }

  async fn record_cycle(&self, _record: &CycleRecord) -> Result<(), StoreError> {
    Err(StoreError::Corrupt("read-only".to_string()))
  }

  async fn cycle_history(&self) -> Result<Vec<CycleRecord>, StoreError> {
    Ok(Vec::new())
  }
}

/// ---------------------------------------------------------------------------
/// Report Fixtures
/// ---------------------------------------------------------------------------

/// Good session, fully recovered: stimulus 6/9, no soreness, SFR 4
pub fn fresh_report() -> WeeklyReport {
  WeeklyReport {
    stimulus: StimulusFeedback::new(2, 2, 2),
    soreness: 0,
    joint_ache: 0,
    perf_change: 0,
    performance: None,
    last_load: None,
    recovery_session: false,
    has_illness: false,
  }
}

/// Beaten up: flat session, very sore, achy joints, performance down
pub fn fatigued_report() -> WeeklyReport {
  WeeklyReport {
    stimulus: StimulusFeedback::new(1, 1, 0),
    soreness: 3,
    joint_ache: 2,
    perf_change: -1,
    performance: None,
    last_load: None,
    recovery_session: false,
    has_illness: false,
  }
}

/// ---------------------------------------------------------------------------
/// State Factories
/// ---------------------------------------------------------------------------

/// Fresh state positioned at `week` of a `meso_len`-week mesocycle
pub fn state_at_week(week: u32, meso_len: u32) -> TrainingState {
  let mut state = TrainingState::with_meso_length(meso_len);
  state.week_no = week.clamp(1, state.meso_len);
  state
}

/// Fresh state with one muscle set to an absolute weekly set count
pub fn state_with_sets(muscle: MuscleGroup, sets: i32) -> TrainingState {
  let mut state = TrainingState::new();
  state.update_weekly_sets(muscle, sets);
  state
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::VolumeStatus;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    // Verify key tables exist
    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('training_state', 'cycle_history')"
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");

    assert_eq!(tables.len(), 2, "Expected 2 tables, got {}", tables.len());

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_report_fixtures_are_in_range() {
    for report in [fresh_report(), fatigued_report()] {
      for score in [
        report.stimulus.mmc,
        report.stimulus.pump,
        report.stimulus.disruption,
        report.soreness,
        report.joint_ache,
      ] {
        assert!((0..=3).contains(&score));
      }
    }
  }

  #[test]
  fn test_state_factories() {
    let state = state_at_week(3, 5);
    assert_eq!(state.week_no, 3);
    assert_eq!(state.meso_len, 5);

    let state = state_at_week(9, 4);
    assert_eq!(state.week_no, 4);

    let state = state_with_sets(MuscleGroup::Chest, 22);
    assert_eq!(state.volume_status(MuscleGroup::Chest), VolumeStatus::Maximum);
  }

  #[tokio::test]
  async fn test_failing_store_fails() {
    let store = FailingStore;
    assert!(store.load().await.is_err());
    assert!(store.save(&TrainingState::new().snapshot()).await.is_err());
  }
}
