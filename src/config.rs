use std::env;

use thiserror::Error;

pub const DATABASE_URL_VAR: &str = "LANDMARK_COACH_DATABASE_URL";
pub const MESO_LENGTH_VAR: &str = "LANDMARK_COACH_MESO_LENGTH";
pub const LOG_FILTER_VAR: &str = "LANDMARK_COACH_LOG";

const DEFAULT_DATABASE_URL: &str = "sqlite://landmark-coach.db?mode=rwc";
const DEFAULT_MESO_LENGTH: u32 = 4;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value}")]
  Invalid { key: String, value: String },
}

/// Engine settings read from the environment (and `.env`, if present)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
  pub database_url: String,
  /// Weeks per mesocycle for a fresh state; at least 1
  pub meso_length: u32,
  /// Default `tracing` filter; `RUST_LOG` wins when set
  pub log_filter: String,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      database_url: DEFAULT_DATABASE_URL.to_string(),
      meso_length: DEFAULT_MESO_LENGTH,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
    }
  }
}

impl EngineConfig {
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_process_env()
  }

  /// Same as `from_env` without reading `.env`
  pub fn from_process_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();

    let meso_length = match read_var(MESO_LENGTH_VAR) {
      Some(raw) => parse_meso_length(&raw)?,
      None => defaults.meso_length,
    };

    Ok(Self {
      database_url: read_var(DATABASE_URL_VAR).unwrap_or(defaults.database_url),
      meso_length,
      log_filter: read_var(LOG_FILTER_VAR).unwrap_or(defaults.log_filter),
    })
  }
}

/// Unset and blank are both treated as absent
fn read_var(key: &str) -> Option<String> {
  env::var(key)
    .ok()
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty())
}

fn parse_meso_length(raw: &str) -> Result<u32, ConfigError> {
  let invalid = || ConfigError::Invalid {
    key: MESO_LENGTH_VAR.to_string(),
    value: raw.to_string(),
  };

  let weeks: u32 = raw.parse().map_err(|_| invalid())?;
  if weeks == 0 {
    return Err(invalid());
  }
  Ok(weeks)
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  const ALL_VARS: [&str; 3] = [DATABASE_URL_VAR, MESO_LENGTH_VAR, LOG_FILTER_VAR];

  #[test]
  #[serial]
  fn test_defaults_when_unset() {
    temp_env::with_vars_unset(ALL_VARS, || {
      let config = EngineConfig::from_process_env().unwrap();
      assert_eq!(config, EngineConfig::default());
      assert_eq!(config.database_url, "sqlite://landmark-coach.db?mode=rwc");
      assert_eq!(config.meso_length, 4);
      assert_eq!(config.log_filter, "info");
    });
  }

  #[test]
  #[serial]
  fn test_reads_overrides() {
    temp_env::with_vars(
      [
        (DATABASE_URL_VAR, Some("sqlite::memory:")),
        (MESO_LENGTH_VAR, Some(" 6 ")),
        (LOG_FILTER_VAR, Some("landmark_coach=debug")),
      ],
      || {
        let config = EngineConfig::from_env().unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.meso_length, 6);
        assert_eq!(config.log_filter, "landmark_coach=debug");
      },
    );
  }

  #[test]
  #[serial]
  fn test_blank_values_fall_back_to_defaults() {
    temp_env::with_vars(
      [(DATABASE_URL_VAR, Some("  ")), (MESO_LENGTH_VAR, Some(""))],
      || {
        let config = EngineConfig::from_process_env().unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.meso_length, DEFAULT_MESO_LENGTH);
      },
    );
  }

  #[test]
  #[serial]
  fn test_rejects_zero_meso_length() {
    temp_env::with_var(MESO_LENGTH_VAR, Some("0"), || {
      let err = EngineConfig::from_process_env().unwrap_err();
      assert_eq!(
        err,
        ConfigError::Invalid {
          key: MESO_LENGTH_VAR.to_string(),
          value: "0".to_string(),
        }
      );
    });
  }

  #[test]
  #[serial]
  fn test_rejects_non_numeric_meso_length() {
    temp_env::with_var(MESO_LENGTH_VAR, Some("four"), || {
      let err = EngineConfig::from_process_env().unwrap_err();
      assert_eq!(err.to_string(), "Invalid value for LANDMARK_COACH_MESO_LENGTH: four");
    });
  }
}
