//! services/scheduler/src/config.rs
//!
//! Defines the service's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use scheduling_core::{ScheduleRules, TimeSlot};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub rules: ScheduleRules,
    pub store_timeout: Duration,
    /// JSON file with professors and schedules to preload into the in-memory store.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // --- Logging ---
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- Working-hours window and slot catalog ---
        let defaults = ScheduleRules::standard();
        let window_start = time_var(&lookup, "SCHEDULE_WINDOW_START", defaults.window_start)?;
        let window_end = time_var(&lookup, "SCHEDULE_WINDOW_END", defaults.window_end)?;
        let step_minutes = parsed_var(&lookup, "SCHEDULE_STEP_MINUTES", defaults.step_minutes)?;
        let enforce_catalog_membership = parsed_var(
            &lookup,
            "SCHEDULE_ENFORCE_CATALOG",
            defaults.enforce_catalog_membership,
        )?;

        // --- Store ---
        let store_timeout = Duration::from_millis(parsed_var(&lookup, "STORE_TIMEOUT_MS", 5000u64)?);
        let seed_path = lookup("SEED_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            log_level,
            rules: ScheduleRules {
                window_start,
                window_end,
                step_minutes,
                enforce_catalog_membership,
            },
            store_timeout,
            seed_path,
        })
    }
}

fn time_var(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: TimeSlot,
) -> Result<TimeSlot, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => TimeSlot::parse_24h(&value).ok_or_else(|| {
            ConfigError::InvalidValue(key.to_string(), format!("'{}' is not an HH:MM time", value))
        }),
    }
}

fn parsed_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
    }
}
