//! services/scheduler/src/error.rs
//!
//! Defines the primary error type for the scheduler service.

use crate::config::ConfigError;
use scheduling_core::{CatalogError, PortError, ScheduleError, ValidationErrors};

/// The primary error type for the `scheduler` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The configured working window or step cannot produce a slot catalog.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// A schedule operation was rejected by the core.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Seed data that does not describe valid schedules.
    #[error("Invalid seed data: {0}")]
    Seed(#[from] ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents a standard Input/Output error (e.g., reading the seed file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
