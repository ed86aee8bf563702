//! crates/scheduling_core/src/ports.rs
//!
//! Defines the service contracts (traits) the scheduling core depends on.
//! These traits form the boundary of the hexagonal architecture, keeping the core
//! independent of the store and directory that actually hold the records.

use crate::domain::{Professor, ProfessorId, ProfessorSchedule, ScheduleId, ScheduleStatus};
use async_trait::async_trait;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("The operation timed out after {0} ms")]
    Timeout(u64),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// The system of record for professor schedules.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn list_schedules(&self) -> PortResult<Vec<ProfessorSchedule>>;

    async fn list_schedules_by_professor(
        &self,
        professor_id: &ProfessorId,
    ) -> PortResult<Vec<ProfessorSchedule>>;

    async fn create_schedule(&self, schedule: &ProfessorSchedule) -> PortResult<()>;

    async fn update_schedule(&self, schedule: &ProfessorSchedule) -> PortResult<()>;

    /// Partial update of the status fields only.
    async fn patch_schedule_status(
        &self,
        schedule_id: ScheduleId,
        status: ScheduleStatus,
        cancellation_reason: Option<&str>,
    ) -> PortResult<()>;

    async fn delete_schedule(&self, schedule_id: ScheduleId) -> PortResult<()>;
}

/// Read-only access to the school's professors.
#[async_trait]
pub trait ProfessorDirectory: Send + Sync {
    async fn list_professors(&self) -> PortResult<Vec<Professor>>;
}
