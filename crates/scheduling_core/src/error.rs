//! crates/scheduling_core/src/error.rs
//!
//! Error types returned by the scheduling core. Expected outcomes (bad input,
//! conflicts, stale ids) are always values, never panics.

use crate::domain::{ProfessorId, ScheduleId, TimeSlot};
use crate::ports::PortError;
use std::fmt;

//=========================================================================================
// Validation
//=========================================================================================

/// The form field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Day,
    StartTime,
    EndTime,
    /// The cancellation reason.
    Motivo,
    ProfessorId,
    Entries,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Day => "day",
            Field::StartTime => "startTime",
            Field::EndTime => "endTime",
            Field::Motivo => "motivo",
            Field::ProfessorId => "professorId",
            Field::Entries => "entries",
        };
        f.write_str(name)
    }
}

fn entry_prefix(entry: &Option<usize>) -> String {
    entry
        .map(|index| format!("entry {}: ", index.saturating_add(1)))
        .unwrap_or_default()
}

/// A single, field-tagged validation failure with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}{field}: {message}", entry_prefix(.entry))]
pub struct ValidationError {
    pub field: Field,
    pub message: String,
    /// Zero-based position of the offending day entry, when there is one.
    pub entry: Option<usize>,
}

impl ValidationError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
            entry: None,
        }
    }

    pub fn at_entry(mut self, index: usize) -> Self {
        self.entry = Some(index);
        self
    }
}

/// Every failure found by a full-form validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    pub fn has_field(&self, field: Field) -> bool {
        self.0.iter().any(|error| error.field == field)
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

//=========================================================================================
// Assignment Errors
//=========================================================================================

/// The error type for every write operation on professor schedules.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Invalid schedule: {0}")]
    Validation(ValidationErrors),

    /// The professor already owns an active schedule.
    #[error("Professor {professor_id} already has an active schedule ({existing})")]
    Conflict {
        professor_id: ProfessorId,
        existing: ScheduleId,
    },

    #[error("Schedule {0} not found")]
    NotFound(ScheduleId),

    /// The external store rejected or did not answer a write.
    #[error("Schedule store error: {0}")]
    External(#[from] PortError),
}

impl From<ValidationError> for ScheduleError {
    fn from(error: ValidationError) -> Self {
        ScheduleError::Validation(error.into())
    }
}

impl From<ValidationErrors> for ScheduleError {
    fn from(errors: ValidationErrors) -> Self {
        ScheduleError::Validation(errors)
    }
}

/// A convenience type alias for `Result<T, ScheduleError>`.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

//=========================================================================================
// Catalog Configuration
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Working window is empty: {start} is not before {end}")]
    EmptyWindow { start: TimeSlot, end: TimeSlot },
    #[error("Slot step must be at least one minute")]
    ZeroStep,
}
