//! services/scheduler/src/wire.rs
//!
//! Defines the JSON shapes exchanged with the school's records: professors,
//! professor schedules with their per-day entries, and the seed file format.
//!
//! Days travel as single letters (`L,M,X,J,V,S,D`), times as `HH:MM` strings and
//! the status as `"activo"` / `"cancelado"`.

use chrono::{DateTime, Utc};
use scheduling_core::{
    parse_entry, DaySchedule, Field, Professor, ProfessorId, ProfessorSchedule, ScheduleStatus,
    ValidationError, ValidationErrors,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

//=========================================================================================
// Professors
//=========================================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub color: String,
}

impl From<ProfessorDto> for Professor {
    fn from(dto: ProfessorDto) -> Self {
        Professor {
            id: ProfessorId::new(dto.id),
            name: dto.name,
            specialties: dto.specialties,
            color: dto.color,
        }
    }
}

impl From<&Professor> for ProfessorDto {
    fn from(professor: &Professor) -> Self {
        ProfessorDto {
            id: professor.id.to_string(),
            name: professor.name.clone(),
            specialties: professor.specialties.clone(),
            color: professor.color.clone(),
        }
    }
}

//=========================================================================================
// Schedules
//=========================================================================================

/// One `horario por día` entry as sent by the form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DayScheduleDto {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl From<&DaySchedule> for DayScheduleDto {
    fn from(entry: &DaySchedule) -> Self {
        DayScheduleDto {
            day: entry.day.to_string(),
            start_time: entry.start_time.to_string(),
            end_time: entry.end_time.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDto {
    #[serde(rename = "activo")]
    Activo,
    #[serde(rename = "cancelado")]
    Cancelado,
}

impl From<StatusDto> for ScheduleStatus {
    fn from(status: StatusDto) -> Self {
        match status {
            StatusDto::Activo => ScheduleStatus::Active,
            StatusDto::Cancelado => ScheduleStatus::Cancelled,
        }
    }
}

impl From<ScheduleStatus> for StatusDto {
    fn from(status: ScheduleStatus) -> Self {
        match status {
            ScheduleStatus::Active => StatusDto::Activo,
            ScheduleStatus::Cancelled => StatusDto::Cancelado,
        }
    }
}

/// A stored `programación de profesor`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfessorScheduleDto {
    pub id: Uuid,
    pub professor_id: String,
    pub entries: Vec<DayScheduleDto>,
    pub status: StatusDto,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&ProfessorSchedule> for ProfessorScheduleDto {
    fn from(schedule: &ProfessorSchedule) -> Self {
        ProfessorScheduleDto {
            id: schedule.id,
            professor_id: schedule.professor_id.to_string(),
            entries: schedule.entries.iter().map(DayScheduleDto::from).collect(),
            status: schedule.status.into(),
            reason: schedule.cancellation_reason.clone(),
            created_at: Some(schedule.created_at),
            updated_at: Some(schedule.updated_at),
        }
    }
}

impl ProfessorScheduleDto {
    /// Converts a stored record into the domain type. The wire format, the shape
    /// of each entry (one per day, start before end) and the reason on cancelled
    /// records are checked; the catalog rules are not re-applied to records the
    /// store already holds.
    pub fn into_domain(self) -> Result<ProfessorSchedule, ValidationErrors> {
        let entries = parse_entries(&self.entries)?;
        let errors = shape_errors(&entries);
        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors));
        }
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        let cancellation_reason = match self.status {
            StatusDto::Activo => None,
            StatusDto::Cancelado => match self.reason.filter(|r| !r.trim().is_empty()) {
                Some(reason) => Some(reason),
                None => {
                    return Err(ValidationError::new(
                        Field::Motivo,
                        "a cancellation reason is required",
                    )
                    .into())
                }
            },
        };
        Ok(ProfessorSchedule {
            id: self.id,
            professor_id: ProfessorId::new(self.professor_id),
            entries,
            status: self.status.into(),
            cancellation_reason,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        })
    }
}

/// Parses every entry, tagging each failure with the entry's position.
pub fn parse_entries(entries: &[DayScheduleDto]) -> Result<Vec<DaySchedule>, ValidationErrors> {
    let mut parsed = Vec::with_capacity(entries.len());
    let mut errors: Vec<ValidationError> = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(&entry.day, &entry.start_time, &entry.end_time) {
            Ok(entry) => parsed.push(entry),
            Err(e) => errors.extend(e.into_vec().into_iter().map(|e| e.at_entry(index))),
        }
    }
    if errors.is_empty() {
        Ok(parsed)
    } else {
        Err(ValidationErrors::new(errors))
    }
}

fn shape_errors(entries: &[DaySchedule]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();
    for (index, entry) in entries.iter().enumerate() {
        if !seen.insert(entry.day) {
            errors.push(
                ValidationError::new(Field::Day, format!("{} appears more than once", entry.day))
                    .at_entry(index),
            );
        }
        if entry.start_time >= entry.end_time {
            errors.push(
                ValidationError::new(Field::EndTime, "end time must be after the start time")
                    .at_entry(index),
            );
        }
    }
    errors
}

//=========================================================================================
// Seed File and Report
//=========================================================================================

/// Contents of the JSON file used to preload the in-memory store.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SeedFile {
    #[serde(default)]
    pub professors: Vec<ProfessorDto>,
    #[serde(default)]
    pub schedules: Vec<ProfessorScheduleDto>,
}

/// A schedule row of the availability report.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummaryDto {
    #[serde(flatten)]
    pub schedule: ProfessorScheduleDto,
    pub weekly_minutes: u32,
}

impl From<&ProfessorSchedule> for ScheduleSummaryDto {
    fn from(schedule: &ProfessorSchedule) -> Self {
        let mut dto = ProfessorScheduleDto::from(schedule);
        dto.entries = schedule
            .entries_by_day()
            .iter()
            .map(DayScheduleDto::from)
            .collect();
        ScheduleSummaryDto {
            schedule: dto,
            weekly_minutes: schedule.weekly_minutes(),
        }
    }
}

/// A catalog slot with its 12-hour label.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SlotDto {
    pub value: String,
    pub label: String,
}

/// What the scheduler binary prints: the catalog in use, every schedule, and the
/// professors still free for a new assignment.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub days: Vec<String>,
    pub slots: Vec<SlotDto>,
    pub schedules: Vec<ScheduleSummaryDto>,
    pub available_professors: Vec<ProfessorDto>,
}
