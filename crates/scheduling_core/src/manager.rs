//! crates/scheduling_core/src/manager.rs
//!
//! The assignment manager owns the in-memory collection of professor schedules
//! for a session. It derives which professors are still available and applies
//! every lifecycle transition, validating fully before it mutates anything.

use crate::builder::{is_blank, ScheduleBuilder};
use crate::domain::{
    DaySchedule, Professor, ProfessorId, ProfessorSchedule, ScheduleId, ScheduleStatus,
};
use crate::error::{Field, ScheduleError, ScheduleResult, ValidationError, ValidationErrors};
use chrono::Utc;
use std::collections::HashSet;
use tracing::warn;
use uuid::Uuid;

/// Reason recorded when a schedule is cancelled through the quick toggle without
/// one being supplied.
pub const DEFAULT_TOGGLE_REASON: &str = "Cancelled from the schedule list";

#[derive(Debug, Clone)]
pub struct AssignmentManager {
    builder: ScheduleBuilder,
    schedules: Vec<ProfessorSchedule>,
}

impl AssignmentManager {
    pub fn new(builder: ScheduleBuilder) -> Self {
        Self {
            builder,
            schedules: Vec::new(),
        }
    }

    /// Replaces the collection with records loaded from the store.
    pub fn hydrate(&mut self, schedules: Vec<ProfessorSchedule>) {
        let mut active = HashSet::new();
        for schedule in schedules.iter().filter(|s| s.is_active()) {
            if !active.insert(&schedule.professor_id) {
                warn!(
                    professor_id = %schedule.professor_id,
                    "store holds more than one active schedule for the same professor"
                );
            }
        }
        self.schedules = schedules;
    }

    pub fn builder(&self) -> &ScheduleBuilder {
        &self.builder
    }

    pub fn schedules(&self) -> &[ProfessorSchedule] {
        &self.schedules
    }

    pub fn get(&self, schedule_id: ScheduleId) -> Option<&ProfessorSchedule> {
        self.schedules.iter().find(|s| s.id == schedule_id)
    }

    pub fn schedules_for(&self, professor_id: &ProfessorId) -> Vec<&ProfessorSchedule> {
        self.schedules
            .iter()
            .filter(|s| &s.professor_id == professor_id)
            .collect()
    }

    pub fn active_schedule_for(&self, professor_id: &ProfessorId) -> Option<&ProfessorSchedule> {
        self.schedules
            .iter()
            .find(|s| s.is_active() && &s.professor_id == professor_id)
    }

    /// Professors that can be offered for a new schedule: those without an
    /// active one, plus the professor currently being edited.
    pub fn list_available_professors(
        &self,
        all_professors: &[Professor],
        editing: Option<&ProfessorId>,
    ) -> Vec<Professor> {
        let busy: HashSet<&ProfessorId> = self
            .schedules
            .iter()
            .filter(|s| s.is_active())
            .map(|s| &s.professor_id)
            .collect();

        all_professors
            .iter()
            .filter(|p| !busy.contains(&p.id) || editing == Some(&p.id))
            .cloned()
            .collect()
    }

    /// Assigns a new, active weekly schedule to a professor.
    pub fn create(
        &mut self,
        professor_id: ProfessorId,
        entries: Vec<DaySchedule>,
    ) -> ScheduleResult<ProfessorSchedule> {
        let mut errors = Vec::new();
        if professor_id.is_blank() {
            errors.push(ValidationError::new(
                Field::ProfessorId,
                "a professor must be selected",
            ));
        }
        errors.extend(self.builder.validate_all(&entries));
        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors).into());
        }

        self.ensure_no_active_schedule(&professor_id, None)?;

        let now = Utc::now();
        let schedule = ProfessorSchedule {
            id: Uuid::new_v4(),
            professor_id,
            entries,
            status: ScheduleStatus::Active,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        };
        self.schedules.push(schedule.clone());
        Ok(schedule)
    }

    /// Rewrites the entries and status of an existing schedule. The professor
    /// cannot be changed.
    pub fn update(
        &mut self,
        schedule_id: ScheduleId,
        entries: Vec<DaySchedule>,
        status: ScheduleStatus,
        reason: Option<String>,
    ) -> ScheduleResult<ProfessorSchedule> {
        let index = self.position(schedule_id)?;

        let errors = self
            .builder
            .validate_submission(&entries, status, reason.as_deref());
        if !errors.is_empty() {
            return Err(ValidationErrors::new(errors).into());
        }
        if status == ScheduleStatus::Active {
            let professor_id = self.schedules[index].professor_id.clone();
            self.ensure_no_active_schedule(&professor_id, Some(schedule_id))?;
        }

        let schedule = &mut self.schedules[index];
        schedule.entries = entries;
        schedule.status = status;
        schedule.cancellation_reason = match status {
            ScheduleStatus::Active => None,
            ScheduleStatus::Cancelled => reason.map(|r| r.trim().to_string()),
        };
        schedule.updated_at = Utc::now();
        Ok(schedule.clone())
    }

    /// Flips a schedule between active and cancelled.
    ///
    /// A cancelled schedule always carries a reason: a blank or missing one is
    /// replaced by [`DEFAULT_TOGGLE_REASON`].
    pub fn toggle_status(
        &mut self,
        schedule_id: ScheduleId,
        reason: Option<String>,
    ) -> ScheduleResult<ProfessorSchedule> {
        let index = self.position(schedule_id)?;

        let (status, cancellation_reason) = match self.schedules[index].status {
            ScheduleStatus::Active => {
                let reason = if is_blank(reason.as_deref()) {
                    DEFAULT_TOGGLE_REASON.to_string()
                } else {
                    reason.unwrap_or_default().trim().to_string()
                };
                (ScheduleStatus::Cancelled, Some(reason))
            }
            ScheduleStatus::Cancelled => {
                let professor_id = self.schedules[index].professor_id.clone();
                self.ensure_no_active_schedule(&professor_id, Some(schedule_id))?;
                (ScheduleStatus::Active, None)
            }
        };

        let schedule = &mut self.schedules[index];
        schedule.status = status;
        schedule.cancellation_reason = cancellation_reason;
        schedule.updated_at = Utc::now();
        Ok(schedule.clone())
    }

    /// Deletes a schedule and hands back the removed record.
    pub fn remove(&mut self, schedule_id: ScheduleId) -> ScheduleResult<ProfessorSchedule> {
        let index = self.position(schedule_id)?;
        Ok(self.schedules.remove(index))
    }

    fn position(&self, schedule_id: ScheduleId) -> ScheduleResult<usize> {
        self.schedules
            .iter()
            .position(|s| s.id == schedule_id)
            .ok_or(ScheduleError::NotFound(schedule_id))
    }

    fn ensure_no_active_schedule(
        &self,
        professor_id: &ProfessorId,
        except: Option<ScheduleId>,
    ) -> ScheduleResult<()> {
        match self
            .schedules
            .iter()
            .find(|s| s.is_active() && &s.professor_id == professor_id && Some(s.id) != except)
        {
            Some(existing) => Err(ScheduleError::Conflict {
                professor_id: professor_id.clone(),
                existing: existing.id,
            }),
            None => Ok(()),
        }
    }
}
