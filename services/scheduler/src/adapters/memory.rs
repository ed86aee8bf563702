//! services/scheduler/src/adapters/memory.rs
//!
//! This module contains the in-memory adapter, a concrete implementation of the
//! `ScheduleStore` and `ProfessorDirectory` ports from the core crate. It backs
//! the scheduler binary and can be preloaded from a JSON seed file.

use crate::error::AppError;
use crate::wire::SeedFile;
use async_trait::async_trait;
use chrono::Utc;
use scheduling_core::{
    PortError, PortResult, Professor, ProfessorDirectory, ProfessorId, ProfessorSchedule,
    ScheduleId, ScheduleStatus, ScheduleStore,
};
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Keeps professors and schedules in insertion order behind async locks.
#[derive(Default)]
pub struct InMemoryStore {
    professors: RwLock<Vec<Professor>>,
    schedules: RwLock<Vec<ProfessorSchedule>>,
}

impl InMemoryStore {
    pub fn new(professors: Vec<Professor>, schedules: Vec<ProfessorSchedule>) -> Self {
        Self {
            professors: RwLock::new(professors),
            schedules: RwLock::new(schedules),
        }
    }

    /// Builds a store from already-parsed seed data.
    pub fn from_seed(seed: SeedFile) -> Result<Self, AppError> {
        let professors = seed.professors.into_iter().map(Professor::from).collect();
        let schedules = seed
            .schedules
            .into_iter()
            .map(|dto| dto.into_domain())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(professors, schedules))
    }

    /// Reads and parses a JSON seed file.
    pub async fn from_seed_file(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path).await?;
        let seed: SeedFile = serde_json::from_str(&raw)?;
        info!(
            "Seed file {} holds {} professors and {} schedules",
            path.display(),
            seed.professors.len(),
            seed.schedules.len()
        );
        Self::from_seed(seed)
    }
}

fn not_found(schedule_id: ScheduleId) -> PortError {
    PortError::NotFound(format!("Schedule {} not found", schedule_id))
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl ProfessorDirectory for InMemoryStore {
    async fn list_professors(&self) -> PortResult<Vec<Professor>> {
        Ok(self.professors.read().await.clone())
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn list_schedules(&self) -> PortResult<Vec<ProfessorSchedule>> {
        Ok(self.schedules.read().await.clone())
    }

    async fn list_schedules_by_professor(
        &self,
        professor_id: &ProfessorId,
    ) -> PortResult<Vec<ProfessorSchedule>> {
        let schedules = self.schedules.read().await;
        Ok(schedules
            .iter()
            .filter(|s| &s.professor_id == professor_id)
            .cloned()
            .collect())
    }

    async fn create_schedule(&self, schedule: &ProfessorSchedule) -> PortResult<()> {
        let mut schedules = self.schedules.write().await;
        if schedules.iter().any(|s| s.id == schedule.id) {
            return Err(PortError::Unexpected(format!(
                "Schedule {} already exists",
                schedule.id
            )));
        }
        schedules.push(schedule.clone());
        Ok(())
    }

    async fn update_schedule(&self, schedule: &ProfessorSchedule) -> PortResult<()> {
        let mut schedules = self.schedules.write().await;
        let record = schedules
            .iter_mut()
            .find(|s| s.id == schedule.id)
            .ok_or_else(|| not_found(schedule.id))?;
        *record = schedule.clone();
        Ok(())
    }

    async fn patch_schedule_status(
        &self,
        schedule_id: ScheduleId,
        status: ScheduleStatus,
        cancellation_reason: Option<&str>,
    ) -> PortResult<()> {
        let mut schedules = self.schedules.write().await;
        let record = schedules
            .iter_mut()
            .find(|s| s.id == schedule_id)
            .ok_or_else(|| not_found(schedule_id))?;
        record.status = status;
        record.cancellation_reason = cancellation_reason.map(str::to_string);
        record.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_schedule(&self, schedule_id: ScheduleId) -> PortResult<()> {
        let mut schedules = self.schedules.write().await;
        let before = schedules.len();
        schedules.retain(|s| s.id != schedule_id);
        if schedules.len() == before {
            return Err(not_found(schedule_id));
        }
        Ok(())
    }
}
