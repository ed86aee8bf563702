//! crates/scheduling_core/src/service.rs
//!
//! The schedule service is the write boundary in front of the assignment manager.
//!
//! Every transition runs under one async mutex: the manager computes the next
//! state, the store is asked to persist it, and if the store fails or does not
//! answer in time the manager is restored to the snapshot taken before the
//! attempt. Callers never observe a local change the store did not accept.

use crate::builder::ScheduleBuilder;
use crate::domain::{
    DaySchedule, Professor, ProfessorId, ProfessorSchedule, ScheduleId, ScheduleStatus,
};
use crate::error::ScheduleResult;
use crate::manager::AssignmentManager;
use crate::ports::{PortError, PortResult, ProfessorDirectory, ScheduleStore};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct ScheduleService {
    manager: Mutex<AssignmentManager>,
    store: Arc<dyn ScheduleStore>,
    directory: Arc<dyn ProfessorDirectory>,
    store_timeout: Duration,
}

impl ScheduleService {
    pub fn new(
        builder: ScheduleBuilder,
        store: Arc<dyn ScheduleStore>,
        directory: Arc<dyn ProfessorDirectory>,
    ) -> Self {
        Self {
            manager: Mutex::new(AssignmentManager::new(builder)),
            store,
            directory,
            store_timeout: DEFAULT_STORE_TIMEOUT,
        }
    }

    /// Sets how long a single store call may take before it counts as failed.
    pub fn with_store_timeout(mut self, store_timeout: Duration) -> Self {
        self.store_timeout = store_timeout;
        self
    }

    /// Replaces the in-memory collection with the store's records.
    pub async fn load(&self) -> ScheduleResult<usize> {
        let mut manager = self.manager.lock().await;
        let schedules = self.call_store(self.store.list_schedules()).await?;
        let count = schedules.len();
        manager.hydrate(schedules);
        info!("Loaded {} professor schedules from the store", count);
        Ok(count)
    }

    /// A copy of the builder the manager validates with, for form-side checks.
    pub async fn builder(&self) -> ScheduleBuilder {
        self.manager.lock().await.builder().clone()
    }

    pub async fn schedules(&self) -> Vec<ProfessorSchedule> {
        self.manager.lock().await.schedules().to_vec()
    }

    pub async fn get(&self, schedule_id: ScheduleId) -> Option<ProfessorSchedule> {
        self.manager.lock().await.get(schedule_id).cloned()
    }

    /// Every schedule the store holds for one professor, active or not.
    pub async fn schedules_for(
        &self,
        professor_id: &ProfessorId,
    ) -> ScheduleResult<Vec<ProfessorSchedule>> {
        Ok(self
            .call_store(self.store.list_schedules_by_professor(professor_id))
            .await?)
    }

    /// Professors that may receive a new schedule. See
    /// [`AssignmentManager::list_available_professors`].
    pub async fn available_professors(
        &self,
        editing: Option<&ProfessorId>,
    ) -> ScheduleResult<Vec<Professor>> {
        let professors = self.call_store(self.directory.list_professors()).await?;
        let manager = self.manager.lock().await;
        Ok(manager.list_available_professors(&professors, editing))
    }

    pub async fn create(
        &self,
        professor_id: ProfessorId,
        entries: Vec<DaySchedule>,
    ) -> ScheduleResult<ProfessorSchedule> {
        let mut manager = self.manager.lock().await;
        let snapshot = manager.clone();

        let schedule = manager.create(professor_id, entries).map_err(|e| {
            warn!("Rejected new schedule: {}", e);
            e
        })?;
        if let Err(e) = self.call_store(self.store.create_schedule(&schedule)).await {
            *manager = snapshot;
            warn!("Store refused schedule {}, reverted: {}", schedule.id, e);
            return Err(e.into());
        }

        info!(
            "Created schedule {} for professor {}",
            schedule.id, schedule.professor_id
        );
        Ok(schedule)
    }

    pub async fn update(
        &self,
        schedule_id: ScheduleId,
        entries: Vec<DaySchedule>,
        status: ScheduleStatus,
        reason: Option<String>,
    ) -> ScheduleResult<ProfessorSchedule> {
        let mut manager = self.manager.lock().await;
        let snapshot = manager.clone();

        let schedule = manager
            .update(schedule_id, entries, status, reason)
            .map_err(|e| {
                warn!("Rejected update of schedule {}: {}", schedule_id, e);
                e
            })?;
        if let Err(e) = self.call_store(self.store.update_schedule(&schedule)).await {
            *manager = snapshot;
            warn!("Store refused update of {}, reverted: {}", schedule_id, e);
            return Err(e.into());
        }

        info!("Updated schedule {} ({:?})", schedule.id, schedule.status);
        Ok(schedule)
    }

    pub async fn toggle_status(
        &self,
        schedule_id: ScheduleId,
        reason: Option<String>,
    ) -> ScheduleResult<ProfessorSchedule> {
        let mut manager = self.manager.lock().await;
        let snapshot = manager.clone();

        let schedule = manager.toggle_status(schedule_id, reason).map_err(|e| {
            warn!("Rejected status change of schedule {}: {}", schedule_id, e);
            e
        })?;
        let patch = self.store.patch_schedule_status(
            schedule.id,
            schedule.status,
            schedule.cancellation_reason.as_deref(),
        );
        if let Err(e) = self.call_store(patch).await {
            *manager = snapshot;
            warn!("Store refused status of {}, reverted: {}", schedule_id, e);
            return Err(e.into());
        }

        info!("Schedule {} is now {:?}", schedule.id, schedule.status);
        Ok(schedule)
    }

    pub async fn remove(&self, schedule_id: ScheduleId) -> ScheduleResult<ProfessorSchedule> {
        let mut manager = self.manager.lock().await;
        let snapshot = manager.clone();

        let removed = manager.remove(schedule_id).map_err(|e| {
            warn!("Rejected removal of schedule {}: {}", schedule_id, e);
            e
        })?;
        if let Err(e) = self.call_store(self.store.delete_schedule(schedule_id)).await {
            *manager = snapshot;
            warn!("Store refused deletion of {}, reverted: {}", schedule_id, e);
            return Err(e.into());
        }

        info!("Removed schedule {}", schedule_id);
        Ok(removed)
    }

    async fn call_store<T>(&self, call: impl Future<Output = PortResult<T>>) -> PortResult<T> {
        match tokio::time::timeout(self.store_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(PortError::Timeout(
                u64::try_from(self.store_timeout.as_millis()).unwrap_or(u64::MAX),
            )),
        }
    }
}
