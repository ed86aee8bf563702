//! services/scheduler/src/report.rs
//!
//! Assembles the availability report from the live schedule service.

use crate::error::AppError;
use crate::wire::{AvailabilityReport, ProfessorDto, ScheduleSummaryDto, SlotDto};
use scheduling_core::{valid_days, ScheduleService};

pub async fn availability_report(service: &ScheduleService) -> Result<AvailabilityReport, AppError> {
    let builder = service.builder().await;
    let slots = builder
        .catalog()
        .slots()
        .iter()
        .map(|slot| SlotDto {
            value: slot.to_string(),
            label: slot.to_12h(),
        })
        .collect();

    let schedules = service
        .schedules()
        .await
        .iter()
        .map(ScheduleSummaryDto::from)
        .collect();
    let available_professors = service
        .available_professors(None)
        .await?
        .iter()
        .map(ProfessorDto::from)
        .collect();

    Ok(AvailabilityReport {
        days: valid_days().iter().map(ToString::to_string).collect(),
        slots,
        schedules,
        available_professors,
    })
}
