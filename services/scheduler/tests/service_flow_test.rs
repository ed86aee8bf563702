use scheduler_lib::{
    adapters::InMemoryStore,
    report::availability_report,
    wire::{parse_entries, DayScheduleDto, SeedFile},
};
use scheduling_core::{
    ProfessorId, ScheduleBuilder, ScheduleError, ScheduleRules, ScheduleService, ScheduleStatus,
    ScheduleStore,
};
use std::sync::Arc;

const SEED: &str = include_str!("../seeds/school.json");

async fn seeded_service() -> (Arc<InMemoryStore>, ScheduleService) {
    let seed: SeedFile = serde_json::from_str(SEED).unwrap();
    let store = Arc::new(InMemoryStore::from_seed(seed).unwrap());
    let builder = ScheduleBuilder::new(ScheduleRules::standard()).unwrap();
    let service = ScheduleService::new(builder, store.clone(), store.clone());
    service.load().await.unwrap();
    (store, service)
}

fn form(entries: &[(&str, &str, &str)]) -> Vec<DayScheduleDto> {
    entries
        .iter()
        .map(|(day, start, end)| DayScheduleDto {
            day: day.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        })
        .collect()
}

#[tokio::test]
async fn report_lists_catalog_schedules_and_free_professors() {
    let (_, service) = seeded_service().await;
    let report = availability_report(&service).await.unwrap();

    assert_eq!(report.days, ["L", "M", "X", "J", "V", "S", "D"]);
    assert_eq!(report.slots.len(), 17);
    assert_eq!(report.slots[0].label, "08:00 AM");
    assert_eq!(report.schedules.len(), 2);
    assert_eq!(report.schedules[0].weekly_minutes, 540);

    let free: Vec<&str> = report
        .available_professors
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(free, ["P2", "P3"]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["schedules"][0]["professorId"], "P1");
    assert_eq!(json["schedules"][0]["weeklyMinutes"], 540);
}

#[tokio::test]
async fn form_entries_flow_through_to_the_store() {
    let (store, service) = seeded_service().await;
    let entries = parse_entries(&form(&[("J", "10:15", "11:00"), ("S", "08:00", "09:30")])).unwrap();

    let created = service
        .create(ProfessorId::new("P3"), entries.clone())
        .await
        .unwrap();
    let stored = store
        .list_schedules_by_professor(&ProfessorId::new("P3"))
        .await
        .unwrap();
    assert_eq!(stored, vec![created.clone()]);

    let conflict = service.create(ProfessorId::new("P1"), entries).await;
    assert!(matches!(conflict, Err(ScheduleError::Conflict { .. })));

    let bad_window = parse_entries(&form(&[("L", "07:15", "09:30")])).unwrap();
    let rejected = service
        .update(created.id, bad_window, ScheduleStatus::Active, None)
        .await;
    assert!(matches!(rejected, Err(ScheduleError::Validation(_))));

    service.remove(created.id).await.unwrap();
    assert!(store
        .list_schedules_by_professor(&ProfessorId::new("P3"))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn cancelled_seed_schedule_can_be_reactivated() {
    let (store, service) = seeded_service().await;
    let p2 = ProfessorId::new("P2");
    let cancelled = service.schedules_for(&p2).await.unwrap().remove(0);
    assert_eq!(cancelled.status, ScheduleStatus::Cancelled);

    let active = service.toggle_status(cancelled.id, None).await.unwrap();
    assert!(active.is_active());
    assert_eq!(active.cancellation_reason, None);

    let stored = store.list_schedules_by_professor(&p2).await.unwrap();
    assert_eq!(stored[0].status, ScheduleStatus::Active);
    assert!(service
        .available_professors(None)
        .await
        .unwrap()
        .iter()
        .all(|p| p.id != p2));
}
