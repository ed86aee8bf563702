use scheduler_lib::wire::{
    parse_entries, DayScheduleDto, ProfessorScheduleDto, SeedFile, StatusDto,
};
use scheduling_core::{DayCode, Field, ProfessorSchedule, ScheduleStatus};

const SEED: &str = include_str!("../seeds/school.json");

fn entry(day: &str, start: &str, end: &str) -> DayScheduleDto {
    DayScheduleDto {
        day: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

#[test]
fn bundled_seed_parses_into_domain_schedules() {
    let seed: SeedFile = serde_json::from_str(SEED).unwrap();
    assert_eq!(seed.professors.len(), 3);

    let schedules: Vec<ProfessorSchedule> = seed
        .schedules
        .into_iter()
        .map(|dto| dto.into_domain().unwrap())
        .collect();

    assert_eq!(schedules[0].status, ScheduleStatus::Active);
    assert_eq!(schedules[0].entries[1].day, DayCode::Wednesday);
    assert_eq!(schedules[0].weekly_minutes(), 3 * 180);
    assert_eq!(schedules[1].status, ScheduleStatus::Cancelled);
    assert_eq!(
        schedules[1].cancellation_reason.as_deref(),
        Some("Licencia hasta fin de trimestre")
    );
}

#[test]
fn schedules_serialize_with_letters_and_spanish_status() {
    let raw = r#"{
        "id": "7d0c1f52-2b7e-4a43-9c5b-0f3a2d6e8b11",
        "professorId": "P9",
        "entries": [{ "day": "d", "startTime": "10:15", "endTime": "11:45" }],
        "status": "activo"
    }"#;
    let dto: ProfessorScheduleDto = serde_json::from_str(raw).unwrap();
    let schedule = dto.into_domain().unwrap();
    assert_eq!(schedule.entries[0].day, DayCode::Sunday);

    let json = serde_json::to_value(ProfessorScheduleDto::from(&schedule)).unwrap();
    assert_eq!(json["status"], "activo");
    assert_eq!(json["entries"][0]["day"], "D");
    assert_eq!(json["entries"][0]["startTime"], "10:15");
    assert!(json.get("reason").is_none());

    assert_eq!(
        serde_json::to_value(StatusDto::from(ScheduleStatus::Cancelled)).unwrap(),
        "cancelado"
    );
}

#[test]
fn cancelled_record_without_reason_is_rejected() {
    let raw = r#"{
        "id": "7d0c1f52-2b7e-4a43-9c5b-0f3a2d6e8b11",
        "professorId": "P9",
        "entries": [{ "day": "L", "startTime": "08:00", "endTime": "09:30" }],
        "status": "cancelado",
        "reason": "   "
    }"#;
    let dto: ProfessorScheduleDto = serde_json::from_str(raw).unwrap();
    let errors = dto.into_domain().unwrap_err();
    assert!(errors.has_field(Field::Motivo));
}

#[test]
fn unknown_status_is_a_json_error() {
    let raw = r#"{ "id": "7d0c1f52-2b7e-4a43-9c5b-0f3a2d6e8b11", "professorId": "P1",
                   "entries": [], "status": "pausado" }"#;
    assert!(serde_json::from_str::<ProfessorScheduleDto>(raw).is_err());
}

#[test]
fn entry_errors_carry_their_position() {
    let errors = parse_entries(&[
        entry("L", "08:00", "09:30"),
        entry("", "08:00", "9.30"),
    ])
    .unwrap_err();

    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| e.entry == Some(1)));
    assert!(errors.has_field(Field::Day));
    assert!(errors.has_field(Field::EndTime));
    assert!(errors.to_string().starts_with("entry 2: day: a day is required"));
}

#[test]
fn stored_record_with_repeated_day_or_inverted_range_is_rejected() {
    let dto = ProfessorScheduleDto {
        id: uuid::Uuid::new_v4(),
        professor_id: "P1".to_string(),
        entries: vec![entry("L", "10:00", "09:00"), entry("L", "08:00", "09:30")],
        status: StatusDto::Activo,
        reason: None,
        created_at: None,
        updated_at: None,
    };
    let errors = dto.into_domain().unwrap_err();

    assert_eq!(errors.len(), 2);
    let tagged: Vec<(Field, Option<usize>)> = errors.iter().map(|e| (e.field, e.entry)).collect();
    assert!(tagged.contains(&(Field::EndTime, Some(0))));
    assert!(tagged.contains(&(Field::Day, Some(1))));
}

#[test]
fn stored_record_with_equal_start_and_end_is_rejected() {
    let dto = ProfessorScheduleDto {
        id: uuid::Uuid::new_v4(),
        professor_id: "P1".to_string(),
        entries: vec![entry("X", "08:00", "09:30"), entry("V", "11:00", "11:00")],
        status: StatusDto::Activo,
        reason: None,
        created_at: None,
        updated_at: None,
    };
    let errors = dto.into_domain().unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors.to_string().starts_with("entry 2: endTime:"));
}
