pub mod builder;
pub mod catalog;
pub mod domain;
pub mod error;
pub mod manager;
pub mod ports;
pub mod service;

pub use builder::{parse_entry, remove_entry, DaySelection, EntryEdit, ScheduleBuilder};
pub use catalog::{is_valid_slot, valid_days, valid_time_slots, ScheduleRules, SlotCatalog};
pub use domain::{
    DayCode, DaySchedule, Professor, ProfessorId, ProfessorSchedule, ScheduleId, ScheduleStatus,
    TimeSlot,
};
pub use error::{
    CatalogError, Field, ScheduleError, ScheduleResult, ValidationError, ValidationErrors,
};
pub use manager::{AssignmentManager, DEFAULT_TOGGLE_REASON};
pub use ports::{PortError, PortResult, ProfessorDirectory, ScheduleStore};
pub use service::ScheduleService;
