//! crates/scheduling_core/src/builder.rs
//!
//! The schedule builder turns a day selection and a default time range into
//! per-day entries, and validates the entries of one professor schedule before
//! they are handed to the assignment manager.
//!
//! Every function here is pure: no I/O, and every failure is a field-tagged
//! [`ValidationError`] the caller can show verbatim.

use crate::catalog::{ScheduleRules, SlotCatalog};
use crate::domain::{DayCode, DaySchedule, ScheduleStatus, TimeSlot};
use crate::error::{CatalogError, Field, ValidationError, ValidationErrors};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

//=========================================================================================
// Pending Day Selection
//=========================================================================================

/// The set of days ticked in the form but not yet turned into entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaySelection {
    days: BTreeSet<DayCode>,
}

impl DaySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips one day in or out of the selection. Returns whether it is now selected.
    pub fn toggle(&mut self, day: DayCode) -> bool {
        if self.days.remove(&day) {
            false
        } else {
            self.days.insert(day);
            true
        }
    }

    /// Toggles every given day.
    pub fn select_days(&mut self, days: impl IntoIterator<Item = DayCode>) {
        for day in days {
            self.toggle(day);
        }
    }

    pub fn contains(&self, day: DayCode) -> bool {
        self.days.contains(&day)
    }

    pub fn days(&self) -> &BTreeSet<DayCode> {
        &self.days
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }
}

/// A single-field change to one day entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEdit {
    Day(DayCode),
    StartTime(TimeSlot),
    EndTime(TimeSlot),
}

//=========================================================================================
// The Builder
//=========================================================================================

/// Builds and validates the day entries of a professor schedule.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    rules: ScheduleRules,
    catalog: SlotCatalog,
}

impl ScheduleBuilder {
    pub fn new(rules: ScheduleRules) -> Result<Self, CatalogError> {
        let catalog = SlotCatalog::new(&rules)?;
        Ok(Self { rules, catalog })
    }

    pub fn rules(&self) -> &ScheduleRules {
        &self.rules
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// Produces one entry per selected day with the default range, appended after
    /// `existing`. Days already present in `existing` are rejected: they must be
    /// edited or removed one by one.
    pub fn apply_default_range(
        &self,
        selected: &BTreeSet<DayCode>,
        default_start: TimeSlot,
        default_end: TimeSlot,
        existing: &[DaySchedule],
    ) -> Result<Vec<DaySchedule>, ValidationError> {
        if selected.is_empty() {
            return Err(ValidationError::new(Field::Day, "select at least one day"));
        }
        if let Some(error) = self.range_errors(default_start, default_end).into_iter().next() {
            return Err(error);
        }

        let taken: Vec<String> = selected
            .iter()
            .filter(|day| existing.iter().any(|entry| entry.day == **day))
            .map(ToString::to_string)
            .collect();
        if !taken.is_empty() {
            return Err(ValidationError::new(
                Field::Day,
                format!("this day is already configured ({})", taken.join(", ")),
            ));
        }

        let mut entries = existing.to_vec();
        entries.extend(
            selected
                .iter()
                .map(|day| DaySchedule::new(*day, default_start, default_end)),
        );
        Ok(entries)
    }

    /// Same as [`ScheduleBuilder::apply_default_range`] for a pending selection,
    /// which is cleared only when the entries were produced.
    pub fn apply_selection(
        &self,
        selection: &mut DaySelection,
        default_start: TimeSlot,
        default_end: TimeSlot,
        existing: &[DaySchedule],
    ) -> Result<Vec<DaySchedule>, ValidationError> {
        let entries =
            self.apply_default_range(selection.days(), default_start, default_end, existing)?;
        selection.clear();
        Ok(entries)
    }

    /// Replaces one field of the entry at `index` and re-validates that entry
    /// against the catalog and against the other entries' days.
    pub fn edit_entry(
        &self,
        entries: &[DaySchedule],
        index: usize,
        edit: EntryEdit,
    ) -> Result<Vec<DaySchedule>, ValidationError> {
        let Some(current) = entries.get(index) else {
            return Err(ValidationError::new(
                Field::Entries,
                format!("there is no day entry at position {}", index.saturating_add(1)),
            ));
        };

        let mut updated = *current;
        match edit {
            EntryEdit::Day(day) => updated.day = day,
            EntryEdit::StartTime(time) => updated.start_time = time,
            EntryEdit::EndTime(time) => updated.end_time = time,
        }

        if let Some(error) = self
            .range_errors(updated.start_time, updated.end_time)
            .into_iter()
            .next()
        {
            return Err(error.at_entry(index));
        }
        let duplicated = entries
            .iter()
            .enumerate()
            .any(|(other, entry)| other != index && entry.day == updated.day);
        if duplicated {
            return Err(
                ValidationError::new(Field::Day, "this day is already configured").at_entry(index),
            );
        }

        let mut entries = entries.to_vec();
        entries[index] = updated;
        Ok(entries)
    }

    /// Full-form validation run before a schedule is submitted.
    pub fn validate_all(&self, entries: &[DaySchedule]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if entries.is_empty() {
            errors.push(ValidationError::new(
                Field::Entries,
                "at least one day must be configured",
            ));
        }

        let mut seen = HashSet::new();
        for (index, entry) in entries.iter().enumerate() {
            if !seen.insert(entry.day) {
                errors.push(
                    ValidationError::new(Field::Day, "this day is already configured")
                        .at_entry(index),
                );
            }
            errors.extend(
                self.range_errors(entry.start_time, entry.end_time)
                    .into_iter()
                    .map(|error| error.at_entry(index)),
            );
        }
        errors
    }

    /// [`ScheduleBuilder::validate_all`] plus the rule that a cancelled schedule
    /// carries a reason.
    pub fn validate_submission(
        &self,
        entries: &[DaySchedule],
        status: ScheduleStatus,
        reason: Option<&str>,
    ) -> Vec<ValidationError> {
        let mut errors = self.validate_all(entries);
        if status == ScheduleStatus::Cancelled && is_blank(reason) {
            errors.push(ValidationError::new(
                Field::Motivo,
                "a cancellation reason is required",
            ));
        }
        errors
    }

    fn range_errors(&self, start: TimeSlot, end: TimeSlot) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if let Err(error) = self.check_time(Field::StartTime, start) {
            errors.push(error);
        }
        if let Err(error) = self.check_time(Field::EndTime, end) {
            errors.push(error);
        }
        if start.minutes() >= end.minutes() {
            errors.push(ValidationError::new(
                Field::EndTime,
                "end time must be after start time",
            ));
        }
        errors
    }

    fn check_time(&self, field: Field, time: TimeSlot) -> Result<(), ValidationError> {
        if !self.rules.contains(time) {
            return Err(ValidationError::new(
                field,
                format!(
                    "{} is outside working hours ({} - {})",
                    time, self.rules.window_start, self.rules.window_end
                ),
            ));
        }
        if self.rules.enforce_catalog_membership && !self.catalog.contains(time) {
            return Err(ValidationError::new(
                field,
                format!("{} is not an available time slot", time),
            ));
        }
        Ok(())
    }
}

/// Drops the entry at `index`. An index past the end leaves the entries unchanged.
pub fn remove_entry(entries: &[DaySchedule], index: usize) -> Vec<DaySchedule> {
    let mut entries = entries.to_vec();
    if index < entries.len() {
        entries.remove(index);
    } else {
        debug!(index, len = entries.len(), "remove_entry: nothing at index");
    }
    entries
}

/// Parses one day entry from its raw form values, reporting blank and malformed
/// fields separately.
pub fn parse_entry(day: &str, start_time: &str, end_time: &str) -> Result<DaySchedule, ValidationErrors> {
    let mut errors = Vec::new();

    let day = if day.trim().is_empty() {
        errors.push(ValidationError::new(Field::Day, "a day is required"));
        None
    } else {
        let parsed = DayCode::from_letter(day);
        if parsed.is_none() {
            errors.push(ValidationError::new(
                Field::Day,
                format!("'{}' is not a valid day (expected one of L,M,X,J,V,S,D)", day.trim()),
            ));
        }
        parsed
    };
    let start = parse_time(Field::StartTime, "start time", start_time, &mut errors);
    let end = parse_time(Field::EndTime, "end time", end_time, &mut errors);

    match (day, start, end) {
        (Some(day), Some(start), Some(end)) if errors.is_empty() => {
            Ok(DaySchedule::new(day, start, end))
        }
        _ => Err(ValidationErrors::new(errors)),
    }
}

fn parse_time(
    field: Field,
    label: &str,
    value: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<TimeSlot> {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(field, format!("a {} is required", label)));
        return None;
    }
    let parsed = TimeSlot::parse_24h(value);
    if parsed.is_none() {
        errors.push(ValidationError::new(
            field,
            format!("'{}' is not a valid HH:MM time", value.trim()),
        ));
    }
    parsed
}

pub(crate) fn is_blank(reason: Option<&str>) -> bool {
    reason.map_or(true, |reason| reason.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use DayCode::{Monday, Tuesday, Wednesday};

    fn t(value: &str) -> TimeSlot {
        TimeSlot::parse_24h(value).expect("valid HH:MM")
    }

    fn builder() -> ScheduleBuilder {
        ScheduleBuilder::new(ScheduleRules::standard()).unwrap()
    }

    fn days(days: &[DayCode]) -> BTreeSet<DayCode> {
        days.iter().copied().collect()
    }

    #[test]
    fn bulk_apply_creates_one_entry_per_selected_day() {
        let entries = builder()
            .apply_default_range(&days(&[Wednesday, Monday]), t("08:00"), t("09:30"), &[])
            .unwrap();

        assert_eq!(
            entries,
            vec![
                DaySchedule::new(Monday, t("08:00"), t("09:30")),
                DaySchedule::new(Wednesday, t("08:00"), t("09:30")),
            ]
        );
    }

    #[test]
    fn bulk_apply_rejects_end_before_start() {
        let error = builder()
            .apply_default_range(&days(&[Monday]), t("09:30"), t("08:00"), &[])
            .unwrap_err();

        assert_eq!(error.field, Field::EndTime);
        assert_eq!(error.message, "end time must be after start time");
    }

    #[test]
    fn bulk_apply_rejects_day_already_configured() {
        let existing = [DaySchedule::new(Monday, t("08:00"), t("09:30"))];
        let error = builder()
            .apply_default_range(&days(&[Monday]), t("10:15"), t("11:00"), &existing)
            .unwrap_err();

        assert_eq!(error.field, Field::Day);
        assert!(error.message.contains("already configured"));
        assert!(error.message.contains('L'));
    }

    #[test]
    fn bulk_apply_appends_to_existing_entries() {
        let existing = [DaySchedule::new(Monday, t("08:00"), t("09:30"))];
        let entries = builder()
            .apply_default_range(&days(&[Tuesday]), t("10:15"), t("11:00"), &existing)
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], existing[0]);
        assert_eq!(entries[1].day, Tuesday);
    }

    #[test]
    fn bulk_apply_rejects_times_outside_catalog_or_window() {
        let builder = builder();
        let off_step = builder
            .apply_default_range(&days(&[Monday]), t("08:10"), t("09:30"), &[])
            .unwrap_err();
        assert_eq!(off_step.field, Field::StartTime);

        let too_late = builder
            .apply_default_range(&days(&[Monday]), t("08:00"), t("20:45"), &[])
            .unwrap_err();
        assert_eq!(too_late.field, Field::EndTime);
        assert!(too_late.message.contains("outside working hours"));
    }

    #[test]
    fn relaxed_rules_accept_any_minute_inside_the_window() {
        let builder = ScheduleBuilder::new(ScheduleRules::relaxed()).unwrap();
        let entries = builder
            .apply_default_range(&days(&[Monday]), t("08:10"), t("09:05"), &[])
            .unwrap();
        assert_eq!(entries.len(), 1);

        let error = builder
            .apply_default_range(&days(&[Monday]), t("07:30"), t("09:05"), &[])
            .unwrap_err();
        assert_eq!(error.field, Field::StartTime);
    }

    #[test]
    fn selection_is_cleared_only_on_success() {
        let builder = builder();
        let mut selection = DaySelection::new();
        selection.select_days([Monday, Wednesday]);

        assert!(builder
            .apply_selection(&mut selection, t("09:30"), t("08:00"), &[])
            .is_err());
        assert!(selection.contains(Monday));

        let entries = builder
            .apply_selection(&mut selection, t("08:00"), t("09:30"), &[])
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(selection.is_empty());
    }

    #[test]
    fn toggling_a_day_twice_deselects_it() {
        let mut selection = DaySelection::new();
        assert!(selection.toggle(Tuesday));
        assert!(!selection.toggle(Tuesday));
        assert!(selection.is_empty());

        let error = builder()
            .apply_selection(&mut selection, t("08:00"), t("09:30"), &[])
            .unwrap_err();
        assert_eq!(error.field, Field::Day);
    }

    #[test]
    fn edit_entry_revalidates_the_changed_entry() {
        let builder = builder();
        let entries = vec![
            DaySchedule::new(Monday, t("08:00"), t("09:30")),
            DaySchedule::new(Tuesday, t("08:00"), t("09:30")),
        ];

        let edited = builder
            .edit_entry(&entries, 1, EntryEdit::EndTime(t("11:00")))
            .unwrap();
        assert_eq!(edited[1].end_time, t("11:00"));

        let inverted = builder
            .edit_entry(&entries, 0, EntryEdit::StartTime(t("10:15")))
            .unwrap_err();
        assert_eq!(inverted.field, Field::EndTime);
        assert_eq!(inverted.entry, Some(0));

        let duplicate = builder
            .edit_entry(&entries, 1, EntryEdit::Day(Monday))
            .unwrap_err();
        assert_eq!(duplicate.field, Field::Day);

        // an entry keeps its own day without tripping the uniqueness check
        assert!(builder.edit_entry(&entries, 0, EntryEdit::Day(Monday)).is_ok());

        let missing = builder
            .edit_entry(&entries, 5, EntryEdit::Day(Wednesday))
            .unwrap_err();
        assert_eq!(missing.field, Field::Entries);
    }

    #[test]
    fn edit_entry_far_past_the_end_is_an_error() {
        let entries = vec![DaySchedule::new(Monday, t("08:00"), t("09:30"))];

        let missing = builder()
            .edit_entry(&entries, usize::MAX, EntryEdit::Day(Tuesday))
            .unwrap_err();
        assert_eq!(missing.field, Field::Entries);
        assert!(missing.message.contains(&usize::MAX.to_string()));
        assert_eq!(remove_entry(&entries, usize::MAX), entries);
    }

    #[test]
    fn remove_entry_is_a_no_op_past_the_end() {
        let entries = vec![DaySchedule::new(Monday, t("08:00"), t("09:30"))];

        let removed = remove_entry(&entries, 0);
        assert!(removed.is_empty());
        assert!(remove_entry(&removed, 0).is_empty());
        assert_eq!(remove_entry(&entries, 3), entries);
    }

    #[test]
    fn validate_all_reports_every_problem_with_its_entry() {
        let entries = vec![
            DaySchedule::new(Monday, t("08:00"), t("09:30")),
            DaySchedule::new(Monday, t("10:15"), t("11:00")),
            DaySchedule::new(Wednesday, t("11:00"), t("11:00")),
        ];
        let errors = builder().validate_all(&entries);

        assert_eq!(errors.len(), 2);
        assert_eq!((errors[0].field, errors[0].entry), (Field::Day, Some(1)));
        assert_eq!((errors[1].field, errors[1].entry), (Field::EndTime, Some(2)));
        assert_eq!(errors[1].to_string(), "entry 3: endTime: end time must be after start time");
    }

    #[test]
    fn validate_all_requires_an_entry_and_accepts_the_window_edges() {
        assert_eq!(builder().validate_all(&[])[0].field, Field::Entries);

        let edges = [DaySchedule::new(Monday, t("08:00"), t("20:00"))];
        assert!(builder().validate_all(&edges).is_empty());
    }

    #[test]
    fn accepted_entries_always_start_before_they_end() {
        let builder = builder();
        let slots = builder.catalog().slots().to_vec();
        for start in &slots {
            for end in &slots {
                let entry = [DaySchedule::new(Monday, *start, *end)];
                if builder.validate_all(&entry).is_empty() {
                    assert!(start.minutes() < end.minutes());
                }
            }
        }
    }

    #[test]
    fn cancelled_submission_needs_a_reason() {
        let entries = [DaySchedule::new(Monday, t("08:00"), t("09:30"))];
        let builder = builder();

        let errors = builder.validate_submission(&entries, ScheduleStatus::Cancelled, Some("  "));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, Field::Motivo);

        assert!(builder
            .validate_submission(&entries, ScheduleStatus::Cancelled, Some("on leave"))
            .is_empty());
        assert!(builder
            .validate_submission(&entries, ScheduleStatus::Active, None)
            .is_empty());
    }

    #[test]
    fn parse_entry_tags_blank_and_malformed_fields() {
        assert_eq!(
            parse_entry("x", "08:00", "09:30").unwrap(),
            DaySchedule::new(Wednesday, t("08:00"), t("09:30"))
        );

        let errors = parse_entry("", "8am", "").unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.has_field(Field::Day));
        assert!(errors.has_field(Field::StartTime));
        assert!(errors.has_field(Field::EndTime));

        let errors = parse_entry("Q", "08:00", "09:30").unwrap_err();
        assert!(errors.iter().all(|e| e.field == Field::Day));
    }
}
