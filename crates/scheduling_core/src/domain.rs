//! crates/scheduling_core/src/domain.rs
//!
//! Defines the pure, core data structures of the scheduling domain.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use std::fmt;
use uuid::Uuid;

/// Identifier of a stored professor schedule.
pub type ScheduleId = Uuid;

const MINUTES_PER_DAY: u32 = 24 * 60;

//=========================================================================================
// Days
//=========================================================================================

/// One day of the teaching week, Monday first.
///
/// The ordering of the variants is the display order of a weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayCode {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayCode {
    /// All seven days in weekly order.
    pub const ALL: [DayCode; 7] = [
        DayCode::Monday,
        DayCode::Tuesday,
        DayCode::Wednesday,
        DayCode::Thursday,
        DayCode::Friday,
        DayCode::Saturday,
        DayCode::Sunday,
    ];

    /// The single-letter code used by the school's records (`L,M,X,J,V,S,D`).
    pub fn letter(self) -> char {
        match self {
            DayCode::Monday => 'L',
            DayCode::Tuesday => 'M',
            DayCode::Wednesday => 'X',
            DayCode::Thursday => 'J',
            DayCode::Friday => 'V',
            DayCode::Saturday => 'S',
            DayCode::Sunday => 'D',
        }
    }

    /// Parses a single-letter day code. Case-insensitive, surrounding whitespace ignored.
    pub fn from_letter(code: &str) -> Option<Self> {
        let mut chars = code.trim().chars();
        let letter = chars.next()?.to_ascii_uppercase();
        if chars.next().is_some() {
            return None;
        }
        DayCode::ALL.into_iter().find(|day| day.letter() == letter)
    }
}

impl fmt::Display for DayCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

//=========================================================================================
// Time of day
//=========================================================================================

/// A wall-clock time of day with minute precision.
///
/// Stored and compared as minutes since midnight. The canonical textual form is
/// `HH:MM` on a 24-hour clock; the 12-hour form is only a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot(u16);

impl TimeSlot {
    /// Builds a slot for the crate's constants. Panics on an out-of-range hour or
    /// minute, which in a `const` is a build error.
    pub(crate) const fn hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "time of day out of range");
        Self(hour * 60 + minute)
    }

    /// Builds a slot from an hour and minute, or `None` when either is out of range.
    pub fn try_hm(hour: u32, minute: u32) -> Option<Self> {
        if hour >= 24 || minute >= 60 {
            return None;
        }
        Self::from_minutes(hour * 60 + minute)
    }

    /// Builds a slot from minutes since midnight.
    pub fn from_minutes(minutes: u32) -> Option<Self> {
        if minutes >= MINUTES_PER_DAY {
            return None;
        }
        u16::try_from(minutes).ok().map(Self)
    }

    pub fn minutes(self) -> u32 {
        u32::from(self.0)
    }

    pub fn hour(self) -> u32 {
        self.minutes() / 60
    }

    pub fn minute(self) -> u32 {
        self.minutes() % 60
    }

    /// Returns the slot `step` minutes later, or `None` past midnight.
    pub fn checked_add_minutes(self, step: u32) -> Option<Self> {
        Self::from_minutes(self.minutes().checked_add(step)?)
    }

    /// Parses a strict `HH:MM` 24-hour string.
    pub fn parse_24h(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.len() != 5 || value.as_bytes()[2] != b':' {
            return None;
        }
        NaiveTime::parse_from_str(value, "%H:%M")
            .ok()
            .map(Self::from_naive)
    }

    /// Renders the slot for a 12-hour display, e.g. `"08:45 PM"`.
    pub fn to_12h(self) -> String {
        let suffix = if self.hour() < 12 { "AM" } else { "PM" };
        let hour = match self.hour() % 12 {
            0 => 12,
            hour => hour,
        };
        format!("{:02}:{:02} {}", hour, self.minute(), suffix)
    }

    /// Inverse of [`TimeSlot::to_12h`].
    pub fn from_12h(value: &str) -> Option<Self> {
        NaiveTime::parse_from_str(value.trim(), "%I:%M %p")
            .ok()
            .map(Self::from_naive)
    }

    fn from_naive(time: NaiveTime) -> Self {
        // hour() < 24 and minute() < 60 for every NaiveTime
        Self((time.hour() * 60 + time.minute()) as u16)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

//=========================================================================================
// Schedules
//=========================================================================================

/// One day's teaching range inside a weekly schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySchedule {
    pub day: DayCode,
    pub start_time: TimeSlot,
    pub end_time: TimeSlot,
}

impl DaySchedule {
    pub fn new(day: DayCode, start_time: TimeSlot, end_time: TimeSlot) -> Self {
        Self {
            day,
            start_time,
            end_time,
        }
    }

    /// Length of the range in minutes; zero for an inverted range.
    pub fn duration_minutes(&self) -> u32 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScheduleStatus {
    Active,
    Cancelled,
}

/// Identifier of a professor as issued by the external directory.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfessorId(String);

impl ProfessorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ProfessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A professor, owned by the external directory and referenced here by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Professor {
    pub id: ProfessorId,
    pub name: String,
    pub specialties: Vec<String>,
    pub color: String,
}

/// A professor's weekly recurring teaching schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessorSchedule {
    pub id: ScheduleId,
    pub professor_id: ProfessorId,
    pub entries: Vec<DaySchedule>,
    pub status: ScheduleStatus,
    /// Always present while `status` is `Cancelled`, cleared on reactivation.
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfessorSchedule {
    pub fn is_active(&self) -> bool {
        self.status == ScheduleStatus::Active
    }

    pub fn has_day(&self, day: DayCode) -> bool {
        self.entries.iter().any(|entry| entry.day == day)
    }

    /// Total teaching minutes across the week.
    pub fn weekly_minutes(&self) -> u32 {
        self.entries.iter().map(DaySchedule::duration_minutes).sum()
    }

    /// Entries in Monday-to-Sunday order, for list views.
    pub fn entries_by_day(&self) -> Vec<DaySchedule> {
        let mut entries = self.entries.clone();
        entries.sort_by_key(|entry| entry.day);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_letters_round_trip() {
        for day in DayCode::ALL {
            assert_eq!(DayCode::from_letter(&day.to_string()), Some(day));
        }
        assert_eq!(DayCode::from_letter(" x "), Some(DayCode::Wednesday));
        assert_eq!(DayCode::from_letter("LM"), None);
        assert_eq!(DayCode::from_letter(""), None);
    }

    #[test]
    fn only_strict_24h_times_parse() {
        assert_eq!(TimeSlot::parse_24h("09:30"), Some(TimeSlot::hm(9, 30)));
        assert_eq!(TimeSlot::parse_24h("23:59").map(TimeSlot::minutes), Some(1439));
        for bad in ["9:30", "24:00", "09:60", "09:30:00", "0930", "ab:cd"] {
            assert_eq!(TimeSlot::parse_24h(bad), None, "{bad} should be rejected");
        }
    }

    #[test]
    fn try_hm_rejects_out_of_range_parts() {
        assert_eq!(TimeSlot::try_hm(20, 0), Some(TimeSlot::hm(20, 0)));
        assert_eq!(TimeSlot::try_hm(23, 59).map(TimeSlot::minutes), Some(1439));
        assert_eq!(TimeSlot::try_hm(24, 0), None);
        assert_eq!(TimeSlot::try_hm(9, 60), None);
        assert_eq!(TimeSlot::try_hm(u32::MAX, 0), None);
    }

    #[test]
    fn schedule_totals_and_ordering() {
        let now = Utc::now();
        let schedule = ProfessorSchedule {
            id: Uuid::new_v4(),
            professor_id: ProfessorId::new("P1"),
            entries: vec![
                DaySchedule::new(DayCode::Friday, TimeSlot::hm(8, 0), TimeSlot::hm(9, 30)),
                DaySchedule::new(DayCode::Monday, TimeSlot::hm(10, 15), TimeSlot::hm(11, 0)),
            ],
            status: ScheduleStatus::Active,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        };

        assert_eq!(schedule.weekly_minutes(), 90 + 45);
        assert_eq!(schedule.entries_by_day()[0].day, DayCode::Monday);
        assert!(schedule.has_day(DayCode::Friday));
        assert!(!schedule.has_day(DayCode::Sunday));
    }
}
