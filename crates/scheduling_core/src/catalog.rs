//! crates/scheduling_core/src/catalog.rs
//!
//! The slot catalog: the authoritative set of days and clock times a professor
//! schedule may use, and the rules object that configures it.

use crate::domain::{DayCode, TimeSlot};
use crate::error::CatalogError;

/// Configuration shared by the catalog and the schedule builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRules {
    pub window_start: TimeSlot,
    pub window_end: TimeSlot,
    pub step_minutes: u32,
    /// When false, any minute inside the working window is accepted.
    pub enforce_catalog_membership: bool,
}

impl ScheduleRules {
    pub const DEFAULT_WINDOW_START: TimeSlot = TimeSlot::hm(8, 0);
    pub const DEFAULT_WINDOW_END: TimeSlot = TimeSlot::hm(20, 0);
    pub const DEFAULT_STEP_MINUTES: u32 = 45;

    /// 08:00 to 20:00 in 45 minute steps, catalog membership enforced.
    pub fn standard() -> Self {
        Self {
            window_start: Self::DEFAULT_WINDOW_START,
            window_end: Self::DEFAULT_WINDOW_END,
            step_minutes: Self::DEFAULT_STEP_MINUTES,
            enforce_catalog_membership: true,
        }
    }

    /// Same window as [`ScheduleRules::standard`], without the step restriction.
    pub fn relaxed() -> Self {
        Self {
            enforce_catalog_membership: false,
            ..Self::standard()
        }
    }

    pub fn contains(&self, time: TimeSlot) -> bool {
        time >= self.window_start && time <= self.window_end
    }
}

impl Default for ScheduleRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// The ordered, immutable list of assignable clock times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    slots: Vec<TimeSlot>,
}

impl SlotCatalog {
    /// Generates the catalog for `rules`. Fails only on a degenerate window or step.
    pub fn new(rules: &ScheduleRules) -> Result<Self, CatalogError> {
        if rules.step_minutes == 0 {
            return Err(CatalogError::ZeroStep);
        }
        if rules.window_start >= rules.window_end {
            return Err(CatalogError::EmptyWindow {
                start: rules.window_start,
                end: rules.window_end,
            });
        }
        Ok(Self {
            slots: valid_time_slots(rules.window_start, rules.window_end, rules.step_minutes),
        })
    }

    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    pub fn contains(&self, time: TimeSlot) -> bool {
        self.slots.binary_search(&time).is_ok()
    }

    pub fn first(&self) -> Option<TimeSlot> {
        self.slots.first().copied()
    }

    pub fn last(&self) -> Option<TimeSlot> {
        self.slots.last().copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// The seven schedulable days, Monday first.
pub fn valid_days() -> [DayCode; 7] {
    DayCode::ALL
}

/// Every time from `window_start` in `step_minutes` increments that is not past
/// `window_end`. A zero step yields only `window_start`.
pub fn valid_time_slots(window_start: TimeSlot, window_end: TimeSlot, step_minutes: u32) -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    let mut current = Some(window_start);
    while let Some(time) = current.filter(|time| *time <= window_end) {
        slots.push(time);
        if step_minutes == 0 {
            break;
        }
        current = time.checked_add_minutes(step_minutes);
    }
    slots
}

pub fn is_valid_slot(time: TimeSlot, catalog: &SlotCatalog) -> bool {
    catalog.contains(time)
}
