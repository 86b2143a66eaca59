// libs/schedule-cell/src/services/resolution.rs
use chrono::{Duration, Local, NaiveDate};
use tracing::debug;

use crate::models::{DateLabel, DaySchedule, TimeSlot, WorkingHours};

/// Pure derivations over a doctor's per-date availability. Holds no state;
/// every answer is recomputed from the input on each call.
pub struct ScheduleResolver;

impl ScheduleResolver {
    pub fn new() -> Self {
        Self
    }

    /// All dates present in the schedule, ascending and duplicate-free.
    pub fn available_dates(&self, days: &[DaySchedule]) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = days.iter().map(|day| day.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// Dates that actually have open slots. Entries with an empty
    /// working-hours list count as closed days.
    pub fn bookable_dates(&self, days: &[DaySchedule]) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = days
            .iter()
            .filter(|day| day.is_bookable())
            .map(|day| day.date)
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }

    /// The entry for an exact date. Absence is an ordinary answer, not an
    /// error; the UI renders "no available time" for it.
    pub fn day_for_date<'a>(&self, days: &'a [DaySchedule], date: NaiveDate) -> Option<&'a DaySchedule> {
        days.iter().find(|day| day.date == date)
    }

    /// Map raw working-hour records to time slots, order preserved. The
    /// input is trusted to already be sorted by start time.
    pub fn time_slots(&self, working_hours: &[WorkingHours]) -> Vec<TimeSlot> {
        working_hours.iter().map(TimeSlot::from).collect()
    }

    pub fn first_bookable_date(&self, days: &[DaySchedule]) -> Option<NaiveDate> {
        self.bookable_dates(days).into_iter().next()
    }

    /// The date the calendar opens on: today, tomorrow or the day after
    /// when one of them has open slots, otherwise the nearest date that
    /// does. Never a date with zero slots.
    pub fn default_date(&self, days: &[DaySchedule], today: NaiveDate) -> Option<NaiveDate> {
        let bookable = self.bookable_dates(days);

        for offset in 0..3 {
            let candidate = today + Duration::days(offset);
            if bookable.contains(&candidate) {
                return Some(candidate);
            }
        }

        let fallback = bookable.into_iter().next();
        debug!("No availability within three days of {}, falling back to {:?}", today, fallback);
        fallback
    }

    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    pub fn tomorrow(&self) -> NaiveDate {
        self.today() + Duration::days(1)
    }

    pub fn day_after_tomorrow(&self) -> NaiveDate {
        self.today() + Duration::days(2)
    }

    pub fn label_for(&self, date: NaiveDate, today: NaiveDate) -> DateLabel {
        match (date - today).num_days() {
            0 => DateLabel::Today,
            1 => DateLabel::Tomorrow,
            2 => DateLabel::DayAfterTomorrow,
            _ => DateLabel::Other,
        }
    }
}

impl Default for ScheduleResolver {
    fn default() -> Self {
        Self::new()
    }
}
