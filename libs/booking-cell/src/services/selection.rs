// libs/booking-cell/src/services/selection.rs
use chrono::NaiveDate;
use tracing::debug;

use schedule_cell::models::{DaySchedule, Procedure, TimeSlot};
use schedule_cell::services::resolution::ScheduleResolver;

use crate::models::{BookingError, BookingSelection, CompletedSelection, SelectionProgress};

/// Step-1 state machine over procedure, date and time slot. Fields may be
/// re-set in any order; completeness is re-evaluated on every change. The
/// one destructive rule: choosing a date clears a previously chosen slot
/// that does not belong to the new date's entry.
pub struct SelectionState {
    days: Vec<DaySchedule>,
    resolver: ScheduleResolver,
    selection: BookingSelection,
}

impl SelectionState {
    pub fn new(days: Vec<DaySchedule>, default_procedure: Option<Procedure>) -> Self {
        Self {
            days,
            resolver: ScheduleResolver::new(),
            selection: BookingSelection {
                procedure: default_procedure,
                date: None,
                slot: None,
            },
        }
    }

    pub fn selection(&self) -> &BookingSelection {
        &self.selection
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn available_dates(&self) -> Vec<NaiveDate> {
        self.resolver.available_dates(&self.days)
    }

    /// Slots of the currently chosen date, for rendering. Empty when no
    /// date is chosen or the date has no open intervals.
    pub fn slots_for_chosen_date(&self) -> Vec<TimeSlot> {
        match self.selection.date {
            Some(date) => self
                .resolver
                .day_for_date(&self.days, date)
                .map(|day| self.resolver.time_slots(&day.working_hours))
                .unwrap_or_default(),
            None => Vec::new(),
        }
    }

    /// Switching procedures never touches date or slot: availability is
    /// keyed by clinic and date, not by offering.
    pub fn choose_procedure(&mut self, procedure: Procedure) {
        debug!("Procedure chosen: {}", procedure.title);
        self.selection.procedure = Some(procedure);
    }

    pub fn choose_date(&mut self, date: NaiveDate) -> Result<(), BookingError> {
        let day = match self.resolver.day_for_date(&self.days, date) {
            Some(day) => day,
            None => return Err(BookingError::InvalidDate),
        };

        let slot_survives = self
            .selection
            .slot
            .as_ref()
            .map(|slot| day.contains_slot(slot))
            .unwrap_or(true);
        if !slot_survives {
            debug!("Date changed to {}, clearing slot outside the new day", date);
            self.selection.slot = None;
        }

        self.selection.date = Some(date);
        Ok(())
    }

    pub fn choose_slot(&mut self, slot: TimeSlot) -> Result<(), BookingError> {
        let day = self
            .selection
            .date
            .and_then(|date| self.resolver.day_for_date(&self.days, date))
            .ok_or(BookingError::SlotOutsideDay)?;

        if !day.contains_slot(&slot) {
            return Err(BookingError::SlotOutsideDay);
        }

        self.selection.slot = Some(slot);
        Ok(())
    }

    pub fn progress(&self) -> SelectionProgress {
        if self.is_complete() {
            SelectionProgress::Complete
        } else if self.selection.slot.is_some() {
            SelectionProgress::SlotChosen
        } else if self.selection.date.is_some() {
            SelectionProgress::DateChosen
        } else if self.selection.procedure.is_some() {
            SelectionProgress::ProcedureChosen
        } else {
            SelectionProgress::Empty
        }
    }

    pub fn is_complete(&self) -> bool {
        if self.selection.procedure.is_none() {
            return false;
        }

        match (self.selection.date, &self.selection.slot) {
            (Some(date), Some(slot)) => self
                .resolver
                .day_for_date(&self.days, date)
                .map(|day| day.contains_slot(slot))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// The gate to step 2. An incomplete selection yields the single
    /// aggregate error; per-field messages are a step-2 concern.
    pub fn ensure_complete(&self) -> Result<CompletedSelection, BookingError> {
        if !self.is_complete() {
            return Err(BookingError::SelectionIncomplete);
        }

        let procedure = self
            .selection
            .procedure
            .clone()
            .ok_or(BookingError::SelectionIncomplete)?;
        let date = self.selection.date.ok_or(BookingError::SelectionIncomplete)?;
        let slot = self
            .selection
            .slot
            .clone()
            .ok_or(BookingError::SelectionIncomplete)?;
        let day = self
            .resolver
            .day_for_date(&self.days, date)
            .ok_or(BookingError::SelectionIncomplete)?;

        Ok(CompletedSelection {
            procedure,
            date,
            slot,
            clinic_id: day.clinic_id,
            clinic_title: day.clinic_title.clone(),
            clinic_address: day.clinic_address.clone(),
        })
    }
}
