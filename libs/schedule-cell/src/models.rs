use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One bookable interval at a clinic on a date, as delivered by the portal.
/// Times are local wall-clock values (`"09:00:00"`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkingHours {
    pub id: Uuid,
    pub starts_at: NaiveTime,
    pub ends_at: NaiveTime,
}

/// Normalized booking unit shown to the patient. Derived 1:1 from a
/// `WorkingHours` record; the identifier is reused so the portal can map a
/// chosen slot back to the source interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub working_hours_id: Uuid,
    pub starts_at: NaiveTime,
    pub ends_at: Option<NaiveTime>,
}

impl From<&WorkingHours> for TimeSlot {
    fn from(record: &WorkingHours) -> Self {
        Self {
            working_hours_id: record.id,
            starts_at: record.starts_at,
            ends_at: Some(record.ends_at),
        }
    }
}

/// One date's worth of a doctor's availability at one clinic. A doctor's
/// full availability is an ascending sequence of these, one per date that
/// has any data. A closed day is either absent from the sequence or present
/// with an empty `working_hours` list; both read as "no bookable slots".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub clinic_id: Uuid,
    pub clinic_title: String,
    pub clinic_address: String,
    pub working_hours: Vec<WorkingHours>,
}

impl DaySchedule {
    pub fn is_bookable(&self) -> bool {
        !self.working_hours.is_empty()
    }

    pub fn contains_slot(&self, slot: &TimeSlot) -> bool {
        self.working_hours
            .iter()
            .any(|record| record.id == slot.working_hours_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedurePricing {
    pub default_price: f64,
    pub discount_percent: f64,
    pub final_price: f64,
}

/// A bookable offering of a doctor. The distinguished first-visit
/// consultation is carried separately on `DoctorSchedule`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Procedure {
    pub id: Uuid,
    pub title: String,
    pub pricing: ProcedurePricing,
}

/// Everything the booking flow consumes for one doctor: offerings plus the
/// per-date availability. Arrives already filtered to this doctor; read-only
/// from the flow's perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSchedule {
    pub doctor_id: Uuid,
    pub doctor_name: String,
    pub consultation: Option<Procedure>,
    pub procedures: Vec<Procedure>,
    pub days: Vec<DaySchedule>,
}

impl DoctorSchedule {
    /// The offering pre-selected when the flow opens. Only the consultation
    /// is distinguished; other procedures require an explicit pick.
    pub fn default_procedure(&self) -> Option<&Procedure> {
        self.consultation.as_ref()
    }

    /// Whether the flow should expose a procedure picker.
    pub fn offers_multiple(&self) -> bool {
        self.procedures.len() + usize::from(self.consultation.is_some()) > 1
    }
}

/// Calendar header label for a date, relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateLabel {
    Today,
    Tomorrow,
    DayAfterTomorrow,
    Other,
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateLabel::Today => write!(f, "today"),
            DateLabel::Tomorrow => write!(f, "tomorrow"),
            DateLabel::DayAfterTomorrow => write!(f, "day_after_tomorrow"),
            DateLabel::Other => write!(f, "other"),
        }
    }
}
