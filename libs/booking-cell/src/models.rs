// libs/booking-cell/src/models.rs
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

use schedule_cell::models::{Procedure, TimeSlot};
use shared_models::VisitConfirmation;

// ==============================================================================
// STEP 1 — SELECTION MODELS
// ==============================================================================

/// The in-progress choice of procedure, date and time slot. Complete iff all
/// three are set and the slot belongs to the schedule entry of the chosen
/// date.
#[derive(Debug, Clone, Default)]
pub struct BookingSelection {
    pub procedure: Option<Procedure>,
    pub date: Option<NaiveDate>,
    pub slot: Option<TimeSlot>,
}

/// Derived stage of the step-1 selection, for progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionProgress {
    Empty,
    ProcedureChosen,
    DateChosen,
    SlotChosen,
    Complete,
}

/// Snapshot of a complete step-1 selection. The clinic identity is taken
/// from the schedule entry of the chosen date; the patient never edits it.
#[derive(Debug, Clone)]
pub struct CompletedSelection {
    pub procedure: Procedure,
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub clinic_id: Uuid,
    pub clinic_title: String,
    pub clinic_address: String,
}

// ==============================================================================
// STEP 2 — PATIENT IDENTITY MODELS
// ==============================================================================

/// Contact fields of the person the visit is booked for. The phone is held
/// in its masked form (`+7 XXX XXX XXXX`); digits are stripped only when the
/// payload is assembled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientContact {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub national_id: Option<String>,
}

/// Which identity fields a flow variant collects. Collapses the divergent
/// form variants of the product into one configuration-driven schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRequirements {
    pub require_last_name: bool,
    pub collect_national_id: bool,
    pub require_terms_consent: bool,
}

impl Default for IdentityRequirements {
    fn default() -> Self {
        Self {
            require_last_name: true,
            collect_national_id: false,
            require_terms_consent: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    FirstName,
    LastName,
    Phone,
    NationalId,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactField::FirstName => write!(f, "first_name"),
            ContactField::LastName => write!(f, "last_name"),
            ContactField::Phone => write!(f, "phone"),
            ContactField::NationalId => write!(f, "national_id"),
        }
    }
}

/// Field-level validation messages, rendered under the matching input.
pub type FieldErrors = HashMap<ContactField, String>;

// ==============================================================================
// FLOW CONTROLLER MODELS
// ==============================================================================

/// Phase of one open booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    SlotSelection,
    PatientDetails,
    Submitting,
    Succeeded,
    Failed,
}

impl FlowPhase {
    /// The user-visible step number, where one exists.
    pub fn step_number(&self) -> Option<u8> {
        match self {
            FlowPhase::SlotSelection => Some(1),
            FlowPhase::PatientDetails | FlowPhase::Failed => Some(2),
            FlowPhase::Submitting | FlowPhase::Succeeded => None,
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowPhase::SlotSelection => write!(f, "slot_selection"),
            FlowPhase::PatientDetails => write!(f, "patient_details"),
            FlowPhase::Submitting => write!(f, "submitting"),
            FlowPhase::Succeeded => write!(f, "succeeded"),
            FlowPhase::Failed => write!(f, "failed"),
        }
    }
}

/// Completed-step markers for the progress header.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StepMarkers {
    pub selection_complete: bool,
    pub details_complete: bool,
}

/// Read-only confirmation summary shown on entry to step 2.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingSummary {
    pub clinic_title: String,
    pub clinic_address: String,
    pub date: NaiveDate,
    pub starts_at: NaiveTime,
    pub procedure_title: String,
    pub final_price: f64,
}

/// What became of one submission attempt. `Discarded` means the response
/// arrived for a flow that was already torn down or reopened and must leave
/// no trace.
#[derive(Debug, Clone)]
pub enum SubmissionOutcome {
    Succeeded { confirmation: VisitConfirmation },
    Failed { message: String },
    Discarded,
}

/// Fallback shown when the portal rejects a submission without a
/// human-readable message of its own.
pub const GENERIC_SUBMISSION_FAILURE: &str = "Could not complete the booking. Please try again.";

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum BookingError {
    #[error("Select a procedure, date and time")]
    SelectionIncomplete,

    #[error("Date is not available for booking")]
    InvalidDate,

    #[error("Time slot does not belong to the selected date")]
    SlotOutsideDay,

    #[error("Some fields need attention")]
    Validation(FieldErrors),

    #[error("The terms of service must be accepted")]
    TermsNotAccepted,

    #[error("Action is not allowed in the current step")]
    NotInPhase,
}
