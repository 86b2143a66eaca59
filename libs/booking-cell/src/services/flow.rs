// libs/booking-cell/src/services/flow.rs
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use schedule_cell::models::DoctorSchedule;
use shared_models::{ApiError, CreateVisitRequest, UserProfile, VisitApi, VisitConfirmation};

use crate::models::{
    BookingError, BookingSummary, FlowPhase, IdentityRequirements, StepMarkers, SubmissionOutcome,
    GENERIC_SUBMISSION_FAILURE,
};
use crate::services::contact::ContactForm;
use crate::services::selection::SelectionState;

/// Matches one submission attempt to the flow state it was started from.
/// A ticket outlives neither a `close` nor a reopen: its epoch stops
/// matching and the late response is discarded.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionTicket {
    epoch: u64,
}

/// Orchestrator of one open booking modal: owns the step machinery,
/// aggregates the step-1 selection and step-2 form, talks to the
/// create-visit operation and maps every outcome to user feedback. All
/// state is built fresh on open and torn down on close; nothing is shared
/// between concurrently open flows or reused across opens.
pub struct BookingFlow {
    doctor_id: Uuid,
    phase: FlowPhase,
    selection: SelectionState,
    contact: ContactForm,
    summary: Option<BookingSummary>,
    steps: StepMarkers,
    requirements: IdentityRequirements,
    terms_accepted: bool,
    epoch: u64,
    closed: bool,
    on_success: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl BookingFlow {
    pub fn new(schedule: &DoctorSchedule, requirements: IdentityRequirements) -> Self {
        Self {
            doctor_id: schedule.doctor_id,
            phase: FlowPhase::SlotSelection,
            selection: SelectionState::new(
                schedule.days.clone(),
                schedule.default_procedure().cloned(),
            ),
            contact: ContactForm::new(requirements.clone()),
            summary: None,
            steps: StepMarkers::default(),
            requirements,
            terms_accepted: false,
            epoch: 0,
            closed: false,
            on_success: None,
        }
    }

    pub fn doctor_id(&self) -> Uuid {
        self.doctor_id
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn steps(&self) -> StepMarkers {
        self.steps
    }

    pub fn summary(&self) -> Option<&BookingSummary> {
        self.summary.as_ref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Step-1 mutations go straight to the selection machine; the flow only
    /// gates progression, not individual picks.
    pub fn selection_mut(&mut self) -> &mut SelectionState {
        &mut self.selection
    }

    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    pub fn set_terms_accepted(&mut self, accepted: bool) {
        self.terms_accepted = accepted;
    }

    /// Listing surfaces hang a refresh on this; it fires exactly once per
    /// successful submission.
    pub fn set_on_success(&mut self, callback: Arc<dyn Fn() + Send + Sync>) {
        self.on_success = Some(callback);
    }

    pub fn prefill_contact(&mut self, profile: &UserProfile) {
        self.contact.prefill(profile);
    }

    /// Step 1 → step 2. Allowed only for a complete selection; the summary
    /// snapshot rendered on step 2 is taken here.
    pub fn advance(&mut self) -> Result<&BookingSummary, BookingError> {
        if self.phase != FlowPhase::SlotSelection {
            return Err(BookingError::NotInPhase);
        }

        let completed = self.selection.ensure_complete()?;

        self.summary = Some(BookingSummary {
            clinic_title: completed.clinic_title.clone(),
            clinic_address: completed.clinic_address.clone(),
            date: completed.date,
            starts_at: completed.slot.starts_at,
            procedure_title: completed.procedure.title.clone(),
            final_price: completed.procedure.pricing.final_price,
        });
        self.steps.selection_complete = true;
        self.phase = FlowPhase::PatientDetails;

        debug!("Advanced to patient details for doctor {}", self.doctor_id);
        self.summary.as_ref().ok_or(BookingError::NotInPhase)
    }

    /// Step 2 → step 1. Always allowed; selections and entered contact
    /// fields survive the round trip.
    pub fn back(&mut self) -> Result<(), BookingError> {
        match self.phase {
            FlowPhase::PatientDetails | FlowPhase::Failed => {
                self.phase = FlowPhase::SlotSelection;
                Ok(())
            }
            _ => Err(BookingError::NotInPhase),
        }
    }

    /// Validate step 2 and assemble the create-visit payload. Moves the
    /// flow to `Submitting`; a second call before the first resolves is
    /// rejected, which is the submit control staying disabled.
    pub fn begin_submission(&mut self) -> Result<(CreateVisitRequest, SubmissionTicket), BookingError> {
        match self.phase {
            FlowPhase::PatientDetails | FlowPhase::Failed => {}
            _ => return Err(BookingError::NotInPhase),
        }

        let completed = self.selection.ensure_complete()?;
        self.contact.validate().map_err(BookingError::Validation)?;

        if self.requirements.require_terms_consent && !self.terms_accepted {
            return Err(BookingError::TermsNotAccepted);
        }

        let contact = self.contact.contact();
        let request = CreateVisitRequest {
            doctor_id: self.doctor_id,
            procedure_id: completed.procedure.id,
            clinic_id: completed.clinic_id,
            date: completed.date,
            working_hours_id: completed.slot.working_hours_id,
            first_name: contact.first_name.trim().to_string(),
            last_name: contact.last_name.trim().to_string(),
            phone: self.contact.phone_digits(),
            national_id: if self.requirements.collect_national_id {
                contact.national_id.clone()
            } else {
                None
            },
        };

        self.steps.details_complete = true;
        self.phase = FlowPhase::Submitting;
        info!(
            "Submitting visit for doctor {} at clinic {} on {}",
            request.doctor_id, request.clinic_id, request.date
        );

        Ok((request, SubmissionTicket { epoch: self.epoch }))
    }

    /// Apply the result of the create-visit call. A response that arrives
    /// after the flow was closed or reopened is discarded silently: no
    /// notification, no state mutation, no callback.
    pub fn finish_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<VisitConfirmation, ApiError>,
    ) -> SubmissionOutcome {
        if self.closed || ticket.epoch != self.epoch || self.phase != FlowPhase::Submitting {
            debug!("Discarding stale submission response for doctor {}", self.doctor_id);
            return SubmissionOutcome::Discarded;
        }

        match result {
            Ok(confirmation) => {
                info!("Visit created for doctor {}", self.doctor_id);
                self.phase = FlowPhase::Succeeded;
                if let Some(callback) = &self.on_success {
                    callback();
                }
                self.close();
                SubmissionOutcome::Succeeded { confirmation }
            }
            Err(error) => {
                // Step 2 stays open with everything the patient typed, so a
                // rejected submission can be corrected and retried.
                let message = error
                    .user_message()
                    .unwrap_or(GENERIC_SUBMISSION_FAILURE)
                    .to_string();
                warn!("Visit creation failed for doctor {}: {}", self.doctor_id, error);
                self.phase = FlowPhase::Failed;
                SubmissionOutcome::Failed { message }
            }
        }
    }

    /// Convenience driver for hosts that do not split the call themselves.
    /// Every API error is absorbed into the outcome; nothing propagates.
    pub async fn submit(&mut self, api: &dyn VisitApi) -> Result<SubmissionOutcome, BookingError> {
        let (request, ticket) = self.begin_submission()?;
        let result = api.create_visit(request).await;
        Ok(self.finish_submission(ticket, result))
    }

    /// Tear the flow down. In-flight submissions are invalidated; their
    /// late responses fall into `Discarded`.
    pub fn close(&mut self) {
        self.closed = true;
        self.epoch += 1;
        debug!("Booking flow closed for doctor {}", self.doctor_id);
    }
}
