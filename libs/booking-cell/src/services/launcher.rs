// libs/booking-cell/src/services/launcher.rs
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use schedule_cell::models::{DoctorSchedule, TimeSlot};
use schedule_cell::services::resolution::ScheduleResolver;
use shared_models::{SessionProvider, VisitApi};

use crate::models::IdentityRequirements;
use crate::services::flow::BookingFlow;

/// The one integration point every booking surface goes through: the
/// doctor card, the doctor page and the clinic listings all open flows
/// here, so there is exactly one path to the create-visit operation.
pub struct BookingLauncher {
    api: Arc<dyn VisitApi>,
    session: Arc<dyn SessionProvider>,
    resolver: ScheduleResolver,
    requirements: IdentityRequirements,
    on_success: Option<Arc<dyn Fn() + Send + Sync>>,
}

impl BookingLauncher {
    pub fn new(api: Arc<dyn VisitApi>, session: Arc<dyn SessionProvider>) -> Self {
        Self {
            api,
            session,
            resolver: ScheduleResolver::new(),
            requirements: IdentityRequirements::default(),
            on_success: None,
        }
    }

    pub fn with_requirements(mut self, requirements: IdentityRequirements) -> Self {
        self.requirements = requirements;
        self
    }

    /// Surface-supplied refresh hook, copied onto every flow this launcher
    /// opens.
    pub fn with_on_success(mut self, callback: Arc<dyn Fn() + Send + Sync>) -> Self {
        self.on_success = Some(callback);
        self
    }

    pub fn api(&self) -> Arc<dyn VisitApi> {
        Arc::clone(&self.api)
    }

    /// Open the flow at step 1 with nothing pre-seeded beyond the defaults:
    /// the consultation when the doctor has one, and the nearest bookable
    /// date (today, tomorrow, day after, else the first date with slots).
    pub async fn open(&self, schedule: &DoctorSchedule) -> BookingFlow {
        let mut flow = BookingFlow::new(schedule, self.requirements.clone());
        if let Some(callback) = &self.on_success {
            flow.set_on_success(Arc::clone(callback));
        }

        if let Some(date) = self.resolver.default_date(&schedule.days, self.resolver.today()) {
            if let Err(e) = flow.selection_mut().choose_date(date) {
                warn!("Default date {} rejected: {}", date, e);
            }
        }

        self.prefill_from_session(&mut flow).await;
        flow
    }

    /// Open the flow pre-seeded from a slot clicked on a listing surface:
    /// procedure, date and slot land already chosen, so one `advance`
    /// reaches the step-2 confirmation. Stale card data (a date or slot the
    /// schedule no longer carries) degrades to a plain open instead of
    /// failing.
    pub async fn open_at_slot(
        &self,
        schedule: &DoctorSchedule,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> BookingFlow {
        let mut flow = BookingFlow::new(schedule, self.requirements.clone());
        if let Some(callback) = &self.on_success {
            flow.set_on_success(Arc::clone(callback));
        }

        let seeded = match flow.selection_mut().choose_date(date) {
            Ok(()) => flow.selection_mut().choose_slot(slot),
            Err(e) => Err(e),
        };

        match seeded {
            Ok(()) => debug!("Flow pre-seeded at {} for doctor {}", date, schedule.doctor_id),
            Err(e) => {
                warn!("Slot entry rejected ({}), opening without a pre-selected slot", e);
                if let Some(fallback) = self.resolver.default_date(&schedule.days, self.resolver.today()) {
                    let _ = flow.selection_mut().choose_date(fallback);
                }
            }
        }

        self.prefill_from_session(&mut flow).await;
        flow
    }

    /// Profile pre-fill is best effort: an anonymous session leaves the
    /// form editable, and a failed fetch must never block the flow from
    /// opening.
    async fn prefill_from_session(&self, flow: &mut BookingFlow) {
        match self.session.current_user().await {
            Ok(Some(profile)) => flow.prefill_contact(&profile),
            Ok(None) => {}
            Err(e) => warn!("Profile fetch failed, continuing unauthenticated: {}", e),
        }
    }
}
