use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::UserProfile;
use crate::error::ApiError;

/// Payload of the portal's create-visit operation. The clinic id comes from
/// the schedule entry of the chosen date, never from user input, and the
/// phone carries digits only (mask separators stripped).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVisitRequest {
    pub doctor_id: Uuid,
    pub procedure_id: Uuid,
    pub clinic_id: Uuid,
    pub date: NaiveDate,
    pub working_hours_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitConfirmation {
    pub visit_id: Option<Uuid>,
}

/// The create-visit operation as consumed by the booking flow. The portal
/// client implements this; tests substitute mocks.
#[async_trait]
pub trait VisitApi: Send + Sync {
    async fn create_visit(&self, request: CreateVisitRequest) -> Result<VisitConfirmation, ApiError>;
}

/// The current-user accessor. `Ok(None)` means not authenticated, which is
/// an ordinary outcome rather than an error.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn current_user(&self) -> Result<Option<UserProfile>, ApiError>;
}
