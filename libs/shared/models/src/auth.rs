use serde::{Deserialize, Serialize};

/// Profile of the authenticated patient, as returned by the portal's
/// current-user endpoint. Absence of a profile means "not authenticated".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub phone: Option<String>,
}
