use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered migrant worker. Immutable once emitted by the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub user_id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub contact: String,
    pub origin_state: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Suggested filename for the downloadable QR image.
    pub qr_code_file: String,
}

impl Worker {
    pub fn has_emergency_contact(&self) -> bool {
        self.emergency_contact_name.is_some() || self.emergency_contact.is_some()
    }
}
