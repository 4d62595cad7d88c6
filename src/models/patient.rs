use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::record::MedicalRecord;

/// Patient as returned by a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub user_id: String,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub origin_state: String,
    pub occupation: String,
    pub contact: String,
    pub last_visit: Option<NaiveDate>,
    pub medical_history: Vec<MedicalRecord>,
}

impl PatientProfile {
    /// "First visit" when the patient has never been seen.
    pub fn last_visit_label(&self) -> String {
        self.last_visit
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "First visit".into())
    }
}
