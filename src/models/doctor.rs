use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::VerificationStatus;

/// A registered doctor.
///
/// `verified` starts false and is flipped by the verification simulator.
/// Nothing ever sets `approved_by_admin`; the field exists so a real
/// approval workflow has somewhere to record who approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub doctor_id: String,
    pub name: String,
    pub specialization: String,
    pub license_number: String,
    pub contact: String,
    pub qualification: Option<String>,
    pub experience: Option<String>,
    pub email: Option<String>,
    pub work_address: Option<String>,
    pub hospital_affiliation: Option<String>,
    pub verified: bool,
    pub approved_by_admin: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Doctor {
    pub fn status(&self) -> VerificationStatus {
        if self.verified {
            VerificationStatus::Verified
        } else {
            VerificationStatus::Pending
        }
    }

    /// Name as shown on records, with the title added when missing.
    pub fn display_name(&self) -> String {
        let name = self.name.trim();
        if name.starts_with("Dr.") || name.starts_with("Dr ") {
            name.to_string()
        } else {
            format!("Dr. {name}")
        }
    }
}
