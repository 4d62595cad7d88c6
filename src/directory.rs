//! Patient directory: resolves a health identifier to a patient profile.
//!
//! The portal only sees the [`PatientDirectory`] trait. The shipped
//! implementation is a fixed two-entry table used by the demo.

use chrono::NaiveDate;

use crate::models::{MedicalRecord, PatientProfile};

/// Demo patient with no history.
pub const DEMO_NEW_PATIENT_ID: &str = "USR123456789";
/// Demo patient with one history entry.
pub const DEMO_RETURNING_PATIENT_ID: &str = "USR987654321";

/// Resolves identifiers to patients. Returns `None` when the id is unknown.
pub trait PatientDirectory: Send + Sync {
    fn resolve(&self, id: &str) -> Option<PatientProfile>;
}

/// Constant lookup table standing in for a real patient service.
#[derive(Debug, Default, Clone, Copy)]
pub struct DemoDirectory;

impl PatientDirectory for DemoDirectory {
    fn resolve(&self, id: &str) -> Option<PatientProfile> {
        match id {
            DEMO_NEW_PATIENT_ID => Some(PatientProfile {
                user_id: DEMO_NEW_PATIENT_ID.into(),
                name: "Ramesh Kumar".into(),
                age: 32,
                gender: "Male".into(),
                origin_state: "Bihar".into(),
                occupation: "Construction Worker".into(),
                contact: "+91 9876543210".into(),
                last_visit: None,
                medical_history: Vec::new(),
            }),
            DEMO_RETURNING_PATIENT_ID => {
                let visit = NaiveDate::from_ymd_opt(2025, 1, 15);
                Some(PatientProfile {
                    user_id: DEMO_RETURNING_PATIENT_ID.into(),
                    name: "Priya Sharma".into(),
                    age: 28,
                    gender: "Female".into(),
                    origin_state: "Uttar Pradesh".into(),
                    occupation: "Domestic Worker".into(),
                    contact: "+91 8765432109".into(),
                    last_visit: visit,
                    medical_history: visit
                        .map(|date| {
                            MedicalRecord::history_entry(
                                date,
                                "Common Cold",
                                "Dr. Anjali Nair",
                                "Rest and fluids",
                            )
                        })
                        .into_iter()
                        .collect(),
                })
            }
            _ => None,
        }
    }
}

/// Demo ids with the hint the search screen shows beside them.
pub fn demo_ids() -> Vec<(&'static str, &'static str)> {
    vec![
        (DEMO_NEW_PATIENT_ID, "Ramesh Kumar - New patient"),
        (DEMO_RETURNING_PATIENT_ID, "Priya Sharma - Has medical history"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returning_patient_has_one_history_entry() {
        let patient = DemoDirectory.resolve(DEMO_RETURNING_PATIENT_ID).unwrap();
        assert_eq!(patient.name, "Priya Sharma");
        assert_eq!(patient.medical_history.len(), 1);
        assert_eq!(patient.medical_history[0].diagnosis, "Common Cold");
        assert_eq!(patient.last_visit_label(), "2025-01-15");
    }

    #[test]
    fn new_patient_has_empty_history() {
        let patient = DemoDirectory.resolve(DEMO_NEW_PATIENT_ID).unwrap();
        assert!(patient.medical_history.is_empty());
        assert_eq!(patient.last_visit_label(), "First visit");
    }

    #[test]
    fn unknown_ids_resolve_to_none() {
        for id in ["", "USR000000000", "usr123456789", " USR123456789"] {
            assert!(DemoDirectory.resolve(id).is_none(), "{id:?} should miss");
        }
    }

    #[test]
    fn demo_ids_are_resolvable() {
        for (id, _) in demo_ids() {
            assert!(DemoDirectory.resolve(id).is_some());
        }
    }
}
