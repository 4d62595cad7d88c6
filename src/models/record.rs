use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{CareType, RecordStatus};

/// A single diagnosis/treatment/prescription entry owned by one registrant.
///
/// There is no update or delete path: records are created once, by a
/// doctor through the record form, or come from the demo datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    pub doctor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital: Option<String>,
    pub diagnosis: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symptoms: Option<String>,
    pub treatment: String,
    #[serde(default)]
    pub prescriptions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Follow-up date as entered; only presence is checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RecordStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub care_type: Option<CareType>,
}

impl MedicalRecord {
    /// Minimal history entry as the patient directory stores them.
    pub fn history_entry(date: NaiveDate, diagnosis: &str, doctor: &str, treatment: &str) -> Self {
        Self {
            id: None,
            date,
            doctor: doctor.into(),
            hospital: None,
            diagnosis: diagnosis.into(),
            symptoms: None,
            treatment: treatment.into(),
            prescriptions: Vec::new(),
            notes: None,
            follow_up: None,
            status: None,
            care_type: None,
        }
    }
}

/// Split free-text prescriptions into one entry per non-blank line.
pub fn parse_prescriptions(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prescriptions_split_per_line() {
        let parsed = parse_prescriptions("Paracetamol 500mg - TDS\n\n  Cough syrup - BDS  \n");
        assert_eq!(parsed, vec!["Paracetamol 500mg - TDS", "Cough syrup - BDS"]);
    }

    #[test]
    fn blank_prescriptions_are_empty() {
        assert!(parse_prescriptions("   \n ").is_empty());
    }

    #[test]
    fn history_entry_omits_optional_fields_in_json() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let record = MedicalRecord::history_entry(date, "Common Cold", "Dr. Anjali Nair", "Rest and fluids");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2025-01-15");
        assert!(json.get("hospital").is_none());
        assert!(json.get("follow_up").is_none());
    }
}
