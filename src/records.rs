//! Health records shown to workers, plus records added by doctors.
//!
//! The worker's records screen always starts from the demo history.
//! Records doctors add are appended per patient and never change after.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{BadgeVariant, CareType, MedicalRecord, RecordStatus};

/// Demo history every worker's records screen shows.
pub fn demo_health_records() -> Vec<MedicalRecord> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
    vec![
        MedicalRecord {
            id: Some("REC001".into()),
            date: date(2025, 1, 15),
            doctor: "Dr. Anjali Nair".into(),
            hospital: Some("Kerala Medical College".into()),
            diagnosis: "Annual Health Checkup".into(),
            symptoms: None,
            treatment: "Routine examination, Blood tests".into(),
            prescriptions: vec![
                "Vitamin D3 - 1000 IU daily".into(),
                "Multivitamin - Once daily".into(),
            ],
            notes: None,
            follow_up: Some("2025-07-15".into()),
            status: Some(RecordStatus::Completed),
            care_type: Some(CareType::PreventiveCare),
        },
        MedicalRecord {
            id: Some("REC002".into()),
            date: date(2024, 12, 10),
            doctor: "Dr. Rajesh Kumar".into(),
            hospital: Some("Government General Hospital".into()),
            diagnosis: "Common Cold, Mild Fever".into(),
            symptoms: None,
            treatment: "Rest, Hydration, Symptomatic treatment".into(),
            prescriptions: vec![
                "Paracetamol 500mg - TDS".into(),
                "Cough syrup - BDS".into(),
            ],
            notes: None,
            follow_up: None,
            status: Some(RecordStatus::Completed),
            care_type: Some(CareType::AcuteCare),
        },
    ]
}

/// Record plus the badge variants the records screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct RecordCard {
    #[serde(flatten)]
    pub record: MedicalRecord,
    pub status_badge: BadgeVariant,
    pub care_type_label: Option<&'static str>,
    pub care_type_badge: BadgeVariant,
}

impl From<MedicalRecord> for RecordCard {
    fn from(record: MedicalRecord) -> Self {
        let status_badge = record
            .status
            .map(|s| s.badge())
            .unwrap_or(BadgeVariant::Outline);
        let care_type_label = record.care_type.map(|c| c.label());
        let care_type_badge = record
            .care_type
            .map(|c| c.badge())
            .unwrap_or(BadgeVariant::Outline);
        Self {
            record,
            status_badge,
            care_type_label,
            care_type_badge,
        }
    }
}

/// Append-only store of records added by doctors, keyed by patient id.
#[derive(Debug, Default)]
pub struct RecordBook {
    by_patient: HashMap<String, Vec<MedicalRecord>>,
}

impl RecordBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, patient_id: &str, record: MedicalRecord) {
        self.by_patient
            .entry(patient_id.to_string())
            .or_default()
            .push(record);
    }

    pub fn added_for(&self, patient_id: &str) -> &[MedicalRecord] {
        self.by_patient
            .get(patient_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Demo history followed by records added for this patient.
    pub fn records_for(&self, patient_id: &str) -> Vec<RecordCard> {
        demo_health_records()
            .into_iter()
            .chain(self.added_for(patient_id).iter().cloned())
            .map(RecordCard::from)
            .collect()
    }

    pub fn total(&self) -> usize {
        self.by_patient.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn added(diagnosis: &str) -> MedicalRecord {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        MedicalRecord::history_entry(date, diagnosis, "Dr. Test", "Rest")
    }

    #[test]
    fn demo_history_has_two_completed_records() {
        let records = demo_health_records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id.as_deref(), Some("REC001"));
        assert_eq!(records[0].follow_up.as_deref(), Some("2025-07-15"));
        assert!(records[1].follow_up.is_none());
        assert!(records.iter().all(|r| r.status == Some(RecordStatus::Completed)));
    }

    #[test]
    fn records_for_appends_after_demo_history() {
        let mut book = RecordBook::new();
        book.append("USR111111111", added("Viral Fever"));

        let cards = book.records_for("USR111111111");
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].record.diagnosis, "Viral Fever");

        assert_eq!(book.records_for("USR222222222").len(), 2);
        assert_eq!(book.total(), 1);
    }

    #[test]
    fn cards_carry_badges() {
        let cards = RecordBook::new().records_for("any");
        assert_eq!(cards[0].status_badge, BadgeVariant::Default);
        assert_eq!(cards[0].care_type_label, Some("Preventive Care"));
        assert_eq!(cards[0].care_type_badge, BadgeVariant::Secondary);
        assert_eq!(cards[1].care_type_badge, BadgeVariant::Outline);
    }

    #[test]
    fn card_serializes_flat() {
        let card = RecordCard::from(added("Cough"));
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["diagnosis"], "Cough");
        assert_eq!(json["status_badge"], "outline");
    }
}
