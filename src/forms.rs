//! Form state holders for the three data-entry screens.
//!
//! A `FormState` keeps the draft as a map of field name to the string the
//! user typed. Submitting checks that every required field is non-blank and,
//! if so, emits an immutable snapshot stamped with a fresh identifier and
//! creation time. Nothing else is validated.

use std::collections::HashMap;
use std::marker::PhantomData;

use chrono::{DateTime, Utc};

use crate::error::PortalError;
use crate::identifier::{self, RECORD_PREFIX};
use crate::models::record::parse_prescriptions;
use crate::models::{Doctor, MedicalRecord, RecordStatus, Role, Worker};

// ═══════════════════════════════════════════
// Option lists shown by the registration screens
// ═══════════════════════════════════════════

pub const GENDERS: &[&str] = &["Male", "Female", "Other"];

pub const ORIGIN_STATES: &[&str] = &[
    "Andhra Pradesh", "Bihar", "Chhattisgarh", "Gujarat", "Haryana",
    "Jharkhand", "Karnataka", "Madhya Pradesh", "Maharashtra", "Odisha",
    "Punjab", "Rajasthan", "Tamil Nadu", "Telangana", "Uttar Pradesh",
    "West Bengal", "Other",
];

pub const OCCUPATIONS: &[&str] = &[
    "Construction Worker", "Domestic Worker", "Factory Worker", "Farm Worker",
    "Security Guard", "Driver", "Cleaner", "Cook", "Shopkeeper", "Other",
];

pub const SPECIALIZATIONS: &[&str] = &[
    "General Medicine", "Pediatrics", "Cardiology", "Dermatology",
    "Orthopedics", "Gynecology", "Psychiatry", "Surgery",
    "Emergency Medicine", "Family Medicine", "Other",
];

// ═══════════════════════════════════════════
// Form contract
// ═══════════════════════════════════════════

/// Identifier and timestamp attached to a snapshot on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issued {
    pub id: String,
    pub at: DateTime<Utc>,
}

impl Issued {
    pub fn now(prefix: &str) -> Self {
        let at = Utc::now();
        Self {
            id: identifier::generate_id_at(prefix, at, &mut rand::thread_rng()),
            at,
        }
    }
}

/// Describes one form: its fields, which are required, and what it emits.
pub trait FormSpec {
    /// Prefix of the identifier stamped on the snapshot.
    const ID_PREFIX: &'static str;
    /// Every field the form accepts, in display order.
    const FIELDS: &'static [&'static str];
    /// Fields that must be non-blank for submit to succeed.
    const REQUIRED: &'static [&'static str];

    /// Extra data the snapshot needs that the user does not type.
    type Context;
    type Output;

    fn build(values: &FieldValues, issued: Issued, ctx: &Self::Context) -> Self::Output;
}

/// Draft values keyed by canonical field name.
#[derive(Debug, Clone, Default)]
pub struct FieldValues(HashMap<&'static str, String>);

impl FieldValues {
    /// Trimmed value, empty when unset.
    pub fn text(&self, field: &str) -> String {
        self.0.get(field).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    /// Trimmed value, `None` when unset or blank.
    pub fn optional(&self, field: &str) -> Option<String> {
        Some(self.text(field)).filter(|v| !v.is_empty())
    }

    fn raw(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }
}

/// Controlled form state for a [`FormSpec`].
#[derive(Debug, Clone)]
pub struct FormState<F: FormSpec> {
    values: FieldValues,
    _spec: PhantomData<fn() -> F>,
}

impl<F: FormSpec> Default for FormState<F> {
    fn default() -> Self {
        Self {
            values: FieldValues::default(),
            _spec: PhantomData,
        }
    }
}

impl<F: FormSpec> FormState<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a draft from name/value pairs, rejecting unknown names.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self, PortalError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (name, value) in fields {
            form.set(name.as_ref(), value)?;
        }
        Ok(form)
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<(), PortalError> {
        let key = F::FIELDS
            .iter()
            .copied()
            .find(|f| *f == field)
            .ok_or_else(|| PortalError::UnknownField(field.to_string()))?;
        self.values.0.insert(key, value.into());
        Ok(())
    }

    /// Current value exactly as typed.
    pub fn get(&self, field: &str) -> &str {
        self.values.raw(field)
    }

    /// Required fields that are still blank, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        F::REQUIRED
            .iter()
            .copied()
            .filter(|f| self.values.raw(f).trim().is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), PortalError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PortalError::MissingFields(missing))
        }
    }

    /// Validate and emit a snapshot stamped now.
    pub fn submit(&self, ctx: &F::Context) -> Result<F::Output, PortalError> {
        self.validate()?;
        Ok(F::build(&self.values, Issued::now(F::ID_PREFIX), ctx))
    }

    /// Validate and emit a snapshot with a caller-chosen stamp.
    pub fn submit_with(&self, issued: Issued, ctx: &F::Context) -> Result<F::Output, PortalError> {
        self.validate()?;
        Ok(F::build(&self.values, issued, ctx))
    }

    pub fn clear(&mut self) {
        self.values.0.clear();
    }
}

// ═══════════════════════════════════════════
// Worker registration
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct WorkerRegistration;

impl FormSpec for WorkerRegistration {
    const ID_PREFIX: &'static str = Role::Worker.id_prefix();
    const FIELDS: &'static [&'static str] = &[
        "name",
        "age",
        "gender",
        "contact",
        "origin_state",
        "occupation",
        "address",
        "emergency_contact_name",
        "emergency_contact",
    ];
    const REQUIRED: &'static [&'static str] = &["name", "age", "gender", "contact"];

    type Context = ();
    type Output = Worker;

    fn build(values: &FieldValues, issued: Issued, _ctx: &()) -> Worker {
        Worker {
            qr_code_file: format!("qr-code-{}.png", issued.id),
            user_id: issued.id,
            name: values.text("name"),
            age: values.text("age"),
            gender: values.text("gender"),
            contact: values.text("contact"),
            origin_state: values.optional("origin_state"),
            occupation: values.optional("occupation"),
            address: values.optional("address"),
            emergency_contact_name: values.optional("emergency_contact_name"),
            emergency_contact: values.optional("emergency_contact"),
            created_at: issued.at,
        }
    }
}

// ═══════════════════════════════════════════
// Doctor registration
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct DoctorRegistration;

impl FormSpec for DoctorRegistration {
    const ID_PREFIX: &'static str = Role::Doctor.id_prefix();
    const FIELDS: &'static [&'static str] = &[
        "name",
        "specialization",
        "license_number",
        "contact",
        "qualification",
        "experience",
        "email",
        "work_address",
        "hospital_affiliation",
    ];
    const REQUIRED: &'static [&'static str] =
        &["name", "specialization", "license_number", "contact"];

    type Context = ();
    type Output = Doctor;

    fn build(values: &FieldValues, issued: Issued, _ctx: &()) -> Doctor {
        Doctor {
            doctor_id: issued.id,
            name: values.text("name"),
            specialization: values.text("specialization"),
            license_number: values.text("license_number"),
            contact: values.text("contact"),
            qualification: values.optional("qualification"),
            experience: values.optional("experience"),
            email: values.optional("email"),
            work_address: values.optional("work_address"),
            hospital_affiliation: values.optional("hospital_affiliation"),
            verified: false,
            approved_by_admin: None,
            created_at: issued.at,
        }
    }
}

// ═══════════════════════════════════════════
// Adding a record to a patient
// ═══════════════════════════════════════════

#[derive(Debug, Clone, Copy)]
pub struct RecordEntry;

/// Who is writing the record.
#[derive(Debug, Clone)]
pub struct RecordAuthor {
    pub doctor: String,
    pub hospital: Option<String>,
}

impl From<&Doctor> for RecordAuthor {
    fn from(doctor: &Doctor) -> Self {
        Self {
            doctor: doctor.display_name(),
            hospital: doctor.hospital_affiliation.clone(),
        }
    }
}

impl FormSpec for RecordEntry {
    const ID_PREFIX: &'static str = RECORD_PREFIX;
    const FIELDS: &'static [&'static str] = &[
        "diagnosis",
        "symptoms",
        "treatment",
        "prescriptions",
        "notes",
        "follow_up_date",
    ];
    const REQUIRED: &'static [&'static str] = &["diagnosis"];

    type Context = RecordAuthor;
    type Output = MedicalRecord;

    fn build(values: &FieldValues, issued: Issued, author: &RecordAuthor) -> MedicalRecord {
        MedicalRecord {
            id: Some(issued.id),
            date: issued.at.date_naive(),
            doctor: author.doctor.clone(),
            hospital: author.hospital.clone(),
            diagnosis: values.text("diagnosis"),
            symptoms: values.optional("symptoms"),
            treatment: values.text("treatment"),
            prescriptions: parse_prescriptions(&values.text("prescriptions")),
            notes: values.optional("notes"),
            follow_up: values.optional("follow_up_date"),
            status: Some(RecordStatus::Completed),
            care_type: None,
        }
    }
}
