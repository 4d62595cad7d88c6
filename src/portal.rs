//! Portal state shared by every screen.
//!
//! `Portal` is constructed once at startup and passed to the HTTP handlers
//! behind an `Arc`. It owns the registered workers and doctors, the records
//! doctors add, the injected patient directory and the simulated gateway.
//! Each operation follows the same shape: validate the form, go through the
//! gateway, then update state and return the snapshot with a notice.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;

use crate::config::PortalConfig;
use crate::directory::{DemoDirectory, PatientDirectory, DEMO_NEW_PATIENT_ID};
use crate::error::{Notice, PortalError, PATIENT_ID_FIELD};
use crate::forms::{DoctorRegistration, FormState, RecordAuthor, RecordEntry, WorkerRegistration};
use crate::gateway::{Gateway, Operation};
use crate::health_card::HealthCard;
use crate::models::{Doctor, MedicalRecord, PatientProfile, Worker};
use crate::records::{RecordBook, RecordCard};
use crate::verification;

/// Result of a successful operation plus the notice to show.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    #[serde(flatten)]
    pub value: T,
    pub notice: Notice,
}

impl<T> Outcome<T> {
    fn new(value: T, notice: Notice) -> Self {
        Self { value, notice }
    }
}

/// Counts for the landing page.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct PortalStats {
    pub workers: usize,
    pub doctors: usize,
    pub verified_doctors: usize,
    pub added_records: usize,
}

pub struct Portal {
    config: PortalConfig,
    gateway: Gateway,
    directory: Arc<dyn PatientDirectory>,
    workers: RwLock<HashMap<String, Worker>>,
    doctors: RwLock<HashMap<String, Doctor>>,
    records: RwLock<RecordBook>,
}

impl Portal {
    /// Portal backed by the demo directory.
    pub fn new(config: PortalConfig) -> Self {
        let gateway = Gateway::new(config.delays);
        Self::with_parts(config, gateway, Arc::new(DemoDirectory))
    }

    pub fn with_parts(
        config: PortalConfig,
        gateway: Gateway,
        directory: Arc<dyn PatientDirectory>,
    ) -> Self {
        Self {
            config,
            gateway,
            directory,
            workers: RwLock::new(HashMap::new()),
            doctors: RwLock::new(HashMap::new()),
            records: RwLock::new(RecordBook::new()),
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    // ── Lock helpers ────────────────────────────────────────

    fn read_workers(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Worker>>, PortalError> {
        self.workers.read().map_err(|_| PortalError::LockPoisoned)
    }

    fn read_doctors(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Doctor>>, PortalError> {
        self.doctors.read().map_err(|_| PortalError::LockPoisoned)
    }

    fn write_doctors(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Doctor>>, PortalError> {
        self.doctors.write().map_err(|_| PortalError::LockPoisoned)
    }

    // ── Worker flow ─────────────────────────────────────────

    pub async fn register_worker(
        &self,
        form: &FormState<WorkerRegistration>,
    ) -> Result<Outcome<Worker>, PortalError> {
        let worker = form.submit(&())?;
        let worker = self.gateway.submit(Operation::Registration, worker).await?;

        self.workers
            .write()
            .map_err(|_| PortalError::LockPoisoned)?
            .insert(worker.user_id.clone(), worker.clone());

        tracing::info!(user_id = %worker.user_id, "Worker registered");

        let notice = Notice::success(
            "Registration Successful!",
            format!("Welcome to HealthCard Kerala! Your ID is {}", worker.user_id),
        );
        Ok(Outcome::new(worker, notice))
    }

    pub fn worker(&self, user_id: &str) -> Result<Worker, PortalError> {
        self.read_workers()?
            .get(user_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("Worker", user_id))
    }

    pub fn health_card(&self, user_id: &str) -> Result<HealthCard, PortalError> {
        let worker = self.worker(user_id)?;
        HealthCard::for_worker(&worker, &self.config.qr)
    }

    /// Records screen for a registered worker or a directory patient.
    pub fn worker_records(&self, user_id: &str) -> Result<Vec<RecordCard>, PortalError> {
        let known = self.read_workers()?.contains_key(user_id)
            || self.directory.resolve(user_id).is_some();
        if !known {
            return Err(PortalError::not_found("Worker", user_id));
        }
        let records = self.records.read().map_err(|_| PortalError::LockPoisoned)?;
        Ok(records.records_for(user_id))
    }

    // ── Doctor flow ─────────────────────────────────────────

    pub async fn register_doctor(
        &self,
        form: &FormState<DoctorRegistration>,
    ) -> Result<Outcome<Doctor>, PortalError> {
        let doctor = form.submit(&())?;
        let doctor = self.gateway.submit(Operation::Registration, doctor).await?;

        self.write_doctors()?
            .insert(doctor.doctor_id.clone(), doctor.clone());

        tracing::info!(doctor_id = %doctor.doctor_id, "Doctor registered, awaiting verification");

        let notice = Notice::success(
            "Registration Submitted!",
            format!(
                "Your application has been submitted for verification. Doctor ID: {}",
                doctor.doctor_id
            ),
        );
        Ok(Outcome::new(doctor, notice))
    }

    pub fn doctor(&self, doctor_id: &str) -> Result<Doctor, PortalError> {
        self.read_doctors()?
            .get(doctor_id)
            .cloned()
            .ok_or_else(|| PortalError::not_found("Doctor", doctor_id))
    }

    /// Run the placeholder verification for a registered doctor.
    pub async fn verify_doctor(&self, doctor_id: &str) -> Result<Doctor, PortalError> {
        let pending = self.doctor(doctor_id)?;
        let verified = verification::simulate_approval(&self.gateway, pending).await?;

        let mut doctors = self.write_doctors()?;
        let entry = doctors
            .get_mut(doctor_id)
            .ok_or_else(|| PortalError::not_found("Doctor", doctor_id))?;
        entry.verified = verified.verified;
        Ok(entry.clone())
    }

    fn verified_doctor(&self, doctor_id: &str) -> Result<Doctor, PortalError> {
        let doctor = self.doctor(doctor_id)?;
        verification::require_verified(&doctor)?;
        Ok(doctor)
    }

    /// Look a patient up by health id on behalf of a verified doctor.
    pub async fn lookup_patient(
        &self,
        doctor_id: &str,
        patient_id: &str,
    ) -> Result<Outcome<PatientProfile>, PortalError> {
        self.verified_doctor(doctor_id)?;

        let patient_id = patient_id.trim();
        if patient_id.is_empty() {
            return Err(PortalError::MissingFields(vec![PATIENT_ID_FIELD]));
        }

        self.gateway.submit(Operation::Lookup, ()).await?;

        let patient = self.directory.resolve(patient_id).ok_or_else(|| {
            tracing::info!(%doctor_id, %patient_id, "Patient lookup missed");
            PortalError::not_found("Patient", patient_id)
        })?;

        tracing::info!(%doctor_id, %patient_id, "Patient lookup resolved");
        let notice = Notice::success(
            "Patient Found!",
            format!("Retrieved records for {}", patient.name),
        );
        Ok(Outcome::new(patient, notice))
    }

    /// Simulated camera scan; always reads the demo new-patient card.
    pub async fn scan_patient(
        &self,
        doctor_id: &str,
    ) -> Result<Outcome<PatientProfile>, PortalError> {
        self.verified_doctor(doctor_id)?;
        self.gateway.submit(Operation::Scan, ()).await?;
        self.lookup_patient(doctor_id, DEMO_NEW_PATIENT_ID).await
    }

    /// Add a record to a directory patient's history.
    ///
    /// The draft is cleared once the record is stored; on any error it is
    /// left as typed.
    pub async fn add_record(
        &self,
        doctor_id: &str,
        patient_id: &str,
        form: &mut FormState<RecordEntry>,
    ) -> Result<Outcome<MedicalRecord>, PortalError> {
        let doctor = self.verified_doctor(doctor_id)?;
        let patient_id = patient_id.trim();
        if self.directory.resolve(patient_id).is_none() {
            return Err(PortalError::not_found("Patient", patient_id));
        }

        let record = form.submit(&RecordAuthor::from(&doctor))?;
        let record = self.gateway.submit(Operation::RecordSave, record).await?;

        self.records
            .write()
            .map_err(|_| PortalError::LockPoisoned)?
            .append(patient_id, record.clone());
        form.clear();

        tracing::info!(
            %doctor_id,
            %patient_id,
            record_id = record.id.as_deref().unwrap_or_default(),
            "Medical record added"
        );

        let notice = Notice::success(
            "Record Added Successfully",
            "Medical record has been saved to patient's history",
        );
        Ok(Outcome::new(record, notice))
    }

    pub fn stats(&self) -> Result<PortalStats, PortalError> {
        let workers = self.read_workers()?.len();
        let doctors = self.read_doctors()?;
        let added_records = self
            .records
            .read()
            .map_err(|_| PortalError::LockPoisoned)?
            .total();
        Ok(PortalStats {
            workers,
            doctors: doctors.len(),
            verified_doctors: doctors.values().filter(|d| d.verified).count(),
            added_records,
        })
    }
}
