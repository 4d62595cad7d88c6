//! Doctor flow endpoints.
//!
//! - `POST /api/doctors`: register (verification runs in the background)
//! - `GET /api/doctors/:id`: status
//! - `GET /api/doctors/:id/patients/:patient_id`: search by health id
//! - `POST /api/doctors/:id/scan`: simulated QR scan
//! - `POST /api/doctors/:id/patients/:patient_id/records`: add a record

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, FormFields};
use crate::forms::{DoctorRegistration, FormState, RecordEntry};
use crate::models::{Doctor, MedicalRecord, PatientProfile, VerificationStatus};
use crate::portal::Outcome;
use crate::verification;

/// `POST /api/doctors`: submit the registration form.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(fields): Json<FormFields>,
) -> Result<Json<Outcome<Doctor>>, ApiError> {
    let form = FormState::<DoctorRegistration>::from_fields(fields)?;
    let outcome = ctx.portal.register_doctor(&form).await?;

    verification::spawn_verification(ctx.portal.clone(), outcome.value.doctor_id.clone());

    Ok(Json(outcome))
}

#[derive(Serialize)]
pub struct DoctorStatusResponse {
    pub doctor: Doctor,
    pub status: VerificationStatus,
}

/// `GET /api/doctors/:id`
pub async fn status(
    State(ctx): State<ApiContext>,
    Path(doctor_id): Path<String>,
) -> Result<Json<DoctorStatusResponse>, ApiError> {
    let doctor = ctx.portal.doctor(&doctor_id)?;
    Ok(Json(DoctorStatusResponse {
        status: doctor.status(),
        doctor,
    }))
}

/// `GET /api/doctors/:id/patients/:patient_id`
pub async fn lookup(
    State(ctx): State<ApiContext>,
    Path((doctor_id, patient_id)): Path<(String, String)>,
) -> Result<Json<Outcome<PatientProfile>>, ApiError> {
    Ok(Json(ctx.portal.lookup_patient(&doctor_id, &patient_id).await?))
}

/// `POST /api/doctors/:id/scan`
pub async fn scan(
    State(ctx): State<ApiContext>,
    Path(doctor_id): Path<String>,
) -> Result<Json<Outcome<PatientProfile>>, ApiError> {
    Ok(Json(ctx.portal.scan_patient(&doctor_id).await?))
}

/// `POST /api/doctors/:id/patients/:patient_id/records`
pub async fn add_record(
    State(ctx): State<ApiContext>,
    Path((doctor_id, patient_id)): Path<(String, String)>,
    Json(fields): Json<FormFields>,
) -> Result<Json<Outcome<MedicalRecord>>, ApiError> {
    let mut form = FormState::<RecordEntry>::from_fields(fields)?;
    Ok(Json(ctx.portal.add_record(&doctor_id, &patient_id, &mut form).await?))
}
