//! Option lists for the registration forms.

use axum::Json;
use serde::Serialize;

use crate::directory;
use crate::forms::{
    DoctorRegistration, FormSpec, RecordEntry, WorkerRegistration, GENDERS, OCCUPATIONS,
    ORIGIN_STATES, SPECIALIZATIONS,
};

#[derive(Serialize)]
pub struct FormDescription {
    pub fields: &'static [&'static str],
    pub required: &'static [&'static str],
}

impl FormDescription {
    fn of<F: FormSpec>() -> Self {
        Self {
            fields: F::FIELDS,
            required: F::REQUIRED,
        }
    }
}

#[derive(Serialize)]
pub struct DemoPatient {
    pub id: &'static str,
    pub hint: &'static str,
}

#[derive(Serialize)]
pub struct OptionsResponse {
    pub genders: &'static [&'static str],
    pub origin_states: &'static [&'static str],
    pub occupations: &'static [&'static str],
    pub specializations: &'static [&'static str],
    pub worker_form: FormDescription,
    pub doctor_form: FormDescription,
    pub record_form: FormDescription,
    pub demo_patients: Vec<DemoPatient>,
}

/// `GET /api/options`: everything the forms need to render.
pub async fn list() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        genders: GENDERS,
        origin_states: ORIGIN_STATES,
        occupations: OCCUPATIONS,
        specializations: SPECIALIZATIONS,
        worker_form: FormDescription::of::<WorkerRegistration>(),
        doctor_form: FormDescription::of::<DoctorRegistration>(),
        record_form: FormDescription::of::<RecordEntry>(),
        demo_patients: directory::demo_ids()
            .into_iter()
            .map(|(id, hint)| DemoPatient { id, hint })
            .collect(),
    })
}
