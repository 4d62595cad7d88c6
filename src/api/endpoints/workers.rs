//! Worker flow endpoints.
//!
//! - `POST /api/workers`: register
//! - `GET /api/workers/:id`: details
//! - `GET /api/workers/:id/card`: printable health card
//! - `GET /api/workers/:id/qr.png`: QR download
//! - `GET /api/workers/:id/records`: health records

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, FormFields};
use crate::forms::{FormState, WorkerRegistration};
use crate::health_card::{self, HealthCard};
use crate::models::Worker;
use crate::portal::Outcome;
use crate::records::RecordCard;

#[derive(Serialize)]
pub struct RegisteredWorker {
    pub worker: Worker,
    pub card: HealthCard,
}

/// `POST /api/workers`: submit the registration form.
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(fields): Json<FormFields>,
) -> Result<Json<Outcome<RegisteredWorker>>, ApiError> {
    let form = FormState::<WorkerRegistration>::from_fields(fields)?;
    let outcome = ctx.portal.register_worker(&form).await?;
    let card = HealthCard::for_worker(&outcome.value, &ctx.portal.config().qr)?;

    Ok(Json(Outcome {
        value: RegisteredWorker {
            worker: outcome.value,
            card,
        },
        notice: outcome.notice,
    }))
}

/// `GET /api/workers/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<Worker>, ApiError> {
    Ok(Json(ctx.portal.worker(&user_id)?))
}

/// `GET /api/workers/:id/card`: HTML card for viewing and printing.
pub async fn card(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    Ok(Html(ctx.portal.health_card(&user_id)?.to_html()))
}

/// `GET /api/workers/:id/qr.png`: QR image as a download.
pub async fn qr_png(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let worker = ctx.portal.worker(&user_id)?;
    let options = &ctx.portal.config().qr;
    let png = health_card::render_png(&worker.user_id, options.size * 2, options)?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        health_card::download_filename(&worker.user_id)
    );
    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        png,
    ))
}

#[derive(Serialize)]
pub struct RecordsResponse {
    pub user_id: String,
    pub records: Vec<RecordCard>,
}

/// `GET /api/workers/:id/records`
pub async fn records(
    State(ctx): State<ApiContext>,
    Path(user_id): Path<String>,
) -> Result<Json<RecordsResponse>, ApiError> {
    let records = ctx.portal.worker_records(&user_id)?;
    Ok(Json(RecordsResponse { user_id, records }))
}
