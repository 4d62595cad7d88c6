//! Role landing and role pages.

use axum::extract::{Path, State};
use axum::response::Html;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::config;
use crate::forms::{DoctorRegistration, FormSpec, WorkerRegistration};
use crate::health_card::escape_html;
use crate::models::Role;

/// `GET /`: pick a role.
pub async fn landing(State(ctx): State<ApiContext>) -> Result<Html<String>, ApiError> {
    let stats = ctx.portal.stats()?;

    let cards: String = [
        (Role::Worker, "Register and manage your health records"),
        (Role::Doctor, "Access patient records and provide care"),
    ]
    .iter()
    .map(|(role, blurb)| {
        format!(
            "<a class=\"card\" href=\"/{}\"><h3>{}</h3><p>{}</p><span>Get Started</span></a>",
            role.as_str(),
            role.label(),
            blurb,
        )
    })
    .collect();

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{name}</title></head>
<body>
<header><h1>{name}</h1></header>
<h2>Your Health, Your Records</h2>
<p>Secure digital health record management system for migrant workers in Kerala.
Access your medical history anywhere, anytime.</p>
<nav>{cards}</nav>
<footer>{workers} workers · {doctors} doctors registered · v{version}</footer>
</body>
</html>"#,
        name = config::APP_NAME,
        cards = cards,
        workers = stats.workers,
        doctors = stats.doctors,
        version = config::APP_VERSION,
    )))
}

/// `GET /:role`: describe the flow for one role.
pub async fn role_page(Path(role): Path<String>) -> Result<Html<String>, ApiError> {
    let role: Role = role
        .parse()
        .map_err(|_| ApiError::NotFound(format!("No such role: {role}"), None))?;

    let (fields, required, action, title) = match role {
        Role::Worker => (
            WorkerRegistration::FIELDS,
            WorkerRegistration::REQUIRED,
            "/api/workers",
            "Worker Registration",
        ),
        Role::Doctor => (
            DoctorRegistration::FIELDS,
            DoctorRegistration::REQUIRED,
            "/api/doctors",
            "Doctor Registration",
        ),
    };

    let items: String = fields
        .iter()
        .map(|field| {
            let marker = if required.contains(field) { " *" } else { "" };
            format!("<li><code>{}</code>{marker}</li>", escape_html(field))
        })
        .collect();

    Ok(Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<a href="/">Back</a>
<h1>{title}</h1>
<p>Submit a JSON object with these fields to <code>POST {action}</code> (* = required):</p>
<ul>{items}</ul>
</body>
</html>"#
    )))
}
