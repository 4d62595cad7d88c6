//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{Notice, PortalError};

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<&'static str>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields { fields: Vec<&'static str>, notice: Notice },
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String, Option<Notice>),
    #[error("Doctor not verified")]
    NotVerified(Notice),
    #[error("Simulated failure")]
    RetryLater(Notice),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields, notice) = match self {
            ApiError::MissingFields { fields, notice } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_FIELDS",
                notice.description.clone(),
                fields,
                Some(notice),
            ),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                detail,
                Vec::new(),
                None,
            ),
            ApiError::NotFound(detail, notice) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                detail,
                Vec::new(),
                notice,
            ),
            ApiError::NotVerified(notice) => (
                StatusCode::FORBIDDEN,
                "NOT_VERIFIED",
                notice.description.clone(),
                Vec::new(),
                Some(notice),
            ),
            ApiError::RetryLater(notice) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "RETRY_LATER",
                notice.description.clone(),
                Vec::new(),
                Some(notice),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    Vec::new(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                fields,
            },
            notice,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortalError> for ApiError {
    fn from(err: PortalError) -> Self {
        let notice = err.notice();
        match err {
            PortalError::MissingFields(fields) => ApiError::MissingFields { fields, notice },
            PortalError::UnknownField(_) | PortalError::InvalidValue { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            PortalError::NotFound { .. } => ApiError::NotFound(err.to_string(), Some(notice)),
            PortalError::DoctorNotVerified(_) => ApiError::NotVerified(notice),
            PortalError::SimulatedFailure { .. } => ApiError::RetryLater(notice),
            PortalError::Qr(_) | PortalError::LockPoisoned => ApiError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn json_of(response: Response) -> serde_json::Value {
        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn missing_fields_returns_422_with_field_list() {
        let err: ApiError = PortalError::MissingFields(vec!["name", "age"]).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let json = json_of(response).await;
        assert_eq!(json["error"]["code"], "MISSING_FIELDS");
        assert_eq!(json["error"]["fields"][1], "age");
        assert_eq!(json["notice"]["title"], "Missing Information");
    }

    #[tokio::test]
    async fn patient_not_found_returns_404() {
        let err: ApiError = PortalError::not_found("Patient", "USR1").into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = json_of(response).await;
        assert_eq!(json["notice"]["title"], "Patient Not Found");
    }

    #[tokio::test]
    async fn unverified_doctor_returns_403() {
        let err: ApiError = PortalError::DoctorNotVerified("DOC1".into()).into();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn simulated_failure_returns_503_with_retry_notice() {
        let err: ApiError = PortalError::SimulatedFailure {
            operation: "registration",
        }
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let json = json_of(response).await;
        assert_eq!(json["error"]["message"], "Please try again later");
    }

    #[tokio::test]
    async fn internal_hides_details() {
        let response = ApiError::from(PortalError::LockPoisoned).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_of(response).await;
        assert_eq!(json["error"]["message"], "An internal error occurred");
    }

    #[tokio::test]
    async fn unknown_field_returns_400() {
        let response = ApiError::from(PortalError::UnknownField("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
