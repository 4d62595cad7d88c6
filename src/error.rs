//! Domain errors for the portal.
//!
//! Two kinds matter to the user: a required field was left empty, or a
//! simulated operation failed. The remaining variants cover lookups that
//! miss and requests the portal cannot honour.

use serde::Serialize;
use thiserror::Error;

/// Field name reported when a lookup is submitted without a patient id.
pub const PATIENT_ID_FIELD: &str = "patient_id";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortalError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Simulated {operation} failed")]
    SimulatedFailure { operation: &'static str },

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Doctor {0} is awaiting verification")]
    DoctorNotVerified(String),

    #[error("QR generation failed: {0}")]
    Qr(String),

    #[error("Lock poisoned")]
    LockPoisoned,
}

impl PortalError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// The toast the user sees for this error.
    pub fn notice(&self) -> Notice {
        match self {
            Self::MissingFields(fields) if fields.as_slice() == [PATIENT_ID_FIELD] => {
                Notice::destructive("Missing Patient ID", "Please enter a valid patient ID")
            }
            Self::MissingFields(_) | Self::UnknownField(_) | Self::InvalidValue { .. } => {
                Notice::destructive("Missing Information", self.to_string())
            }
            Self::NotFound { kind: "Patient", .. } => {
                Notice::destructive("Patient Not Found", "Please check the ID and try again")
            }
            Self::NotFound { .. } => Notice::destructive("Not Found", self.to_string()),
            Self::DoctorNotVerified(_) => Notice::destructive(
                "Verification in Progress",
                "You'll be able to access patient records once verified.",
            ),
            Self::SimulatedFailure { .. } | Self::Qr(_) | Self::LockPoisoned => {
                Notice::destructive("Something Went Wrong", "Please try again later")
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════
// User-facing notices
// ═══════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Title + description pair shown to the user after an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub variant: NoticeVariant,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NoticeVariant::Destructive,
        }
    }
}
