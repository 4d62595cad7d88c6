//! Doctor verification placeholder.
//!
//! A newly registered doctor is pending. After the configured delay the
//! `verified` flag flips to true. No authority is consulted and nothing
//! here should be read as an approval workflow; `approved_by_admin` stays
//! empty.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::PortalError;
use crate::gateway::{Gateway, Operation};
use crate::models::Doctor;
use crate::portal::Portal;

/// Wait the verification delay, then return the doctor marked verified.
pub async fn simulate_approval(gateway: &Gateway, doctor: Doctor) -> Result<Doctor, PortalError> {
    let mut doctor = gateway.submit(Operation::Verification, doctor).await?;
    doctor.verified = true;
    Ok(doctor)
}

/// Gate for screens only verified doctors may open.
pub fn require_verified(doctor: &Doctor) -> Result<(), PortalError> {
    if doctor.verified {
        Ok(())
    } else {
        Err(PortalError::DoctorNotVerified(doctor.doctor_id.clone()))
    }
}

/// Run verification for `doctor_id` in the background.
pub fn spawn_verification(portal: Arc<Portal>, doctor_id: String) -> JoinHandle<()> {
    tokio::spawn(async move {
        match portal.verify_doctor(&doctor_id).await {
            Ok(_) => tracing::info!(%doctor_id, "Doctor verification completed"),
            Err(e) => tracing::warn!(%doctor_id, "Doctor verification failed: {e}"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pending_doctor() -> Doctor {
        Doctor {
            doctor_id: "DOC123456001".into(),
            name: "Dr. Anjali Nair".into(),
            specialization: "General Medicine".into(),
            license_number: "KMC-1".into(),
            contact: "+91 9000000000".into(),
            qualification: None,
            experience: None,
            email: None,
            work_address: None,
            hospital_affiliation: None,
            verified: false,
            approved_by_admin: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn approval_flips_flag_without_admin() {
        let doctor = simulate_approval(&Gateway::instant(), pending_doctor())
            .await
            .unwrap();
        assert!(doctor.verified);
        assert!(doctor.approved_by_admin.is_none());
    }

    #[tokio::test]
    async fn approval_can_fail_through_gateway() {
        let gateway = Gateway::instant();
        gateway.set_failing(true);
        let err = simulate_approval(&gateway, pending_doctor()).await.unwrap_err();
        assert_eq!(err, PortalError::SimulatedFailure { operation: "verification" });
    }

    #[test]
    fn pending_doctor_is_gated() {
        let doctor = pending_doctor();
        assert_eq!(
            require_verified(&doctor),
            Err(PortalError::DoctorNotVerified("DOC123456001".into()))
        );
        let verified = Doctor {
            verified: true,
            ..doctor
        };
        assert!(require_verified(&verified).is_ok());
    }
}
