pub mod doctor;
pub mod enums;
pub mod patient;
pub mod record;
pub mod worker;

pub use doctor::Doctor;
pub use enums::{BadgeVariant, CareType, RecordStatus, Role, VerificationStatus};
pub use patient::PatientProfile;
pub use record::MedicalRecord;
pub use worker::Worker;
