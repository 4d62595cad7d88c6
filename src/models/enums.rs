use serde::{Deserialize, Serialize};

use crate::error::PortalError;

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = PortalError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(PortalError::InvalidValue {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(Role {
    Worker => "worker",
    Doctor => "doctor",
});

str_enum!(RecordStatus {
    Completed => "completed",
    Ongoing => "ongoing",
    Pending => "pending",
});

str_enum!(CareType {
    PreventiveCare => "preventive_care",
    AcuteCare => "acute_care",
    ChronicCare => "chronic_care",
});

str_enum!(BadgeVariant {
    Default => "default",
    Secondary => "secondary",
    Outline => "outline",
    Destructive => "destructive",
});

str_enum!(VerificationStatus {
    Pending => "pending",
    Verified => "verified",
});

impl Role {
    /// Identifier prefix for registrants of this role.
    pub const fn id_prefix(&self) -> &'static str {
        match self {
            Self::Worker => crate::identifier::WORKER_PREFIX,
            Self::Doctor => crate::identifier::DOCTOR_PREFIX,
        }
    }

    /// Human label shown on the landing page.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Worker => "Migrant Worker",
            Self::Doctor => "Healthcare Provider",
        }
    }
}

impl RecordStatus {
    pub fn badge(&self) -> BadgeVariant {
        match self {
            Self::Completed => BadgeVariant::Default,
            Self::Ongoing => BadgeVariant::Secondary,
            Self::Pending => BadgeVariant::Outline,
        }
    }
}

impl CareType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PreventiveCare => "Preventive Care",
            Self::AcuteCare => "Acute Care",
            Self::ChronicCare => "Chronic Care",
        }
    }

    pub fn badge(&self) -> BadgeVariant {
        match self {
            Self::PreventiveCare => BadgeVariant::Secondary,
            Self::AcuteCare => BadgeVariant::Outline,
            Self::ChronicCare => BadgeVariant::Destructive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trip() {
        for (variant, s) in [(Role::Worker, "worker"), (Role::Doctor, "doctor")] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Role::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn role_prefixes() {
        assert_eq!(Role::Worker.id_prefix(), "USR");
        assert_eq!(Role::Doctor.id_prefix(), "DOC");
    }

    #[test]
    fn unknown_role_is_invalid_value() {
        let err = Role::from_str("admin").unwrap_err();
        assert!(matches!(err, PortalError::InvalidValue { ref field, .. } if field == "Role"));
    }

    #[test]
    fn status_badges() {
        assert_eq!(RecordStatus::Completed.badge(), BadgeVariant::Default);
        assert_eq!(RecordStatus::Ongoing.badge(), BadgeVariant::Secondary);
        assert_eq!(RecordStatus::Pending.badge(), BadgeVariant::Outline);
    }

    #[test]
    fn care_type_badges() {
        assert_eq!(CareType::PreventiveCare.badge(), BadgeVariant::Secondary);
        assert_eq!(CareType::AcuteCare.badge(), BadgeVariant::Outline);
        assert_eq!(CareType::ChronicCare.badge(), BadgeVariant::Destructive);
    }

    #[test]
    fn serializes_as_snake_case_string() {
        let json = serde_json::to_string(&CareType::AcuteCare).unwrap();
        assert_eq!(json, "\"acute_care\"");
    }
}
