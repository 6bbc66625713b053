use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {field} value: {value:?}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
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
    Unset => "unset",
    Doctor => "doctor",
    Patient => "patient",
});

str_enum!(Page {
    Welcome => "welcome",
    Main => "main",
});

str_enum!(NoticeLevel {
    Success => "success",
    Info => "info",
    Warning => "warning",
    Error => "error",
});

str_enum!(DosageTier {
    Elderly => "elderly",
    LowWeight => "low_weight",
    Standard => "standard",
});

impl Role {
    /// Title used in greetings ("Doctor", "Patient").
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Doctor => Some("Doctor"),
            Self::Patient => Some("Patient"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!(Role::from_str("Doctor").unwrap(), Role::Doctor);
        assert_eq!(Role::from_str(" patient ").unwrap(), Role::Patient);
    }

    #[test]
    fn unknown_role_rejected() {
        let err = Role::from_str("nurse").unwrap_err();
        assert_eq!(err.field, "Role");
        assert_eq!(err.value, "nurse");
    }

    #[test]
    fn dosage_tier_serializes_snake_case() {
        let json = serde_json::to_string(&DosageTier::LowWeight).unwrap();
        assert_eq!(json, "\"low_weight\"");
        assert_eq!(DosageTier::LowWeight.as_str(), "low_weight");
    }

    #[test]
    fn notice_level_display() {
        assert_eq!(NoticeLevel::Warning.to_string(), "warning");
    }
}
