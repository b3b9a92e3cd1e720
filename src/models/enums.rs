use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
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

str_enum!(Gender {
    Male => "Male",
    Female => "Female",
    Other => "Other",
});

str_enum!(Position {
    Doctor => "Doctor",
    Nurse => "Nurse",
});

str_enum!(ExamResult {
    Healthy => "Healthy",
    Corona => "Corona",
    Botism => "Botism",
    Dead => "Dead",
});

impl ExamResult {
    /// Results that do not count as an ongoing illness.
    pub const NOT_SICK: &'static [Self] = &[Self::Healthy, Self::Dead];

    pub fn is_sick(&self) -> bool {
        !Self::NOT_SICK.contains(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn enum_round_trips_through_str() {
        for result in ExamResult::ALL {
            assert_eq!(ExamResult::from_str(result.as_str()).unwrap(), *result);
        }
        assert_eq!(Position::from_str("Nurse").unwrap(), Position::Nurse);
        assert_eq!(Gender::Other.to_string(), "Other");
    }

    #[test]
    fn unknown_value_is_invalid_enum() {
        let err = Position::from_str("Surgeon").unwrap_err();
        match err {
            DatabaseError::InvalidEnum { field, value } => {
                assert_eq!(field, "Position");
                assert_eq!(value, "Surgeon");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn values_are_case_sensitive() {
        assert!(ExamResult::from_str("corona").is_err());
    }

    #[test]
    fn sick_results() {
        assert!(ExamResult::Corona.is_sick());
        assert!(ExamResult::Botism.is_sick());
        assert!(!ExamResult::Healthy.is_sick());
        assert!(!ExamResult::Dead.is_sick());
    }

    #[test]
    fn serializes_as_display_string() {
        let json = serde_json::to_string(&ExamResult::Botism).unwrap();
        assert_eq!(json, "\"Botism\"");
        let gender: Gender = serde_json::from_str("\"Female\"").unwrap();
        assert_eq!(gender, Gender::Female);
    }
}
