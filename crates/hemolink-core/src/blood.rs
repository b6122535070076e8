//! Blood type vocabulary shared by the donor, request, and matching contexts.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// ABO/Rh blood type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloodType {
    /// O negative.
    #[serde(rename = "O-")]
    ONegative,
    /// O positive.
    #[serde(rename = "O+")]
    OPositive,
    /// A negative.
    #[serde(rename = "A-")]
    ANegative,
    /// A positive.
    #[serde(rename = "A+")]
    APositive,
    /// B negative.
    #[serde(rename = "B-")]
    BNegative,
    /// B positive.
    #[serde(rename = "B+")]
    BPositive,
    /// AB negative.
    #[serde(rename = "AB-")]
    AbNegative,
    /// AB positive.
    #[serde(rename = "AB+")]
    AbPositive,
}

impl BloodType {
    /// Returns the wire/storage representation ("O-", "AB+", ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ONegative => "O-",
            Self::OPositive => "O+",
            Self::ANegative => "A-",
            Self::APositive => "A+",
            Self::BNegative => "B-",
            Self::BPositive => "B+",
            Self::AbNegative => "AB-",
            Self::AbPositive => "AB+",
        }
    }
}

impl std::fmt::Display for BloodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BloodType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "O-" => Ok(Self::ONegative),
            "O+" => Ok(Self::OPositive),
            "A-" => Ok(Self::ANegative),
            "A+" => Ok(Self::APositive),
            "B-" => Ok(Self::BNegative),
            "B+" => Ok(Self::BPositive),
            "AB-" => Ok(Self::AbNegative),
            "AB+" => Ok(Self::AbPositive),
            other => Err(DomainError::Validation(format!(
                "unknown blood type: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_type_round_trips_through_storage_string() {
        for blood_type in [
            BloodType::ONegative,
            BloodType::OPositive,
            BloodType::ANegative,
            BloodType::APositive,
            BloodType::BNegative,
            BloodType::BPositive,
            BloodType::AbNegative,
            BloodType::AbPositive,
        ] {
            let parsed: BloodType = blood_type.as_str().parse().unwrap();
            assert_eq!(parsed, blood_type);
        }
    }

    #[test]
    fn test_unknown_blood_type_is_rejected() {
        let result = "C+".parse::<BloodType>();
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&BloodType::AbPositive).unwrap();
        assert_eq!(json, "\"AB+\"");
        let back: BloodType = serde_json::from_str("\"O-\"").unwrap();
        assert_eq!(back, BloodType::ONegative);
    }
}
