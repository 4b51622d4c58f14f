use serde::{Deserialize, Serialize};

/// Accept/reject judgment of the image suitability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationVerdict {
    Valid,
    Invalid,
}

impl ValidationVerdict {
    /// Normalise a completion: only an exact `VALID` (case-insensitive, trimmed)
    /// is accepted, everything else is rejected.
    pub fn from_completion(text: &str) -> Self {
        if text.trim().to_uppercase() == "VALID" {
            ValidationVerdict::Valid
        } else {
            ValidationVerdict::Invalid
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationVerdict::Valid)
    }
}
