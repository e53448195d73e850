//! # Domain Outcome Tokens
//!
//! Enumerated outcome tokens recorded at lifecycle stages. Wire format is
//! SCREAMING_SNAKE_CASE, matching the values the certification and
//! processing parties submit.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::CoreError;

/// Outcome of a certification inspection.
///
/// REJECTED recalls the shipment. CONDITIONAL certifies it with the
/// inspector's conditions preserved in the record comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CertificationStatus {
    /// Inspection passed without conditions.
    Approved,
    /// Inspection failed; the shipment is recalled.
    Rejected,
    /// Inspection passed subject to conditions noted in the comments.
    Conditional,
}

impl CertificationStatus {
    /// Returns the canonical wire token for this outcome.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Conditional => "CONDITIONAL",
        }
    }
}

impl std::fmt::Display for CertificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CertificationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(Self::Approved),
            "REJECTED" => Ok(Self::Rejected),
            "CONDITIONAL" => Ok(Self::Conditional),
            other => Err(CoreError::UnknownCertificationStatus(other.to_string())),
        }
    }
}

/// Result of the contamination check performed during processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContaminationCheck {
    /// No contamination detected.
    Passed,
    /// Contamination detected; recorded for downstream recall decisions.
    Failed,
}

impl ContaminationCheck {
    /// Returns the canonical wire token for this result.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for ContaminationCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContaminationCheck {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PASSED" => Ok(Self::Passed),
            "FAILED" => Ok(Self::Failed),
            other => Err(CoreError::UnknownContaminationCheck(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn certification_status_roundtrip() {
        for token in ["APPROVED", "REJECTED", "CONDITIONAL"] {
            let status: CertificationStatus = token.parse().unwrap();
            assert_eq!(status.as_str(), token);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{token}\""));
        }
    }

    #[test]
    fn certification_status_rejects_lowercase() {
        assert!("approved".parse::<CertificationStatus>().is_err());
        assert!("".parse::<CertificationStatus>().is_err());
    }

    #[test]
    fn contamination_check_roundtrip() {
        for token in ["PASSED", "FAILED"] {
            let check: ContaminationCheck = token.parse().unwrap();
            assert_eq!(check.as_str(), token);
        }
        assert!("MAYBE".parse::<ContaminationCheck>().is_err());
    }
}
