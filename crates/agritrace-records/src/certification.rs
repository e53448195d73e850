//! Certification inspection record, appended by a certifier.

use agritrace_core::{ActorAlias, CertificationStatus, Timestamp};
use serde::{Deserialize, Serialize};

use crate::validate::{ValidationError, Validator};

/// Raw certification data as submitted by the certifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationPayload {
    pub inspection_date: String,
    /// One of `APPROVED`, `REJECTED`, `CONDITIONAL`.
    pub certification_status: String,
    #[serde(default)]
    pub comments: Option<String>,
}

/// A recorded certification outcome. Shipments accumulate these append-only;
/// the latest record decides the outcome, earlier ones remain as history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificationRecord {
    pub inspection_date: Timestamp,
    pub certification_status: CertificationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Alias of the certifier who recorded this outcome. Captured
    /// server-side, never taken from the payload.
    pub certifier_alias: ActorAlias,
    pub recorded_at: Timestamp,
}

impl CertificationPayload {
    /// Validate the payload and stamp it with the recording certifier.
    pub fn validate(&self, certifier: ActorAlias) -> Result<CertificationRecord, ValidationError> {
        let mut v = Validator::new();
        let inspection_date = v.require_timestamp("inspectionDate", &self.inspection_date);
        let certification_status = v.require_token(
            "certificationStatus",
            &self.certification_status,
            CertificationStatus::Rejected,
        );
        if certification_status == CertificationStatus::Conditional
            && self
                .comments
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .is_none()
        {
            v.violation("comments", "required for a CONDITIONAL outcome");
        }
        let comments = v.optional_text("comments", self.comments.as_deref());
        v.finish(CertificationRecord {
            inspection_date,
            certification_status,
            comments,
            certifier_alias: certifier,
            recorded_at: Timestamp::now(),
        })
    }
}
