//! Recall record: a regulator pulling a shipment out of circulation.

use agritrace_core::{ActorAlias, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::{ValidationError, Validator};

/// Raw recall data as submitted by the regulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallPayload {
    pub reason: String,
    /// Tracking ID for the recall campaign; one is generated when absent.
    #[serde(default)]
    pub recall_id: Option<String>,
}

/// A recorded recall. `initiatedBy` and `initiatedAt` are captured
/// server-side at append time; `recallId` comes from the payload when the
/// regulator supplies one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallRecord {
    pub recall_id: String,
    pub reason: String,
    pub initiated_by: ActorAlias,
    pub initiated_at: Timestamp,
}

impl RecallPayload {
    /// Validate the payload and stamp it with the initiating regulator.
    pub fn validate(&self, initiated_by: ActorAlias) -> Result<RecallRecord, ValidationError> {
        let mut v = Validator::new();
        let reason = v.require_text("reason", &self.reason);
        let recall_id = v
            .optional_text("recallId", self.recall_id.as_deref())
            .unwrap_or_else(|| format!("RECALL-{}", Uuid::new_v4()));
        v.finish(RecallRecord {
            recall_id,
            reason,
            initiated_by,
            initiated_at: Timestamp::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_recall() {
        let p = RecallPayload {
            reason: "salmonella detected in batch".to_string(),
            recall_id: None,
        };
        let record = p
            .validate(ActorAlias::new("regulator-rex").unwrap())
            .unwrap();
        assert!(record.recall_id.starts_with("RECALL-"));
        assert_eq!(record.initiated_by.as_str(), "regulator-rex");
    }

    #[test]
    fn caller_supplied_recall_id_is_honored() {
        let p = RecallPayload {
            reason: "glass fragments reported".to_string(),
            recall_id: Some("  RECALL-2026-017  ".to_string()),
        };
        let record = p
            .validate(ActorAlias::new("regulator-rex").unwrap())
            .unwrap();
        assert_eq!(record.recall_id, "RECALL-2026-017");

        // Whitespace-only falls back to a generated ID.
        let p = RecallPayload {
            reason: "glass fragments reported".to_string(),
            recall_id: Some("   ".to_string()),
        };
        let record = p
            .validate(ActorAlias::new("regulator-rex").unwrap())
            .unwrap();
        assert!(record.recall_id.starts_with("RECALL-"));
    }

    #[test]
    fn empty_reason_rejected() {
        let p = RecallPayload {
            reason: "  ".to_string(),
            recall_id: None,
        };
        let err = p
            .validate(ActorAlias::new("regulator-rex").unwrap())
            .unwrap_err();
        assert_eq!(err.violations[0].field, "reason");
    }
}
