//! The shipment aggregate and its transition audit log.

use agritrace_core::{ActorAlias, ShipmentId, Timestamp};
use agritrace_records::{
    CertificationRecord, DistributorData, FarmerData, ProcessorData, RecallRecord, RetailerData,
};
use agritrace_state::{Action, ShipmentStatus};
use serde::{Deserialize, Serialize};

/// One entry in a shipment's transition audit log: who moved the shipment,
/// from where to where, and when. Appended on every successful transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub action: Action,
    pub from_status: ShipmentStatus,
    pub to_status: ShipmentStatus,
    pub actor_alias: ActorAlias,
    pub timestamp: Timestamp,
}

/// The full state of one tracked shipment.
///
/// Stage record fields are `None` until the corresponding lifecycle stage
/// appends them, and immutable afterwards. `certification_records` and
/// `transition_log` are append-only. `version` increments on every stored
/// mutation and backs the ledger's compare-and-swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    pub shipment_id: ShipmentId,
    pub status: ShipmentStatus,
    pub current_owner_alias: ActorAlias,
    pub product_name: String,
    pub description: String,
    pub quantity: f64,
    pub unit_of_measure: String,
    pub farmer_data: FarmerData,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certification_records: Vec<CertificationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processor_data: Option<ProcessorData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distributor_data: Option<DistributorData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailer_data: Option<RetailerData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<RecallRecord>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transition_log: Vec<TransitionRecord>,
    pub version: u64,
}

impl Shipment {
    /// Whether the given action is legal for the given actor right now.
    /// Convenience wrapper over the state machine's gate check.
    pub fn can_transition(
        &self,
        action: Action,
        actor_role: agritrace_core::Role,
        actor_alias: &ActorAlias,
    ) -> bool {
        agritrace_state::check_transition(
            self.status,
            action,
            actor_role,
            actor_alias,
            &self.current_owner_alias,
        )
        .is_ok()
    }

    /// Whether the shipment counts as active for reporting: CREATED,
    /// PROCESSED, or DISTRIBUTED. Certification stages and terminal
    /// statuses are excluded.
    pub fn is_active(&self) -> bool {
        matches!(
            self.status,
            ShipmentStatus::Created | ShipmentStatus::Processed | ShipmentStatus::Distributed
        )
    }

    /// The most recent certification outcome, if any has been recorded.
    pub fn latest_certification(&self) -> Option<&CertificationRecord> {
        self.certification_records.last()
    }
}
