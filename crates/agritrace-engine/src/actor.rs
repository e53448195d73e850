//! Acting parties and the requests they submit.

use agritrace_core::{ActorAlias, DecimalInput, Role};
use agritrace_records::{
    CertificationPayload, DistributorPayload, FarmerPayload, ProcessorPayload, RecallPayload,
    RetailerPayload,
};
use agritrace_state::Action;
use serde::Deserialize;

/// The identity a request acts under. Identity provisioning and
/// authentication live outside the stack; callers hand the executor an
/// already-resolved alias/role pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub alias: ActorAlias,
    pub role: Role,
}

impl Actor {
    pub fn new(alias: ActorAlias, role: Role) -> Self {
        Self { alias, role }
    }
}

/// Request to create a new shipment. Only farmers may create.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    /// Caller-supplied shipment ID; one is generated when absent. A taken
    /// ID fails the create with a conflict.
    #[serde(default)]
    pub shipment_id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub description: String,
    /// Accepted as a JSON number or numeric string; must be positive.
    pub quantity: DecimalInput,
    pub unit_of_measure: String,
    pub farmer_data: FarmerPayload,
}

/// A lifecycle action plus its stage payload, ready for execution.
#[derive(Debug, Clone)]
pub enum ActionRequest {
    SubmitForCertification,
    RecordCertification(CertificationPayload),
    Process(ProcessorPayload),
    Distribute(DistributorPayload),
    Receive(RetailerPayload),
    InitiateRecall(RecallPayload),
}

impl ActionRequest {
    /// The lifecycle action this request attempts.
    pub fn action(&self) -> Action {
        match self {
            Self::SubmitForCertification => Action::SubmitForCertification,
            Self::RecordCertification(_) => Action::RecordCertification,
            Self::Process(_) => Action::Process,
            Self::Distribute(_) => Action::Distribute,
            Self::Receive(_) => Action::Receive,
            Self::InitiateRecall(_) => Action::InitiateRecall,
        }
    }
}
