//! # Transition Executor
//!
//! Drives the lifecycle state machine against the ledger gateway. Every
//! transition call follows the same contract:
//!
//! 1. Load the shipment (`NotFound` if absent).
//! 2. Validate the stage payload, reporting all field violations.
//! 3. Check the state-machine gates (precondition, role, ownership).
//! 4. Commit the whole write through one `append_and_advance` call, carrying
//!    the version read in step 1. A concurrent writer surfaces as `Conflict`
//!    and nothing is written.
//!
//! Every gateway call is bounded by the configured timeout. The executor
//! never retries a write on its own; retryable failures are marked via
//! [`TransitionError::is_retryable`] and left to the caller.

use agritrace_core::{CertificationStatus, Role, ShipmentId, Timestamp};
use agritrace_ledger::{
    LedgerError, LedgerGateway, PageRequest, ShipmentFilter, ShipmentPage, StageAppend,
};
use agritrace_records::{ValidationError, Validator};
use agritrace_shipment::{Shipment, TransitionRecord};
use agritrace_state::{check_transition, next_status, Action, ShipmentStatus};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::actor::{ActionRequest, Actor, CreateShipmentRequest};
use crate::error::TransitionError;

/// Executor tuning knobs.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Upper bound on any single ledger gateway call.
    pub gateway_timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            gateway_timeout: Duration::from_secs(5),
        }
    }
}

/// The one mutation path for shipments. Handlers hold an `Arc` of this and
/// contain no business logic of their own.
pub struct TransitionExecutor {
    gateway: Arc<dyn LedgerGateway>,
    config: ExecutorConfig,
}

impl TransitionExecutor {
    pub fn new(gateway: Arc<dyn LedgerGateway>, config: ExecutorConfig) -> Self {
        Self { gateway, config }
    }

    /// Run a gateway call under the configured timeout.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, LedgerError>>,
    ) -> Result<T, TransitionError> {
        match tokio::time::timeout(self.config.gateway_timeout, call).await {
            Ok(result) => result.map_err(TransitionError::from),
            Err(_) => {
                tracing::warn!(timeout = ?self.config.gateway_timeout, "ledger gateway timed out");
                Err(TransitionError::GatewayTimeout(self.config.gateway_timeout))
            }
        }
    }

    /// Create a new shipment owned by the acting farmer.
    pub async fn create_shipment(
        &self,
        actor: &Actor,
        request: CreateShipmentRequest,
    ) -> Result<Shipment, TransitionError> {
        if actor.role != Role::Farmer {
            return Err(TransitionError::CreateForbidden(actor.role));
        }
        let mut v = Validator::new();
        // A caller-supplied ID is honored; otherwise one is generated.
        let shipment_id = match request
            .shipment_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(raw) => match ShipmentId::new(raw) {
                Ok(id) => Some(id),
                Err(e) => {
                    v.violation("shipmentId", e.to_string());
                    None
                }
            },
            None => None,
        };
        let product_name = v.require_text("productName", &request.product_name);
        let description = request.description.trim().to_string();
        let quantity = match request.quantity.parse() {
            Ok(q) if q > 0.0 => q,
            Ok(q) => {
                v.violation("quantity", format!("must be positive, got {q}"));
                0.0
            }
            Err(e) => {
                v.violation("quantity", e.to_string());
                0.0
            }
        };
        let unit_of_measure = v.require_text("unitOfMeasure", &request.unit_of_measure);
        // Merge top-level and farm-record violations into one report.
        let farmer_data = match (v.finish(()), request.farmer_data.validate()) {
            (Ok(()), Ok(data)) => data,
            (top, farm) => {
                let mut violations = Vec::new();
                if let Err(e) = top {
                    violations.extend(e.violations);
                }
                if let Err(e) = farm {
                    violations.extend(e.violations);
                }
                return Err(ValidationError { violations }.into());
            }
        };
        let shipment = Shipment {
            shipment_id: shipment_id.unwrap_or_else(ShipmentId::generate),
            status: ShipmentStatus::Created,
            current_owner_alias: actor.alias.clone(),
            product_name,
            description,
            quantity,
            unit_of_measure,
            farmer_data,
            certification_records: Vec::new(),
            processor_data: None,
            distributor_data: None,
            retailer_data: None,
            recall: None,
            created_at: Timestamp::now(),
            transition_log: Vec::new(),
            version: 1,
        };
        self.bounded(self.gateway.create_shipment(shipment.clone()))
            .await?;
        tracing::info!(
            shipment = %shipment.shipment_id,
            owner = %actor.alias,
            "shipment created"
        );
        Ok(shipment)
    }

    /// Execute one lifecycle transition end to end.
    pub async fn execute(
        &self,
        actor: &Actor,
        id: &ShipmentId,
        request: ActionRequest,
    ) -> Result<Shipment, TransitionError> {
        let shipment = self.bounded(self.gateway.read_shipment(id)).await?;
        let action = request.action();
        // Payload validation runs before the gate checks so a client fixing
        // a form sees its field errors regardless of custody state.
        let append = validate_payload(actor, request)?;
        check_transition(
            shipment.status,
            action,
            actor.role,
            &actor.alias,
            &shipment.current_owner_alias,
        )?;
        let certification = certification_outcome(&append);
        let to_status = next_status(action, certification);
        let new_owner = next_owner(&shipment, actor, &append);
        let transition = TransitionRecord {
            action,
            from_status: shipment.status,
            to_status,
            actor_alias: actor.alias.clone(),
            timestamp: Timestamp::now(),
        };
        let updated = self
            .bounded(self.gateway.append_and_advance(
                id,
                shipment.version,
                append,
                transition,
                to_status,
                new_owner,
            ))
            .await?;
        tracing::info!(
            shipment = %id,
            %action,
            from = %shipment.status,
            to = %to_status,
            actor = %actor.alias,
            "transition applied"
        );
        Ok(updated)
    }

    /// Load one shipment.
    pub async fn get_shipment(&self, id: &ShipmentId) -> Result<Shipment, TransitionError> {
        self.bounded(self.gateway.read_shipment(id)).await
    }

    /// List shipments, bookmark-paginated.
    pub async fn list_shipments(
        &self,
        filter: &ShipmentFilter,
        page: &PageRequest,
    ) -> Result<ShipmentPage, TransitionError> {
        self.bounded(self.gateway.list_shipments(filter, page)).await
    }
}

/// Validate the stage payload and stamp server-attributed fields.
fn validate_payload(
    actor: &Actor,
    request: ActionRequest,
) -> Result<StageAppend, ValidationError> {
    Ok(match request {
        ActionRequest::SubmitForCertification => StageAppend::None,
        ActionRequest::RecordCertification(payload) => {
            StageAppend::Certification(payload.validate(actor.alias.clone())?)
        }
        ActionRequest::Process(payload) => StageAppend::Processor(payload.validate()?),
        ActionRequest::Distribute(payload) => StageAppend::Distributor(payload.validate()?),
        ActionRequest::Receive(payload) => StageAppend::Retailer(payload.validate()?),
        ActionRequest::InitiateRecall(payload) => {
            StageAppend::Recall(payload.validate(actor.alias.clone())?)
        }
    })
}

fn certification_outcome(append: &StageAppend) -> Option<CertificationStatus> {
    match append {
        StageAppend::Certification(record) => Some(record.certification_status),
        _ => None,
    }
}

/// Custody after a successful transition: immediate transfer to the
/// destination alias named in the stage data that completes the hop, else
/// custody stays where it is.
fn next_owner(
    shipment: &Shipment,
    actor: &Actor,
    append: &StageAppend,
) -> agritrace_core::ActorAlias {
    match append {
        StageAppend::None | StageAppend::Recall(_) => shipment.current_owner_alias.clone(),
        StageAppend::Certification(record) => match record.certification_status {
            CertificationStatus::Rejected => shipment.current_owner_alias.clone(),
            _ => shipment
                .farmer_data
                .destination_processor_id
                .clone()
                .unwrap_or_else(|| shipment.current_owner_alias.clone()),
        },
        StageAppend::Processor(data) => data
            .destination_distributor_id
            .clone()
            .unwrap_or_else(|| actor.alias.clone()),
        StageAppend::Distributor(data) => data
            .destination_retailer_id
            .clone()
            .unwrap_or_else(|| actor.alias.clone()),
        StageAppend::Retailer(_) => actor.alias.clone(),
    }
}
