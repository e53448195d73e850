//! # Shipment Lifecycle State Machine
//!
//! The runtime legality table for shipment transitions. A transition is
//! legal only when three independent gates pass, checked in order:
//!
//! 1. **Precondition** — the action is permitted from the current status.
//! 2. **Role** — the acting party holds the role the action demands.
//! 3. **Ownership** — for custodial actions, the actor is the current owner.
//!
//! Status only ever moves forward along the chain, or sideways to the
//! terminal `RECALLED`. There is no transition out of `DELIVERED` or
//! `RECALLED`.

use agritrace_core::{ActorAlias, CertificationStatus, Role};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Lifecycle status of a shipment. Wire format is SCREAMING_SNAKE_CASE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShipmentStatus {
    /// Created by a farmer; not yet submitted for certification.
    Created,
    /// Awaiting a certifier's inspection outcome.
    PendingCertification,
    /// Certification approved (or conditional); ready for processing.
    Certified,
    /// Processed into an output batch; ready for distribution.
    Processed,
    /// In transit or delivered by the distributor; awaiting retail receipt.
    Distributed,
    /// Received at the retail endpoint. Terminal.
    Delivered,
    /// Pulled from circulation. Terminal.
    Recalled,
}

impl ShipmentStatus {
    /// All statuses in lifecycle order, terminals last.
    pub fn all_statuses() -> &'static [ShipmentStatus] {
        &[
            Self::Created,
            Self::PendingCertification,
            Self::Certified,
            Self::Processed,
            Self::Distributed,
            Self::Delivered,
            Self::Recalled,
        ]
    }

    /// Returns the canonical wire token for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::PendingCertification => "PENDING_CERTIFICATION",
            Self::Certified => "CERTIFIED",
            Self::Processed => "PROCESSED",
            Self::Distributed => "DISTRIBUTED",
            Self::Delivered => "DELIVERED",
            Self::Recalled => "RECALLED",
        }
    }

    /// Whether no further transition is accepted from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Recalled)
    }

    /// Position along the forward chain, used to assert monotone progress.
    /// `RECALLED` ranks above every forward status since it is reachable
    /// from any of them.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Created => 0,
            Self::PendingCertification => 1,
            Self::Certified => 2,
            Self::Processed => 3,
            Self::Distributed => 4,
            Self::Delivered => 5,
            Self::Recalled => 6,
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_statuses()
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown shipment status: {s:?}"))
    }
}

/// A lifecycle action an actor may attempt on a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    SubmitForCertification,
    RecordCertification,
    Process,
    Distribute,
    Receive,
    InitiateRecall,
}

impl Action {
    /// All actions in lifecycle order.
    pub fn all_actions() -> &'static [Action] {
        &[
            Self::SubmitForCertification,
            Self::RecordCertification,
            Self::Process,
            Self::Distribute,
            Self::Receive,
            Self::InitiateRecall,
        ]
    }

    /// Returns the canonical wire token for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitForCertification => "submitForCertification",
            Self::RecordCertification => "recordCertification",
            Self::Process => "process",
            Self::Distribute => "distribute",
            Self::Receive => "receive",
            Self::InitiateRecall => "initiateRecall",
        }
    }

    /// The role an actor must hold to attempt this action.
    pub fn required_role(&self) -> Role {
        match self {
            Self::SubmitForCertification => Role::Farmer,
            Self::RecordCertification => Role::Certifier,
            Self::Process => Role::Processor,
            Self::Distribute => Role::Distributor,
            Self::Receive => Role::Retailer,
            Self::InitiateRecall => Role::Regulator,
        }
    }

    /// Whether the actor must be the shipment's current owner.
    ///
    /// Certifiers inspect shipments they do not own; regulators recall
    /// shipments regardless of custody. Every other action is custodial.
    pub fn requires_ownership(&self) -> bool {
        match self {
            Self::SubmitForCertification | Self::Process | Self::Distribute | Self::Receive => true,
            Self::RecordCertification | Self::InitiateRecall => false,
        }
    }

    /// The statuses from which this action is permitted.
    pub fn permitted_from(&self) -> &'static [ShipmentStatus] {
        match self {
            Self::SubmitForCertification => &[ShipmentStatus::Created],
            Self::RecordCertification => &[ShipmentStatus::PendingCertification],
            Self::Process => &[ShipmentStatus::Certified],
            Self::Distribute => &[ShipmentStatus::Processed],
            Self::Receive => &[ShipmentStatus::Distributed],
            // Any non-terminal status.
            Self::InitiateRecall => &[
                ShipmentStatus::Created,
                ShipmentStatus::PendingCertification,
                ShipmentStatus::Certified,
                ShipmentStatus::Processed,
                ShipmentStatus::Distributed,
            ],
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_actions()
            .iter()
            .find(|action| action.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown action: {s:?}"))
    }
}

/// A rejected transition attempt, with enough detail to tell the caller
/// which gate failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("action {action} is not permitted from status {current}; permitted from: {permitted}")]
    IllegalTransition {
        action: Action,
        current: ShipmentStatus,
        permitted: String,
    },
    #[error("action {action} requires role {required}, actor holds {actual}")]
    Unauthorized {
        action: Action,
        required: Role,
        actual: Role,
    },
    #[error("actor {actor} is not the current owner ({owner})")]
    NotOwner { actor: ActorAlias, owner: ActorAlias },
}

/// Check every gate for a transition attempt. Gates are evaluated in a
/// fixed order (precondition, role, ownership) so error responses are
/// deterministic.
pub fn check_transition(
    current: ShipmentStatus,
    action: Action,
    actor_role: Role,
    actor_alias: &ActorAlias,
    owner_alias: &ActorAlias,
) -> Result<(), StateError> {
    let permitted = action.permitted_from();
    if !permitted.contains(&current) {
        return Err(StateError::IllegalTransition {
            action,
            current,
            permitted: permitted
                .iter()
                .map(ShipmentStatus::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        });
    }
    let required = action.required_role();
    if actor_role != required {
        return Err(StateError::Unauthorized {
            action,
            required,
            actual: actor_role,
        });
    }
    if action.requires_ownership() && actor_alias != owner_alias {
        return Err(StateError::NotOwner {
            actor: actor_alias.clone(),
            owner: owner_alias.clone(),
        });
    }
    Ok(())
}

/// Compute the status a legal transition lands in.
///
/// `certification` carries the inspection outcome for
/// [`Action::RecordCertification`]: REJECTED recalls the shipment, APPROVED
/// and CONDITIONAL both certify it. Other actions ignore the parameter.
pub fn next_status(action: Action, certification: Option<CertificationStatus>) -> ShipmentStatus {
    match action {
        Action::SubmitForCertification => ShipmentStatus::PendingCertification,
        Action::RecordCertification => match certification {
            Some(CertificationStatus::Rejected) => ShipmentStatus::Recalled,
            _ => ShipmentStatus::Certified,
        },
        Action::Process => ShipmentStatus::Processed,
        Action::Distribute => ShipmentStatus::Distributed,
        Action::Receive => ShipmentStatus::Delivered,
        Action::InitiateRecall => ShipmentStatus::Recalled,
    }
}
