//! Executor failure modes.

use agritrace_core::{Role, ShipmentId};
use agritrace_ledger::LedgerError;
use agritrace_records::ValidationError;
use agritrace_state::StateError;
use std::time::Duration;
use thiserror::Error;

/// Everything a transition attempt can fail with, across all three layers:
/// payload validation, state-machine gates, and the ledger boundary.
#[derive(Debug, Clone, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    State(#[from] StateError),
    #[error("shipment not found: {0}")]
    NotFound(ShipmentId),
    #[error("shipment already exists: {0}")]
    AlreadyExists(ShipmentId),
    #[error("only farmers may create shipments; actor holds {0}")]
    CreateForbidden(Role),
    #[error("transition lost a concurrent write: {0}")]
    Conflict(String),
    #[error("ledger gateway timed out after {0:?}")]
    GatewayTimeout(Duration),
    #[error("ledger gateway unavailable: {0}")]
    GatewayUnavailable(String),
}

impl TransitionError {
    /// Whether retrying the same request unchanged could succeed.
    ///
    /// The executor never retries on the caller's behalf; a retryable error
    /// means the caller may re-read and re-submit.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Conflict(_) | Self::GatewayTimeout(_) | Self::GatewayUnavailable(_)
        )
    }
}

impl From<LedgerError> for TransitionError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::NotFound(id) => Self::NotFound(id),
            LedgerError::AlreadyExists(id) => Self::AlreadyExists(id),
            conflict @ LedgerError::Conflict { .. } => Self::Conflict(conflict.to_string()),
            occupied @ LedgerError::RecordOccupied(_) => Self::Conflict(occupied.to_string()),
            LedgerError::Unavailable(msg) => Self::GatewayUnavailable(msg),
        }
    }
}
