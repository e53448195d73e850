//! # Ledger Gateway Boundary
//!
//! The read/write contract the transition executor needs from the ledger
//! substrate, and nothing more. The substrate is assumed to be an
//! authenticated, tamper-evident append-only store; its internals (consensus,
//! endorsement, replication) stay behind this trait.
//!
//! The one non-obvious requirement is [`LedgerGateway::append_and_advance`]:
//! the whole of a transition's write — stage record append, transition log
//! entry, status change, owner change, version bump — lands atomically, or
//! not at all. Concurrent writers against the same shipment race on the
//! version token and exactly one wins.

use agritrace_core::{ActorAlias, ShipmentId};
use agritrace_records::{
    CertificationRecord, DistributorData, ProcessorData, RecallRecord, RetailerData,
};
use agritrace_shipment::{Shipment, TransitionRecord};
use agritrace_state::ShipmentStatus;
use async_trait::async_trait;
use thiserror::Error;

/// Largest page a single list call will return.
pub const MAX_PAGE_SIZE: usize = 100;

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Failures surfaced by a ledger gateway implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("shipment not found: {0}")]
    NotFound(ShipmentId),
    #[error("shipment already exists: {0}")]
    AlreadyExists(ShipmentId),
    #[error("version conflict on {id}: expected {expected}, ledger holds {actual}")]
    Conflict {
        id: ShipmentId,
        expected: u64,
        actual: u64,
    },
    #[error("stage record {0} is already present and immutable")]
    RecordOccupied(&'static str),
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
}

/// The stage record a transition appends, if any.
///
/// `submitForCertification` appends no record; every other action carries
/// exactly one.
#[derive(Debug, Clone, PartialEq)]
pub enum StageAppend {
    None,
    Certification(CertificationRecord),
    Processor(ProcessorData),
    Distributor(DistributorData),
    Retailer(RetailerData),
    Recall(RecallRecord),
}

/// Which shipments a list call returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipmentFilter {
    /// Every shipment on the ledger.
    All,
    /// Only shipments currently owned by the given alias.
    Owner(ActorAlias),
}

/// Bookmark-paginated list request. The bookmark is the last shipment ID of
/// the previous page; pass `None` to start from the beginning.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    pub page_size: Option<usize>,
    pub bookmark: Option<String>,
}

impl PageRequest {
    /// Effective page size: default when unset, clamped to [`MAX_PAGE_SIZE`].
    pub fn effective_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of shipments plus the bookmark for the next page, if any.
#[derive(Debug, Clone)]
pub struct ShipmentPage {
    pub shipments: Vec<Shipment>,
    pub next_bookmark: Option<String>,
    pub fetched_count: usize,
}

/// The commit/query interface the transition executor drives.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Load one shipment by ID.
    async fn read_shipment(&self, id: &ShipmentId) -> Result<Shipment, LedgerError>;

    /// Store a brand-new shipment. Fails if the ID is taken.
    async fn create_shipment(&self, shipment: Shipment) -> Result<(), LedgerError>;

    /// Atomically apply one transition: append the stage record, append the
    /// transition log entry, advance status and owner, bump the version.
    ///
    /// `expected_version` is the version the caller read before deciding the
    /// transition was legal; a mismatch means another writer got there first
    /// and the whole write is rejected with [`LedgerError::Conflict`].
    async fn append_and_advance(
        &self,
        id: &ShipmentId,
        expected_version: u64,
        append: StageAppend,
        transition: TransitionRecord,
        new_status: ShipmentStatus,
        new_owner: ActorAlias,
    ) -> Result<Shipment, LedgerError>;

    /// List shipments matching the filter, bookmark-paginated in shipment ID
    /// order.
    async fn list_shipments(
        &self,
        filter: &ShipmentFilter,
        page: &PageRequest,
    ) -> Result<ShipmentPage, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_size_defaults_and_clamps() {
        assert_eq!(PageRequest::default().effective_size(), DEFAULT_PAGE_SIZE);
        let p = PageRequest {
            page_size: Some(500),
            bookmark: None,
        };
        assert_eq!(p.effective_size(), MAX_PAGE_SIZE);
        let p = PageRequest {
            page_size: Some(0),
            bookmark: None,
        };
        assert_eq!(p.effective_size(), 1);
    }
}
