//! In-memory ledger gateway.
//!
//! Backs local development and the test suites. A `BTreeMap` under a single
//! `parking_lot` write lock gives the same atomicity the real substrate
//! promises: each `append_and_advance` is one critical section, so the
//! version check and the full mutation cannot interleave with another
//! writer.

use agritrace_core::{ActorAlias, ShipmentId};
use agritrace_shipment::{Shipment, TransitionRecord};
use agritrace_state::ShipmentStatus;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;

use crate::gateway::{
    LedgerError, LedgerGateway, PageRequest, ShipmentFilter, ShipmentPage, StageAppend,
};

/// In-memory [`LedgerGateway`] keyed by shipment ID.
#[derive(Debug, Default)]
pub struct MemoryLedger {
    shipments: RwLock<BTreeMap<String, Shipment>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shipments stored. Test helper.
    pub fn len(&self) -> usize {
        self.shipments.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shipments.read().is_empty()
    }
}

/// Write one stage record into the aggregate, refusing to overwrite.
fn apply_append(shipment: &mut Shipment, append: StageAppend) -> Result<(), LedgerError> {
    match append {
        StageAppend::None => {}
        StageAppend::Certification(record) => {
            // Certification history is append-only, never replaced.
            shipment.certification_records.push(record);
        }
        StageAppend::Processor(data) => {
            if shipment.processor_data.is_some() {
                return Err(LedgerError::RecordOccupied("processorData"));
            }
            shipment.processor_data = Some(data);
        }
        StageAppend::Distributor(data) => {
            if shipment.distributor_data.is_some() {
                return Err(LedgerError::RecordOccupied("distributorData"));
            }
            shipment.distributor_data = Some(data);
        }
        StageAppend::Retailer(data) => {
            if shipment.retailer_data.is_some() {
                return Err(LedgerError::RecordOccupied("retailerData"));
            }
            shipment.retailer_data = Some(data);
        }
        StageAppend::Recall(record) => {
            if shipment.recall.is_some() {
                return Err(LedgerError::RecordOccupied("recall"));
            }
            shipment.recall = Some(record);
        }
    }
    Ok(())
}

#[async_trait]
impl LedgerGateway for MemoryLedger {
    async fn read_shipment(&self, id: &ShipmentId) -> Result<Shipment, LedgerError> {
        self.shipments
            .read()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| LedgerError::NotFound(id.clone()))
    }

    async fn create_shipment(&self, shipment: Shipment) -> Result<(), LedgerError> {
        let mut guard = self.shipments.write();
        let key = shipment.shipment_id.as_str().to_string();
        if guard.contains_key(&key) {
            return Err(LedgerError::AlreadyExists(shipment.shipment_id.clone()));
        }
        guard.insert(key, shipment);
        Ok(())
    }

    async fn append_and_advance(
        &self,
        id: &ShipmentId,
        expected_version: u64,
        append: StageAppend,
        transition: TransitionRecord,
        new_status: ShipmentStatus,
        new_owner: ActorAlias,
    ) -> Result<Shipment, LedgerError> {
        let mut guard = self.shipments.write();
        let stored = guard
            .get_mut(id.as_str())
            .ok_or_else(|| LedgerError::NotFound(id.clone()))?;
        if stored.version != expected_version {
            return Err(LedgerError::Conflict {
                id: id.clone(),
                expected: expected_version,
                actual: stored.version,
            });
        }
        // Mutate a copy so a refused append leaves the stored aggregate
        // untouched.
        let mut next = stored.clone();
        apply_append(&mut next, append)?;
        next.transition_log.push(transition);
        next.status = new_status;
        next.current_owner_alias = new_owner;
        next.version += 1;
        *stored = next.clone();
        Ok(next)
    }

    async fn list_shipments(
        &self,
        filter: &ShipmentFilter,
        page: &PageRequest,
    ) -> Result<ShipmentPage, LedgerError> {
        let guard = self.shipments.read();
        let size = page.effective_size();
        let lower = match &page.bookmark {
            Some(mark) => Bound::Excluded(mark.clone()),
            None => Bound::Unbounded,
        };
        let mut shipments = Vec::with_capacity(size);
        let mut next_bookmark = None;
        for (_, shipment) in guard.range((lower, Bound::Unbounded)) {
            let matches = match filter {
                ShipmentFilter::All => true,
                ShipmentFilter::Owner(alias) => shipment.current_owner_alias == *alias,
            };
            if !matches {
                continue;
            }
            if shipments.len() == size {
                // One more match exists, so the page we built is full and
                // continuable.
                next_bookmark = shipments
                    .last()
                    .map(|s: &Shipment| s.shipment_id.as_str().to_string());
                break;
            }
            shipments.push(shipment.clone());
        }
        let fetched_count = shipments.len();
        Ok(ShipmentPage {
            shipments,
            next_bookmark,
            fetched_count,
        })
    }
}
