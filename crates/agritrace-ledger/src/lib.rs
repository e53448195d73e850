//! # agritrace-ledger — Ledger Gateway Boundary
//!
//! The commit/query contract between the transition executor and the ledger
//! substrate, plus the in-memory implementation used for local development
//! and tests. Everything behind [`LedgerGateway`] is a black box to the rest
//! of the stack; the one promise that matters is that
//! [`LedgerGateway::append_and_advance`] applies a transition's whole write
//! atomically under an optimistic version check.

pub mod gateway;
pub mod memory;

pub use gateway::{
    LedgerError, LedgerGateway, PageRequest, ShipmentFilter, ShipmentPage, StageAppend,
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
pub use memory::MemoryLedger;
