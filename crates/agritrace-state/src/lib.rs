//! # agritrace-state — Shipment Lifecycle State Machine
//!
//! The legality rules for moving a shipment through its lifecycle:
//! statuses, actions, the precondition/role/ownership gates, and
//! next-status computation. Pure and synchronous — no I/O, no clock, no
//! storage. The transition executor in `agritrace-engine` drives this
//! machine against the ledger.

pub mod lifecycle;

pub use lifecycle::{check_transition, next_status, Action, ShipmentStatus, StateError};
