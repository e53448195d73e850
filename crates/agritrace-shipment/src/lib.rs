//! # agritrace-shipment — The Shipment Aggregate
//!
//! The full state of one tracked shipment: identity, lifecycle status,
//! current custodian, the stage records accumulated so far, the
//! certification history, the transition audit log, and the version counter
//! used for optimistic concurrency at the ledger boundary.
//!
//! The aggregate is a plain data structure. All mutation happens in the
//! transition executor; the ledger stores and returns whole aggregates.

pub mod shipment;

pub use shipment::{Shipment, TransitionRecord};
