//! # agritrace-engine — Transition Execution
//!
//! Where the stack's pieces meet: the executor loads a shipment through the
//! ledger gateway, validates the submitted stage payload, runs the
//! state-machine gates, and commits the transition atomically. Handlers and
//! CLIs drive this crate; it is the only mutation path for shipments.

pub mod actor;
pub mod error;
pub mod executor;

pub use actor::{ActionRequest, Actor, CreateShipmentRequest};
pub use error::TransitionError;
pub use executor::{ExecutorConfig, TransitionExecutor};
