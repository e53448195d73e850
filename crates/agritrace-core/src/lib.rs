//! # agritrace-core — Foundational Types for the Agritrace Stack
//!
//! The bedrock crate of the Agritrace supply-chain provenance stack. It
//! defines the type-system primitives every other crate builds on.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** [`ShipmentId`] and
//!    [`ActorAlias`] are validated at construction — no bare strings for
//!    identifiers, and no invalid identifier can be deserialized.
//!
//! 2. **Single `Role` enum.** One definition of the custodial roles in the
//!    supply chain, with exhaustive `match` everywhere. Adding a role forces
//!    every consumer to handle it at compile time.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] enforces UTC with Z suffix and
//!    seconds precision. Calendar dates from input forms are normalized to
//!    start-of-day UTC so string comparisons and range queries behave
//!    predictably.
//!
//! 4. **Strict decimal parsing.** [`DecimalInput`] accepts a JSON number or a
//!    numeric string and rejects anything non-numeric or non-finite. No
//!    silent coercion.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `agritrace-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug` and `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod decimal;
pub mod domain;
pub mod error;
pub mod identity;
pub mod role;
pub mod temporal;

pub use decimal::DecimalInput;
pub use domain::{CertificationStatus, ContaminationCheck};
pub use error::CoreError;
pub use identity::{ActorAlias, ShipmentId};
pub use role::Role;
pub use temporal::Timestamp;
