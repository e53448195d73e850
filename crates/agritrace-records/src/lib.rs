//! # agritrace-records — Stage Record Payloads and Validation
//!
//! Each lifecycle stage of a shipment carries its own record: farm origin,
//! certification, processing, distribution, retail receipt, and recall. This
//! crate defines both shapes of every record:
//!
//! - **Payloads** (`FarmerPayload`, `CertificationPayload`, …) mirror what
//!   clients actually submit: camelCase JSON, dates as strings in several
//!   accepted shapes, decimals as numbers or numeric strings.
//! - **Records** (`FarmerData`, `CertificationRecord`, …) are the validated,
//!   typed forms stored on the shipment: [`agritrace_core::Timestamp`]s,
//!   parsed enums, finite `f64`s.
//!
//! `validate()` converts payload to record and reports *all* field
//! violations at once, including cross-field rules (harvest after planting,
//! expiry after processing, delivery after pickup). Server-attributed fields
//! (certifier alias, recall initiator, recorded-at stamps) are captured at
//! validation time and never taken from the payload.

pub mod certification;
pub mod distribution;
pub mod farm;
pub mod processing;
pub mod recall;
pub mod retail;
pub mod validate;

pub use certification::{CertificationPayload, CertificationRecord};
pub use distribution::{DistributorData, DistributorPayload};
pub use farm::{FarmerData, FarmerPayload};
pub use processing::{ProcessorData, ProcessorPayload};
pub use recall::{RecallPayload, RecallRecord};
pub use retail::{RetailerData, RetailerPayload};
pub use validate::{FieldViolation, ValidationError, Validator};
