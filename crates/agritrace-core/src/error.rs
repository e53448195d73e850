//! # Core Error Types
//!
//! Construction-time errors for the foundational types. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//! Higher layers wrap these into field-level validation reports.

use thiserror::Error;

/// Errors raised when constructing core domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Shipment identifier failed format validation.
    #[error("invalid shipment id: {0}")]
    InvalidShipmentId(String),

    /// Actor alias failed format validation.
    #[error("invalid actor alias: {0}")]
    InvalidActorAlias(String),

    /// Unrecognized actor role token.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    /// Unrecognized certification outcome token.
    #[error("unknown certification status: {0:?} (expected APPROVED, REJECTED, or CONDITIONAL)")]
    UnknownCertificationStatus(String),

    /// Unrecognized contamination check token.
    #[error("unknown contamination check result: {0:?} (expected PASSED or FAILED)")]
    UnknownContaminationCheck(String),

    /// Date/time input could not be parsed or normalized.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Numeric input could not be parsed as a finite decimal.
    #[error("invalid decimal: {0}")]
    InvalidDecimal(String),
}
