//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain errors from the engine, state machine, and ledger boundary to
//! HTTP status codes. Returns JSON error bodies with error code, message,
//! and details. Never exposes internal error details in responses.

use agritrace_engine::TransitionError;
use agritrace_state::StateError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses use this format across the API surface. The
/// `details` field carries the per-field violation list for 422 validation
/// errors and is omitted otherwise.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "ILLEGAL_TRANSITION").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details, present only for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request validation failed (422). Carries the per-field violations.
    #[error("validation error: {0}")]
    Validation(String, #[source] Option<ValidationDetails>),

    /// Request body could not be parsed (422). Normalized with `Validation`:
    /// the client sent syntactically valid HTTP but semantically invalid
    /// content.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Actor identity could not be established — unknown role token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Actor identity is valid but lacks the role or custody required (403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Action is not permitted from the shipment's current status (409).
    #[error("illegal transition: {0}")]
    IllegalTransition(String),

    /// Concurrent write conflict or duplicate resource (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),

    /// Ledger gateway unavailable (503).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Ledger gateway timed out (504).
    #[error("gateway timeout: {0}")]
    GatewayTimeout(String),
}

/// Wrapper so per-field violations can ride along as an error source.
#[derive(Debug, Error)]
#[error("field violations")]
pub struct ValidationDetails(pub serde_json::Value);

impl AppError {
    /// Return the HTTP status code and machine-readable error code.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(..) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::IllegalTransition(_) => (StatusCode::CONFLICT, "ILLEGAL_TRANSITION"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE")
            }
            Self::GatewayTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "GATEWAY_TIMEOUT"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        // Never expose internal error messages to clients.
        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        // Log server-side errors for operator visibility.
        match &self {
            Self::Internal(_) => tracing::error!(error = %self, "internal server error"),
            Self::ServiceUnavailable(_) => tracing::warn!(error = %self, "ledger unavailable"),
            Self::GatewayTimeout(_) => tracing::warn!(error = %self, "ledger gateway timeout"),
            _ => {}
        }

        let details = match self {
            Self::Validation(_, Some(ValidationDetails(value))) => Some(value),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Convert executor errors to API errors.
impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::Validation(e) => {
                let details = serde_json::to_value(
                    e.violations
                        .iter()
                        .map(|v| {
                            serde_json::json!({
                                "field": v.field,
                                "message": v.message,
                            })
                        })
                        .collect::<Vec<_>>(),
                )
                .ok()
                .map(ValidationDetails);
                Self::Validation(e.to_string(), details)
            }
            TransitionError::State(state_err) => match &state_err {
                StateError::IllegalTransition { .. } => {
                    Self::IllegalTransition(state_err.to_string())
                }
                StateError::Unauthorized { .. } | StateError::NotOwner { .. } => {
                    Self::Forbidden(state_err.to_string())
                }
            },
            TransitionError::NotFound(id) => Self::NotFound(format!("shipment {id} not found")),
            TransitionError::AlreadyExists(id) => {
                Self::Conflict(format!("shipment {id} already exists"))
            }
            TransitionError::CreateForbidden(role) => {
                Self::Forbidden(format!("only farmers may create shipments; actor holds {role}"))
            }
            TransitionError::Conflict(msg) => Self::Conflict(msg),
            TransitionError::GatewayTimeout(timeout) => {
                Self::GatewayTimeout(format!("ledger gateway timed out after {timeout:?}"))
            }
            TransitionError::GatewayUnavailable(msg) => Self::ServiceUnavailable(msg),
        }
    }
}
