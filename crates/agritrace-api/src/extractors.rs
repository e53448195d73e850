//! Request extraction helpers.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use crate::error::AppError;

/// Unwrap a JSON body extraction, normalizing parse failures to 422.
///
/// Handlers take `Result<Json<T>, JsonRejection>` instead of bare `Json<T>`
/// so malformed bodies produce the structured error envelope rather than
/// axum's plain-text default.
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}
