//! # Request Validation
//!
//! Two-tier boundary checks for JSON request bodies. A body that fails
//! to deserialize (malformed JSON, wrong field types) is a 400; a body
//! that deserializes but breaks a domain rule is a 422 carrying the
//! structured [`ValidationError`] message. DTOs declare their domain
//! rules via [`Validate`].

use axum::extract::rejection::JsonRejection;
use axum::Json;

use aireg_core::ValidationError;

use crate::error::AppError;

/// Domain-rule checks for a request DTO, run after deserialization.
///
/// Implementations return the specific [`ValidationError`] for the first
/// rule the body breaks; the conversion to a 422 response happens in
/// [`extract_validated_json`].
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Unwrap a JSON body, turning deserialization rejections into 400s.
pub fn extract_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    }
}

/// Unwrap a JSON body and run its [`Validate`] rules.
///
/// Handlers take the body as `Result<Json<T>, JsonRejection>` and call
/// this first, so the 400 / 422 split is uniform across routes.
pub fn extract_validated_json<T: Validate>(
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(body)?;
    value.validate()?;
    Ok(value)
}
