use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::domain::repositories::ephemeris_engine::EngineError;

/// Field-level validation failures for a birth record.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Invalid timezone offset: {0}")]
    InvalidTimezone(String),

    #[error("Invalid ayanamsa: {0}")]
    InvalidAyanamsa(String),
}

/// Top-level request error taxonomy.
///
/// `InvalidInput` is raised before any engine call is made;
/// `ComputationFailure` wraps an engine rejection or an engine payload the
/// normalizer cannot decode. Neither is retried.
#[derive(Debug, Error)]
pub enum KundaliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Computation failed: {0}")]
    ComputationFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for KundaliError {
    fn from(e: ValidationError) -> Self {
        KundaliError::InvalidInput(e.to_string())
    }
}

impl From<EngineError> for KundaliError {
    fn from(e: EngineError) -> Self {
        KundaliError::ComputationFailure(e.to_string())
    }
}

impl KundaliError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            KundaliError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            KundaliError::ComputationFailure(_) => StatusCode::BAD_GATEWAY,
            KundaliError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for KundaliError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "status": "error",
            "detail": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_400() {
        let err = KundaliError::InvalidInput("month out of range".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_computation_failure_maps_to_502() {
        let err = KundaliError::ComputationFailure("unsupported ayanamsa".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_internal_maps_to_500() {
        let err = KundaliError::Internal("oops".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_error_converts_to_invalid_input() {
        let err: KundaliError = ValidationError::InvalidDate("month 13".to_string()).into();
        assert!(matches!(err, KundaliError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid input: Invalid date: month 13");
    }

    #[test]
    fn test_engine_error_converts_to_computation_failure() {
        let err: KundaliError =
            EngineError::Rejected("date outside ephemeris range".to_string()).into();
        assert!(matches!(err, KundaliError::ComputationFailure(_)));
    }
}
