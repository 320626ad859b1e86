use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types surfaced by the HTTP layer.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Bad request error (invalid questionnaire input).
    BadRequest(String),
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each error variant to an appropriate HTTP status code and JSON body.
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::BadRequest(msg) => {
                tracing::debug!("Rejected questionnaire input: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Reasons a raw questionnaire cannot become a `LifestyleInput`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A numeric answer was below zero.
    Negative { field: &'static str, value: f64 },
    /// A numeric answer was NaN or infinite.
    NotFinite { field: &'static str },
    /// A numeric answer was above the largest plausible value for its field.
    TooLarge {
        field: &'static str,
        value: f64,
        max: f64,
    },
    /// A categorical answer did not match any known choice.
    UnknownChoice { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Negative { field, value } => {
                write!(f, "{} must be >= 0 (got {})", field, value)
            }
            ValidationError::NotFinite { field } => {
                write!(f, "{} must be a finite number", field)
            }
            ValidationError::TooLarge { field, value, max } => {
                write!(f, "{} must be <= {} (got {})", field, max, value)
            }
            ValidationError::UnknownChoice { field, value } => {
                write!(f, "{} has unknown value '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Why a remote prediction could not be used.
///
/// None of these ever reach the caller of the orchestrator; they are logged
/// and mapped to the local estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionError {
    /// The request could not complete (connect error, timeout, body read).
    Transport(String),
    /// The service answered but signalled failure (non-2xx or error payload).
    Protocol(String),
    /// The answer was malformed or carried an unusable prediction.
    Data(String),
    /// The circuit breaker is open and refused the call.
    CircuitOpen,
}

impl PredictionError {
    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Transport(_) => "transport",
            PredictionError::Protocol(_) => "protocol",
            PredictionError::Data(_) => "data",
            PredictionError::CircuitOpen => "circuit_open",
        }
    }

    /// Whether the failure says the predictor itself is down, as opposed to
    /// rejecting one particular questionnaire. Only these trip the breaker.
    pub fn is_outage(&self) -> bool {
        matches!(self, PredictionError::Transport(_))
    }
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionError::Transport(msg) => write!(f, "Predictor unreachable: {}", msg),
            PredictionError::Protocol(msg) => write!(f, "Predictor reported failure: {}", msg),
            PredictionError::Data(msg) => write!(f, "Unusable predictor response: {}", msg),
            PredictionError::CircuitOpen => write!(f, "Predictor circuit breaker is open"),
        }
    }
}

impl std::error::Error for PredictionError {}

impl From<reqwest::Error> for PredictionError {
    /// Converts a `reqwest::Error` into a `PredictionError`.
    ///
    /// Decode failures are data problems; everything else happened on the wire.
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PredictionError::Data(err.to_string())
        } else {
            PredictionError::Transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_becomes_bad_request() {
        let err: AppError = ValidationError::Negative {
            field: "travelKmPerDay",
            value: -2.0,
        }
        .into();

        match err {
            AppError::BadRequest(msg) => assert!(msg.contains("travelKmPerDay")),
            other => panic!("Expected BadRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_bad_request_status() {
        let response = AppError::BadRequest("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_prediction_error_kinds() {
        assert_eq!(PredictionError::Transport("x".into()).kind(), "transport");
        assert_eq!(PredictionError::Protocol("x".into()).kind(), "protocol");
        assert_eq!(PredictionError::Data("x".into()).kind(), "data");
        assert_eq!(PredictionError::CircuitOpen.kind(), "circuit_open");
    }

    #[test]
    fn test_only_transport_failures_are_outages() {
        assert!(PredictionError::Transport("timed out".into()).is_outage());
        assert!(!PredictionError::Protocol("bad row".into()).is_outage());
        assert!(!PredictionError::Data("missing prediction".into()).is_outage());
        assert!(!PredictionError::CircuitOpen.is_outage());
    }

    #[test]
    fn test_too_large_names_field_and_limit() {
        let err = ValidationError::TooLarge {
            field: "travelKmPerDay",
            value: 1e307,
            max: 5000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("travelKmPerDay"));
        assert!(msg.contains("5000"));
    }
}
