// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for the locator service

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Locator error types
/// DOCUMENTATION: Every failure a locator operation can report
/// Each variant maps to an HTTP status code and a JSON error body.
/// None of them is fatal: the session stays usable after any of these.
#[derive(Error, Debug)]
pub enum LocatorError {
    #[error("Session not found: {0}")]
    SessionNotFound(Uuid),

    #[error("Couldn't find that address: {0}")]
    AddressNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Capability not enabled: {0}")]
    CapabilityDisabled(&'static str),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LocatorError {
    fn error_code(&self) -> &'static str {
        match self {
            LocatorError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            LocatorError::AddressNotFound(_) => "ADDRESS_NOT_FOUND",
            LocatorError::InvalidInput(_) => "INVALID_INPUT",
            LocatorError::ValidationError(_) => "VALIDATION_ERROR",
            LocatorError::CapabilityDisabled(_) => "CAPABILITY_DISABLED",
            LocatorError::ExternalApiError(_) => "EXTERNAL_API_ERROR",
            LocatorError::RateLimitExceeded => "RATE_LIMIT_EXCEEDED",
            LocatorError::ConfigError(_) => "CONFIG_ERROR",
        }
    }
}

/// Convert LocatorError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and JSON responses
impl ResponseError for LocatorError {
    fn error_response(&self) -> HttpResponse {
        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }
        });

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            LocatorError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            LocatorError::AddressNotFound(_) => StatusCode::NOT_FOUND,
            LocatorError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LocatorError::ValidationError(_) => StatusCode::BAD_REQUEST,
            LocatorError::CapabilityDisabled(_) => StatusCode::NOT_FOUND,
            LocatorError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            LocatorError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            LocatorError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
