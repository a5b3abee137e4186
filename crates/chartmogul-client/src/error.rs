//! Client error types.

use chartmogul_core::ArgumentError;
use serde_json::{Map, Value};

/// Field (or array position) to error messages, decoded verbatim from a 422 body.
pub type ErrorMap = Map<String, Value>;

/// Errors that can occur when using the ChartMogul client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A request argument was rejected before anything was sent.
    #[error("invalid argument: {0}")]
    Argument(#[from] ArgumentError),

    /// The service rejected the account token or secret key (HTTP 401).
    #[error("unauthorized: check the account token and secret key")]
    Unauthorized,

    /// The service rejected the payload (HTTP 422).
    #[error("validation failed: {}", Value::Object(.errors.clone()))]
    Validation {
        /// Per-field error messages.
        errors: ErrorMap,
    },

    /// Any other non-success status.
    #[error("API error: {status} - {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Leading part of the raw response body.
        body: String,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A successful response lacked the expected structure.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Per-field errors if this is a server-side validation failure.
    #[must_use]
    pub const fn validation_errors(&self) -> Option<&ErrorMap> {
        match self {
            Self::Validation { errors } => Some(errors),
            _ => None,
        }
    }
}
