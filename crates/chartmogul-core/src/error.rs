//! Error types for chartmogul-core.

/// Result type for local validation.
pub type Result<T> = std::result::Result<T, ArgumentError>;

/// A request argument was rejected before anything was sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ArgumentError {
    /// Human-readable description naming the offending field.
    pub message: String,
}

impl ArgumentError {
    /// Create an argument error with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
