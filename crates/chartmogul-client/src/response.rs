//! Response preprocessing: status policy and JSON decoding.

use reqwest::StatusCode;
use serde_json::{Map, Value};

use crate::error::{ClientError, ErrorMap};

/// Number of body characters kept in [`ClientError::Api`].
pub const BODY_SNIPPET_CHARS: usize = 50;

/// Decoded JSON object of a successful response.
pub type Document = Map<String, Value>;

/// Map a completed response to its decoded body or a typed error.
///
/// - 2xx: the body decoded as a JSON object (an empty body is an empty object)
/// - 401: [`ClientError::Unauthorized`]
/// - 422: [`ClientError::Validation`] with the body's `errors` object
/// - anything else: [`ClientError::Api`] with the status and a body snippet
///
/// # Errors
///
/// Returns the error matching the status, or [`ClientError::Serialization`]
/// if a body that has to be decoded is not a JSON object.
pub fn preprocess(status: StatusCode, body: &str) -> Result<Document, ClientError> {
    tracing::debug!(status = status.as_u16(), body = %body, "received response");

    if status.is_success() {
        return decode(body);
    }

    match status {
        StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
        StatusCode::UNPROCESSABLE_ENTITY => {
            let mut document = decode(body)?;
            let errors = match document.remove("errors") {
                Some(Value::Object(errors)) => errors,
                Some(other) => {
                    let mut errors = ErrorMap::new();
                    errors.insert("base".to_string(), other);
                    errors
                }
                None => ErrorMap::new(),
            };
            Err(ClientError::Validation { errors })
        }
        _ => Err(ClientError::Api {
            status: status.as_u16(),
            body: snippet(body),
        }),
    }
}

fn decode(body: &str) -> Result<Document, ClientError> {
    if body.trim().is_empty() {
        return Ok(Document::new());
    }
    Ok(serde_json::from_str(body)?)
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_CHARS).collect()
}
