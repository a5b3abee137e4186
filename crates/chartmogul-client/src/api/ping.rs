//! Authentication check.

use crate::client::ChartMogulClient;
use crate::error::ClientError;

impl ChartMogulClient {
    /// Check that the service is reachable and the credentials are accepted.
    ///
    /// Returns `true` if the service answers `{"data": "pong!"}`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] for bad credentials, or any
    /// transport or status error.
    pub fn ping(&self) -> Result<bool, ClientError> {
        let document = self.get("/v1/ping", &[])?;
        Ok(document.get("data").and_then(|data| data.as_str()) == Some("pong!"))
    }
}
