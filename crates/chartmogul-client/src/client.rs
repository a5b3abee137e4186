//! ChartMogul HTTP client implementation.

use std::cell::OnceCell;
use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::{ClientOptions, Credentials};
use crate::error::ClientError;
use crate::response::{preprocess, Document};

/// ChartMogul import API client.
///
/// Every call blocks the current thread until the service answers. The
/// underlying connection pool is created on first use and reused afterwards.
/// A client is not meant to be shared between threads; give each thread its
/// own instance or wrap it in external synchronization.
#[derive(Debug, Clone)]
pub struct ChartMogulClient {
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
    http: OnceCell<Client>,
}

impl ChartMogulClient {
    /// Create a client from explicit credentials.
    ///
    /// # Arguments
    ///
    /// * `account_token` - Account token (basic-auth user name)
    /// * `secret_key` - Secret key (basic-auth password)
    #[must_use]
    pub fn new(account_token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self::with_options(
            Credentials::new(account_token, secret_key),
            ClientOptions::default(),
        )
    }

    /// Create a client from `CHARTMOGUL_ACCOUNT_TOKEN` and `CHARTMOGUL_SECRET_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if either variable is unset or blank.
    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::with_options(
            Credentials::resolve(None, None)?,
            ClientOptions::default(),
        ))
    }

    /// Create a client with custom options.
    #[must_use]
    pub fn with_options(credentials: Credentials, options: ClientOptions) -> Self {
        Self {
            credentials,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(options.timeout_seconds),
            http: OnceCell::new(),
        }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Credentials used for basic authentication.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn connection(&self) -> Result<&Client, ClientError> {
        if let Some(client) = self.http.get() {
            return Ok(client);
        }
        let client = Client::builder().timeout(self.timeout).build()?;
        Ok(self.http.get_or_init(|| client))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "sending request");

        Ok(self
            .connection()?
            .request(method, url)
            .basic_auth(
                self.credentials.account_token(),
                Some(self.credentials.secret_key()),
            ))
    }

    /// Send a request and read the raw status and body.
    fn dispatch(request: RequestBuilder) -> Result<(StatusCode, String), ClientError> {
        let response = request.send()?;
        let status = response.status();
        Ok((status, response.text()?))
    }

    /// Send a request and run the response through the preprocessor.
    fn execute(request: RequestBuilder) -> Result<Document, ClientError> {
        let (status, body) = Self::dispatch(request)?;
        preprocess(status, &body)
    }

    pub(crate) fn get(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Document, ClientError> {
        let request = self.request(Method::GET, path)?.query(query);
        Self::execute(request)
    }

    pub(crate) fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Document, ClientError> {
        let request = self.request(method, path)?.json(body);
        Self::execute(request)
    }

    /// Send a JSON body and report only the status of a successful response.
    ///
    /// A 2xx body is logged but never decoded. Other statuses go through
    /// [`preprocess`] and surface as its errors.
    pub(crate) fn send_json_for_status<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<StatusCode, ClientError> {
        let request = self.request(method, path)?.json(body);
        let (status, body) = Self::dispatch(request)?;
        if status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %body, "received response");
            return Ok(status);
        }
        preprocess(status, &body)?;
        Err(ClientError::UnexpectedResponse(format!(
            "status {status} was not mapped to an error"
        )))
    }

    pub(crate) fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Document, ClientError> {
        self.send_json(Method::POST, path, body)
    }
}

/// Build a typed record from a decoded JSON object.
pub(crate) fn into_record<T: DeserializeOwned>(document: Document) -> Result<T, ClientError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

/// Remove the array stored under `key`; `null` counts as empty.
pub(crate) fn take_array(document: &mut Document, key: &str) -> Result<Vec<Value>, ClientError> {
    match document.remove(key) {
        Some(Value::Array(items)) => Ok(items),
        Some(Value::Null) => Ok(Vec::new()),
        Some(_) | None => {
            tracing::warn!(key, "response is missing the expected array");
            Err(ClientError::UnexpectedResponse(format!(
                "expected an array under `{key}`"
            )))
        }
    }
}

/// Decode every element of a record array.
pub(crate) fn into_records<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, ClientError> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(ClientError::from))
        .collect()
}
