//! Credential and connection configuration.

use std::fmt;

use chartmogul_core::Blank;

use crate::error::ClientError;

/// Environment variable consulted when no account token is passed explicitly.
pub const ACCOUNT_TOKEN_ENV: &str = "CHARTMOGUL_ACCOUNT_TOKEN";

/// Environment variable consulted when no secret key is passed explicitly.
pub const SECRET_KEY_ENV: &str = "CHARTMOGUL_SECRET_KEY";

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.chartmogul.com";

/// Basic-auth credentials for the import API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    account_token: String,
    secret_key: String,
}

impl Credentials {
    /// Use the given credentials as-is.
    #[must_use]
    pub fn new(account_token: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            account_token: account_token.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Resolve each credential from its explicit value, falling back to the
    /// process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if a credential is blank after
    /// the fallback.
    pub fn resolve(
        account_token: Option<String>,
        secret_key: Option<String>,
    ) -> Result<Self, ClientError> {
        Self::resolve_with(account_token, secret_key, |name| std::env::var(name).ok())
    }

    /// Resolve credentials against an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if a credential is blank after
    /// the fallback.
    pub fn resolve_with<F>(
        account_token: Option<String>,
        secret_key: Option<String>,
        lookup: F,
    ) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |explicit: Option<String>, var: &str| {
            explicit
                .filter(|v| !v.is_blank())
                .or_else(|| lookup(var))
                .filter(|v| !v.is_blank())
                .ok_or_else(|| {
                    ClientError::Configuration(format!(
                        "{var} is not set and no value was passed explicitly"
                    ))
                })
        };

        Ok(Self {
            account_token: pick(account_token, ACCOUNT_TOKEN_ENV)?,
            secret_key: pick(secret_key, SECRET_KEY_ENV)?,
        })
    }

    /// The account token (basic-auth user name).
    #[must_use]
    pub fn account_token(&self) -> &str {
        &self.account_token
    }

    pub(crate) fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account_token", &self.account_token)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL (default: `https://api.chartmogul.com`).
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl ClientOptions {
    /// Options pointing at a different base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}
