//! Common test utilities for chartmogul-client integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use chartmogul_client::{ChartMogulClient, ClientOptions, Credentials};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Account token every mocked request must carry.
pub const ACCOUNT_TOKEN: &str = "test-account-token";
/// Secret key every mocked request must carry.
pub const SECRET_KEY: &str = "test-secret-key";

/// Test harness wrapping a mock import API.
pub struct TestHarness {
    /// The mock server standing in for the service.
    pub server: MockServer,
}

impl TestHarness {
    /// Start a fresh mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// A client pointed at the mock server.
    pub fn client(&self) -> ChartMogulClient {
        ChartMogulClient::with_options(
            Credentials::new(ACCOUNT_TOKEN, SECRET_KEY),
            ClientOptions::with_base_url(self.server.uri()),
        )
    }
}

/// Run blocking client code off the async executor.
pub async fn blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}

/// A customer record as the service returns it.
pub fn customer_json(n: usize) -> Value {
    json!({
        "uuid": format!("cus_{n}"),
        "external_id": format!("X{n}"),
        "name": format!("Customer {n}"),
        "email": format!("customer{n}@example.com"),
        "data_source_uuid": "ds_1"
    })
}

/// One page of customers with page-count metadata.
pub fn customers_page(ids: std::ops::Range<usize>, page_count: u32) -> Value {
    json!({
        "customers": ids.map(customer_json).collect::<Vec<_>>(),
        "meta": { "page_count": page_count }
    })
}
