//! ChartMogul import API client SDK.
//!
//! This crate provides a blocking client for the ChartMogul import API:
//! data sources, customers, plans, invoices and subscriptions.
//!
//! # Example
//!
//! ```no_run
//! use chartmogul_client::{ChartMogulClient, ListParams, NewCustomer};
//!
//! # fn example() -> Result<(), chartmogul_client::ClientError> {
//! let client = ChartMogulClient::from_env()?;
//!
//! let customer = client.import_customer(&NewCustomer::new(
//!     "ds_fef05d54-47b4-431b-aed2-eb6b9e545430",
//!     "cus_0001",
//!     "Adam Smith",
//! ))?;
//! println!("Imported {}", customer.uuid);
//!
//! // Pages are fetched only as the iterator is consumed.
//! for customer in client.list_customers_each(&ListParams::new()) {
//!     println!("{}", customer?.name);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod api;
mod client;
mod config;
mod error;
mod pager;
mod response;

pub use client::ChartMogulClient;
pub use config::{
    ClientOptions, Credentials, ACCOUNT_TOKEN_ENV, DEFAULT_BASE_URL, SECRET_KEY_ENV,
};
pub use error::{ClientError, ErrorMap};
pub use pager::{ListParams, Paged, Pager};
pub use response::{preprocess, Document, BODY_SNIPPET_CHARS};

pub use chartmogul_core::timestamp;
pub use chartmogul_core::{
    ArgumentError, Customer, DataSource, IntervalUnit, Invoice, LineItem, LineItemKind,
    NewCustomer, NewDataSource, NewInvoice, NewLineItem, NewPlan, NewTransaction, Plan,
    Subscription, Transaction, TransactionKind, TransactionResult,
};
