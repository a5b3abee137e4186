//! Core types for the ChartMogul import API client.
//!
//! This crate holds everything that does not touch the network:
//!
//! - **Records**: `DataSource`, `Customer`, `Plan`, `Invoice`, `Subscription`
//! - **Inputs**: `NewDataSource`, `NewCustomer`, `NewPlan`, `NewInvoice`, ...
//! - **Validation**: `ensure`, `refute`, `refute_blank` and the `Validate` trait
//! - **Timestamps**: canonical wire format for date-like fields
//! - **Decoding**: `null` tolerance for record fields the service may leave unset
//!
//! Records are plain data decoded from the service's JSON. Cross references
//! are UUID strings, never nested objects.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod customer;
pub mod data_source;
pub mod decode;
pub mod error;
pub mod invoice;
pub mod plan;
pub mod subscription;
pub mod timestamp;
pub mod validation;

pub use customer::{Customer, NewCustomer};
pub use data_source::{DataSource, NewDataSource};
pub use error::{ArgumentError, Result};
pub use invoice::{
    Invoice, InvoiceBatch, LineItem, LineItemKind, NewInvoice, NewLineItem, NewTransaction,
    Transaction, TransactionKind, TransactionResult,
};
pub use plan::{IntervalUnit, NewPlan, Plan, PlanBody};
pub use subscription::{Subscription, SubscriptionCancellation};
pub use validation::{ensure, refute, refute_blank, Blank, Validate};
