//! Import API operations, one module per resource.
//!
//! Each module adds an `impl ChartMogulClient` block for its endpoints:
//! validate the input, send the request, decode the records.

mod customers;
mod data_sources;
mod invoices;
mod ping;
mod plans;
mod subscriptions;
