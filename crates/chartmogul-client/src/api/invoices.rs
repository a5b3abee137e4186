//! Invoice import and listing.

use serde_json::Value;

use chartmogul_core::{refute_blank, Invoice, InvoiceBatch, NewInvoice};

use crate::client::{into_records, take_array, ChartMogulClient};
use crate::error::{ClientError, ErrorMap};
use crate::pager::{ListParams, Paged, Pager};

fn invoices_path(customer_uuid: &str) -> String {
    format!("/v1/import/customers/{customer_uuid}/invoices")
}

impl ChartMogulClient {
    /// Import a batch of invoices for one customer.
    ///
    /// Date fields are sent in the canonical timestamp format. Every invoice
    /// needs an external id, a currency and at least one line item.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] for malformed input without
    /// contacting the service. A [`ClientError::Validation`] from the service
    /// keys its errors by position in the batch under `invoices`.
    #[tracing::instrument(skip(self, invoices), fields(count = invoices.len()))]
    pub fn import_invoices(
        &self,
        customer_uuid: &str,
        invoices: &[NewInvoice],
    ) -> Result<Vec<Invoice>, ClientError> {
        refute_blank(customer_uuid, "customer_uuid")?;
        let batch = InvoiceBatch::new(invoices)?;
        let mut document = self.post(&invoices_path(customer_uuid), &batch)?;
        into_records(take_array(&mut document, "invoices")?)
    }

    /// Import a single invoice.
    ///
    /// # Errors
    ///
    /// As [`import_invoices`](Self::import_invoices), except that a
    /// [`ClientError::Validation`] carries this invoice's own errors rather
    /// than the batch wrapper.
    pub fn import_invoice(
        &self,
        customer_uuid: &str,
        invoice: &NewInvoice,
    ) -> Result<Invoice, ClientError> {
        let imported = self
            .import_invoices(customer_uuid, std::slice::from_ref(invoice))
            .map_err(|err| match err {
                ClientError::Validation { errors } => ClientError::Validation {
                    errors: scope_to_single_invoice(errors),
                },
                other => other,
            })?;

        imported.into_iter().next().ok_or_else(|| {
            ClientError::UnexpectedResponse("invoice import returned no invoices".to_string())
        })
    }

    /// Fetch every invoice of a customer across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if `customer_uuid` is blank, or the
    /// first error raised while fetching any page.
    pub fn list_invoices(
        &self,
        customer_uuid: &str,
        params: &ListParams,
    ) -> Result<Vec<Invoice>, ClientError> {
        self.list_invoices_each(customer_uuid, params)?.collect_all()
    }

    /// Iterate a customer's invoices lazily, one page request at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if `customer_uuid` is blank.
    pub fn list_invoices_each(
        &self,
        customer_uuid: &str,
        params: &ListParams,
    ) -> Result<Paged<'_, Invoice>, ClientError> {
        refute_blank(customer_uuid, "customer_uuid")?;
        Ok(Pager::new(self, invoices_path(customer_uuid), params, "invoices").typed())
    }
}

/// Unwrap `{"invoices": [{...}]}` to the first invoice's error object.
///
/// The batch endpoint reports errors by position even for one-element
/// batches. Errors without that shape are returned unchanged.
fn scope_to_single_invoice(errors: ErrorMap) -> ErrorMap {
    let scoped = match errors.get("invoices") {
        Some(Value::Array(items)) => items.first(),
        Some(Value::Object(by_position)) => by_position
            .get("0")
            .or_else(|| by_position.values().next()),
        _ => None,
    };
    if let Some(Value::Object(inner)) = scoped {
        return inner.clone();
    }
    errors
}
