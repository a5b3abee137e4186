//! Customer listing and import.

use chartmogul_core::{Customer, NewCustomer, Validate};

use crate::client::{into_record, ChartMogulClient};
use crate::error::ClientError;
use crate::pager::{ListParams, Paged, Pager};

const CUSTOMERS_PATH: &str = "/v1/import/customers";

impl ChartMogulClient {
    /// Fetch every imported customer across all pages.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching any page.
    pub fn list_customers(&self, params: &ListParams) -> Result<Vec<Customer>, ClientError> {
        self.list_customers_each(params).collect_all()
    }

    /// Iterate imported customers lazily, one page request at a time.
    #[must_use]
    pub fn list_customers_each(&self, params: &ListParams) -> Paged<'_, Customer> {
        Pager::new(self, CUSTOMERS_PATH, params, "customers").typed()
    }

    /// Import a customer into a data source.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if a mandatory field is blank,
    /// [`ClientError::Validation`] if the service rejects the record, or any
    /// other request error.
    #[tracing::instrument(skip(self, input), fields(external_id = %input.external_id))]
    pub fn import_customer(&self, input: &NewCustomer) -> Result<Customer, ClientError> {
        input.validate()?;
        into_record(self.post(CUSTOMERS_PATH, input)?)
    }
}
