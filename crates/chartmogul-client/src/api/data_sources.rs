//! Data source listing, creation and purge.

use reqwest::{Method, StatusCode};
use serde_json::json;

use chartmogul_core::{refute_blank, DataSource, NewDataSource, Validate};

use crate::client::{into_record, into_records, take_array, ChartMogulClient};
use crate::error::ClientError;

const DATA_SOURCES_PATH: &str = "/v1/import/data_sources";

impl ChartMogulClient {
    /// List every data source of the account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the service returns an error.
    pub fn list_data_sources(&self) -> Result<Vec<DataSource>, ClientError> {
        let mut document = self.get(DATA_SOURCES_PATH, &[])?;
        into_records(take_array(&mut document, "data_sources")?)
    }

    /// Create a data source.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if the name is blank, otherwise any
    /// request or service error.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub fn create_data_source(&self, input: &NewDataSource) -> Result<DataSource, ClientError> {
        input.validate()?;
        into_record(self.post(DATA_SOURCES_PATH, input)?)
    }

    /// Erase everything imported into a data source, keeping the source itself.
    ///
    /// The service accepts the job asynchronously. Returns `true` only for
    /// `202 Accepted`; any other success status yields `false`. The body of a
    /// successful response is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if `uuid` is blank, otherwise the
    /// error for any non-success status.
    #[tracing::instrument(skip(self))]
    pub fn purge_data_source(&self, uuid: &str) -> Result<bool, ClientError> {
        refute_blank(uuid, "uuid")?;
        let path = format!("{DATA_SOURCES_PATH}/{uuid}/erase_data");
        let status = self.send_json_for_status(Method::DELETE, &path, &json!({ "confirm": 1 }))?;
        Ok(status == StatusCode::ACCEPTED)
    }
}
