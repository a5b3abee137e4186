//! Plan listing and import.

use chartmogul_core::{NewPlan, Plan};

use crate::client::{into_record, ChartMogulClient};
use crate::error::ClientError;
use crate::pager::{ListParams, Paged, Pager};

const PLANS_PATH: &str = "/v1/import/plans";

impl ChartMogulClient {
    /// Fetch every imported plan across all pages.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while fetching any page.
    pub fn list_plans(&self, params: &ListParams) -> Result<Vec<Plan>, ClientError> {
        self.list_plans_each(params).collect_all()
    }

    /// Iterate imported plans lazily, one page request at a time.
    #[must_use]
    pub fn list_plans_each(&self, params: &ListParams) -> Paged<'_, Plan> {
        Pager::new(self, PLANS_PATH, params, "plans").typed()
    }

    /// Import a plan into a data source.
    ///
    /// `interval_count` must be positive and `interval_unit` one of `day`,
    /// `month` or `year` in any letter case.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] for malformed input without
    /// contacting the service, otherwise any request or service error.
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub fn import_plan(&self, input: &NewPlan) -> Result<Plan, ClientError> {
        let body = input.to_body()?;
        into_record(self.post(PLANS_PATH, &body)?)
    }
}
