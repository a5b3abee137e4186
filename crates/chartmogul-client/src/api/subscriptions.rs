//! Subscription listing and cancellation.

use chrono::{DateTime, Utc};
use reqwest::Method;

use chartmogul_core::{refute_blank, Subscription, SubscriptionCancellation};

use crate::client::{into_record, ChartMogulClient};
use crate::error::ClientError;
use crate::pager::{ListParams, Paged, Pager};

impl ChartMogulClient {
    /// Fetch every subscription of a customer across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if `customer_uuid` is blank, or the
    /// first error raised while fetching any page.
    pub fn list_subscriptions(
        &self,
        customer_uuid: &str,
        params: &ListParams,
    ) -> Result<Vec<Subscription>, ClientError> {
        self.list_subscriptions_each(customer_uuid, params)?
            .collect_all()
    }

    /// Iterate a customer's subscriptions lazily, one page request at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if `customer_uuid` is blank.
    pub fn list_subscriptions_each(
        &self,
        customer_uuid: &str,
        params: &ListParams,
    ) -> Result<Paged<'_, Subscription>, ClientError> {
        refute_blank(customer_uuid, "customer_uuid")?;
        let path = format!("/v1/import/customers/{customer_uuid}/subscriptions");
        Ok(Pager::new(self, path, params, "subscriptions").typed())
    }

    /// Cancel a subscription as of `cancelled_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Argument`] if `uuid` is blank, otherwise any
    /// request or service error.
    #[tracing::instrument(skip(self))]
    pub fn cancel_subscription(
        &self,
        uuid: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<Subscription, ClientError> {
        refute_blank(uuid, "uuid")?;
        let path = format!("/v1/import/subscriptions/{uuid}");
        let body = SubscriptionCancellation { cancelled_at };
        let document = self.send_json(Method::PATCH, &path, &body)?;
        into_record(document)
    }
}
