//! Subscriptions and cancellation input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decode::null_as_default;
use crate::timestamp;

/// A subscription as returned by the import API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Subscription {
    /// Service-assigned identifier (`sub_...`).
    pub uuid: String,
    /// Identifier in the caller's billing system.
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_id: String,
    /// Plan currently billed.
    #[serde(default)]
    pub plan_uuid: Option<String>,
    /// Owning data source.
    #[serde(default)]
    pub data_source_uuid: Option<String>,
    /// Owning customer.
    #[serde(default)]
    pub customer_uuid: Option<String>,
    /// Cancellation timestamps, oldest first, as sent by the service.
    #[serde(default, alias = "cancelation_dates")]
    pub cancellation_dates: Vec<String>,
}

/// Body for cancelling a subscription at a point in time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubscriptionCancellation {
    /// When the subscription ends.
    #[serde(serialize_with = "timestamp::serialize")]
    pub cancelled_at: DateTime<Utc>,
}
