//! Customer records and import input.

use serde::{Deserialize, Serialize};

use crate::decode::null_as_default;
use crate::error::Result;
use crate::validation::{refute_blank, Validate};

/// A customer as returned by the import API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Customer {
    /// Service-assigned identifier (`cus_...`).
    pub uuid: String,
    /// Identifier in the caller's billing system.
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_id: String,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Company name.
    #[serde(default)]
    pub company: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(default)]
    pub country: Option<String>,
    /// State or region.
    #[serde(default)]
    pub state: Option<String>,
    /// City.
    #[serde(default)]
    pub city: Option<String>,
    /// Postal code.
    #[serde(default)]
    pub zip: Option<String>,
    /// Owning data source.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_source_uuid: String,
}

/// Input for importing a customer.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewCustomer {
    /// Data source the customer belongs to.
    pub data_source_uuid: String,
    /// Identifier in the caller's billing system.
    pub external_id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Company name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// State or region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// City.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Postal code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
}

impl NewCustomer {
    /// Create an input with the mandatory fields set.
    #[must_use]
    pub fn new(
        data_source_uuid: impl Into<String>,
        external_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            data_source_uuid: data_source_uuid.into(),
            external_id: external_id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the contact email.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the company name.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

impl Validate for NewCustomer {
    fn validate(&self) -> Result<()> {
        refute_blank(&self.data_source_uuid, "data_source_uuid")?;
        refute_blank(&self.external_id, "external_id")?;
        refute_blank(&self.name, "name")
    }
}
