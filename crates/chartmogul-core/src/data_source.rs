//! Data sources: named ingestion channels that scope imported records.

use serde::{Deserialize, Serialize};

use crate::decode::null_as_default;
use crate::error::Result;
use crate::validation::{refute_blank, Validate};

/// A data source as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DataSource {
    /// Service-assigned identifier (`ds_...`).
    pub uuid: String,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Creation timestamp as sent by the service.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Import status, e.g. `"never_imported"`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Input for creating a data source.
#[derive(Debug, Clone, Serialize)]
pub struct NewDataSource {
    /// Display name.
    pub name: String,
}

impl NewDataSource {
    /// Create an input with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Validate for NewDataSource {
    fn validate(&self) -> Result<()> {
        refute_blank(&self.name, "name")
    }
}
