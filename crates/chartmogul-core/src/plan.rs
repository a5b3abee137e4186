//! Plan records and import input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::decode::null_as_default;
use crate::error::{ArgumentError, Result};
use crate::validation::{ensure, refute_blank, Validate};

/// Billing interval unit of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    /// Daily billing.
    Day,
    /// Monthly billing.
    Month,
    /// Yearly billing.
    Year,
}

impl IntervalUnit {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalUnit {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(ArgumentError::new(format!(
                "interval_unit must be one of day, month, year (got {s:?})"
            ))),
        }
    }
}

/// A plan as returned by the import API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Plan {
    /// Service-assigned identifier (`pl_...`).
    pub uuid: String,
    /// Owning data source.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_source_uuid: String,
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Number of `interval_unit`s per billing cycle.
    pub interval_count: u32,
    /// Billing interval unit.
    pub interval_unit: IntervalUnit,
    /// Identifier in the caller's billing system.
    #[serde(default)]
    pub external_id: Option<String>,
}

/// Input for importing a plan.
///
/// `interval_unit` is taken as text and checked case-insensitively when the
/// input is validated.
#[derive(Debug, Clone)]
pub struct NewPlan {
    /// Data source the plan belongs to.
    pub data_source_uuid: String,
    /// Display name.
    pub name: String,
    /// Number of units per billing cycle; must be positive.
    pub interval_count: u32,
    /// One of `day`, `month`, `year`.
    pub interval_unit: String,
    /// Identifier in the caller's billing system.
    pub external_id: Option<String>,
}

impl NewPlan {
    /// Create an input with the mandatory fields set.
    #[must_use]
    pub fn new(
        data_source_uuid: impl Into<String>,
        name: impl Into<String>,
        interval_count: u32,
        interval_unit: impl Into<String>,
    ) -> Self {
        Self {
            data_source_uuid: data_source_uuid.into(),
            name: name.into(),
            interval_count,
            interval_unit: interval_unit.into(),
            external_id: None,
        }
    }

    /// Set the external identifier.
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Validate and produce the request body.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`] if a mandatory field is blank, the interval
    /// count is zero, or the unit is not recognised.
    pub fn to_body(&self) -> Result<PlanBody<'_>> {
        self.validate()?;
        Ok(PlanBody {
            data_source_uuid: &self.data_source_uuid,
            name: &self.name,
            interval_count: self.interval_count,
            interval_unit: self.interval_unit.parse()?,
            external_id: self.external_id.as_deref(),
        })
    }
}

impl Validate for NewPlan {
    fn validate(&self) -> Result<()> {
        refute_blank(&self.data_source_uuid, "data_source_uuid")?;
        refute_blank(&self.name, "name")?;
        ensure(
            self.interval_count > 0,
            "interval_count must be a positive integer",
        )?;
        self.interval_unit.parse::<IntervalUnit>().map(|_| ())
    }
}

/// Wire body for a plan import.
#[derive(Debug, Serialize)]
pub struct PlanBody<'a> {
    data_source_uuid: &'a str,
    name: &'a str,
    interval_count: u32,
    interval_unit: IntervalUnit,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_unit_parses_case_insensitively() {
        assert_eq!("Month".parse::<IntervalUnit>().unwrap(), IntervalUnit::Month);
        assert_eq!("YEAR".parse::<IntervalUnit>().unwrap(), IntervalUnit::Year);
        assert_eq!("day".parse::<IntervalUnit>().unwrap(), IntervalUnit::Day);
        assert!("week".parse::<IntervalUnit>().is_err());
    }

    #[test]
    fn zero_interval_count_is_rejected() {
        let err = NewPlan::new("ds_1", "Gold", 0, "month").validate().unwrap_err();
        assert!(err.message.contains("interval_count"));
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let err = NewPlan::new("ds_1", "Gold", 1, "week").validate().unwrap_err();
        assert!(err.message.contains("interval_unit"));
    }

    #[test]
    fn body_carries_canonical_unit() {
        let plan = NewPlan::new("ds_1", "Gold", 3, "Month").with_external_id("gold_q");
        let body = serde_json::to_value(plan.to_body().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "data_source_uuid": "ds_1",
                "name": "Gold",
                "interval_count": 3,
                "interval_unit": "month",
                "external_id": "gold_q"
            })
        );
    }

    #[test]
    fn decodes_service_plan() {
        let plan: Plan = serde_json::from_value(serde_json::json!({
            "uuid": "pl_1",
            "data_source_uuid": "ds_1",
            "name": "Bronze",
            "interval_count": 1,
            "interval_unit": "year"
        }))
        .unwrap();
        assert_eq!(plan.interval_unit, IntervalUnit::Year);
        assert!(plan.external_id.is_none());
    }
}
