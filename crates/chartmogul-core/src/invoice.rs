//! Invoices, their line items and transactions.
//!
//! Records mirror what the service sends back. Inputs carry typed timestamps
//! which are normalized by [`crate::timestamp`] when serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decode::null_as_default;
use crate::error::Result;
use crate::timestamp;
use crate::validation::{ensure, refute, refute_blank, Validate};

/// An invoice as returned by the import API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Invoice {
    /// Service-assigned identifier (`inv_...`).
    #[serde(default)]
    pub uuid: Option<String>,
    /// Identifier in the caller's billing system.
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_id: String,
    /// Invoice date as sent by the service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// ISO 4217 currency code.
    #[serde(default, deserialize_with = "null_as_default")]
    pub currency: String,
    /// Line items in invoice order.
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Payment and refund transactions in invoice order.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// A single invoice line as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LineItem {
    /// Service-assigned identifier (`li_...`).
    #[serde(default)]
    pub uuid: Option<String>,
    /// Identifier in the caller's billing system.
    #[serde(default)]
    pub external_id: Option<String>,
    /// `subscription` or `one_time`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Subscription this line bills for.
    #[serde(default)]
    pub subscription_external_id: Option<String>,
    /// Service-assigned subscription identifier.
    #[serde(default)]
    pub subscription_uuid: Option<String>,
    /// Plan billed by this line.
    #[serde(default)]
    pub plan_uuid: Option<String>,
    /// Start of the billed period.
    #[serde(default)]
    pub service_period_start: Option<String>,
    /// End of the billed period.
    #[serde(default)]
    pub service_period_end: Option<String>,
    /// Amount charged, in the smallest currency unit.
    pub amount_in_cents: i64,
    /// Seats or units billed.
    #[serde(default)]
    pub quantity: Option<u32>,
    /// Discount code applied.
    #[serde(default)]
    pub discount_code: Option<String>,
    /// Discount, in the smallest currency unit.
    #[serde(default)]
    pub discount_amount_in_cents: Option<i64>,
    /// Tax, in the smallest currency unit.
    #[serde(default)]
    pub tax_amount_in_cents: Option<i64>,
    /// Whether the line is a proration.
    #[serde(default)]
    pub prorated: Option<bool>,
    /// When the subscription was cancelled, if this line records it.
    #[serde(default)]
    pub cancelled_at: Option<String>,
    /// Free-text description for one-time charges.
    #[serde(default)]
    pub description: Option<String>,
}

/// A payment or refund attached to an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Transaction {
    /// Service-assigned identifier (`tr_...`).
    #[serde(default)]
    pub uuid: Option<String>,
    /// Identifier in the caller's billing system.
    #[serde(default)]
    pub external_id: Option<String>,
    /// `payment` or `refund`.
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
    /// Transaction date as sent by the service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    /// `successful` or `failed`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: String,
}

/// Kind of an invoice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// Recurring charge for a subscription.
    Subscription,
    /// Charge outside any subscription.
    OneTime,
}

/// Kind of an invoice transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money received.
    Payment,
    /// Money returned.
    Refund,
}

/// Outcome of an invoice transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionResult {
    /// The transaction went through.
    Successful,
    /// The transaction was declined or errored.
    Failed,
}

/// Input for one invoice in an import batch.
#[derive(Debug, Clone, Serialize)]
pub struct NewInvoice {
    /// Identifier in the caller's billing system.
    pub external_id: String,
    /// Invoice date.
    #[serde(serialize_with = "timestamp::serialize")]
    pub date: DateTime<Utc>,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Line items; at least one is required.
    pub line_items: Vec<NewLineItem>,
    /// Payments and refunds.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transactions: Vec<NewTransaction>,
}

impl NewInvoice {
    /// Create an invoice with no lines or transactions yet.
    #[must_use]
    pub fn new(
        external_id: impl Into<String>,
        date: DateTime<Utc>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            date,
            currency: currency.into(),
            line_items: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Append a line item.
    #[must_use]
    pub fn with_line_item(mut self, line_item: NewLineItem) -> Self {
        self.line_items.push(line_item);
        self
    }

    /// Append a transaction.
    #[must_use]
    pub fn with_transaction(mut self, transaction: NewTransaction) -> Self {
        self.transactions.push(transaction);
        self
    }
}

impl Validate for NewInvoice {
    fn validate(&self) -> Result<()> {
        refute_blank(&self.external_id, "external_id")?;
        refute_blank(&self.currency, "currency")?;
        refute(
            self.line_items.is_empty(),
            format!("invoice {} must have at least one line item", self.external_id),
        )?;
        self.line_items.iter().try_for_each(Validate::validate)?;
        self.transactions.iter().try_for_each(Validate::validate)
    }
}

/// Input for one invoice line.
#[derive(Debug, Clone, Serialize)]
pub struct NewLineItem {
    /// Line kind.
    #[serde(rename = "type")]
    pub kind: LineItemKind,
    /// Amount charged, in the smallest currency unit.
    pub amount_in_cents: i64,
    /// Subscription this line bills for; required for subscription lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_external_id: Option<String>,
    /// Plan billed; required for subscription lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_uuid: Option<String>,
    /// Start of the billed period.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::serialize_option"
    )]
    pub service_period_start: Option<DateTime<Utc>>,
    /// End of the billed period.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::serialize_option"
    )]
    pub service_period_end: Option<DateTime<Utc>>,
    /// Seats or units billed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    /// Whether the line is a proration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prorated: Option<bool>,
    /// Discount code applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    /// Discount, in the smallest currency unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_amount_in_cents: Option<i64>,
    /// Tax, in the smallest currency unit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount_in_cents: Option<i64>,
    /// Cancellation recorded by this line.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::serialize_option"
    )]
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Identifier in the caller's billing system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    /// Free-text description for one-time charges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewLineItem {
    /// A subscription line covering `start..end` for `plan_uuid`.
    #[must_use]
    pub fn subscription(
        subscription_external_id: impl Into<String>,
        plan_uuid: impl Into<String>,
        service_period_start: DateTime<Utc>,
        service_period_end: DateTime<Utc>,
        amount_in_cents: i64,
    ) -> Self {
        Self {
            subscription_external_id: Some(subscription_external_id.into()),
            plan_uuid: Some(plan_uuid.into()),
            service_period_start: Some(service_period_start),
            service_period_end: Some(service_period_end),
            ..Self::one_time(amount_in_cents)
        }
        .with_kind(LineItemKind::Subscription)
    }

    /// A one-time charge.
    #[must_use]
    pub fn one_time(amount_in_cents: i64) -> Self {
        Self {
            kind: LineItemKind::OneTime,
            amount_in_cents,
            subscription_external_id: None,
            plan_uuid: None,
            service_period_start: None,
            service_period_end: None,
            quantity: None,
            prorated: None,
            discount_code: None,
            discount_amount_in_cents: None,
            tax_amount_in_cents: None,
            cancelled_at: None,
            external_id: None,
            description: None,
        }
    }

    /// Set the quantity.
    #[must_use]
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn with_kind(mut self, kind: LineItemKind) -> Self {
        self.kind = kind;
        self
    }
}

impl Validate for NewLineItem {
    fn validate(&self) -> Result<()> {
        if self.kind == LineItemKind::Subscription {
            refute_blank(&self.subscription_external_id, "subscription_external_id")?;
            refute_blank(&self.plan_uuid, "plan_uuid")?;
            ensure(
                self.service_period_start.is_some() && self.service_period_end.is_some(),
                "subscription line items need service_period_start and service_period_end",
            )?;
        }
        Ok(())
    }
}

/// Input for one invoice transaction.
#[derive(Debug, Clone, Serialize)]
pub struct NewTransaction {
    /// Payment or refund.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// When it happened.
    #[serde(serialize_with = "timestamp::serialize")]
    pub date: DateTime<Utc>,
    /// Outcome.
    pub result: TransactionResult,
    /// Identifier in the caller's billing system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

impl NewTransaction {
    /// Create a transaction without an external identifier.
    #[must_use]
    pub fn new(kind: TransactionKind, date: DateTime<Utc>, result: TransactionResult) -> Self {
        Self {
            kind,
            date,
            result,
            external_id: None,
        }
    }
}

impl Validate for NewTransaction {
    fn validate(&self) -> Result<()> {
        match &self.external_id {
            Some(external_id) => refute_blank(external_id, "transaction external_id"),
            None => Ok(()),
        }
    }
}

/// Wire body for an invoice import: `{"invoices": [...]}`.
#[derive(Debug, Serialize)]
pub struct InvoiceBatch<'a> {
    invoices: &'a [NewInvoice],
}

impl<'a> InvoiceBatch<'a> {
    /// Validate every invoice and wrap the slice for serialization.
    ///
    /// # Errors
    ///
    /// Returns an [`ArgumentError`](crate::ArgumentError) if the batch is empty
    /// or any invoice fails validation.
    pub fn new(invoices: &'a [NewInvoice]) -> Result<Self> {
        refute(invoices.is_empty(), "invoices can't be empty")?;
        invoices.iter().try_for_each(Validate::validate)?;
        Ok(Self { invoices })
    }
}
