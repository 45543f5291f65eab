//! Form input, the validated invoice form, and mutation outcomes.

use std::collections::HashMap;

use chrono::NaiveDate;
use db::{InvoiceChanges, InvoiceStatus, NewInvoice};
use serde::Deserialize;

use crate::{error::ValidationError, money::Amount, schema::Schema};

// ---------------------------------------------------------------------------
// InputBag
// ---------------------------------------------------------------------------

/// Raw field/value pairs of a submitted form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct InputBag(HashMap<String, String>);

impl InputBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InputBag {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

// ---------------------------------------------------------------------------
// InvoiceForm
// ---------------------------------------------------------------------------

/// The caller-supplied part of an invoice after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceForm {
    pub customer_id: String,
    pub amount: Amount,
    pub status: InvoiceStatus,
}

impl InvoiceForm {
    /// Validate `bag` against `schema` and pull out the typed fields.
    pub fn parse(schema: &Schema, bag: &InputBag) -> Result<Self, ValidationError> {
        let record = schema.validate(bag)?;
        Ok(Self {
            customer_id: record.text("customerId")?.to_owned(),
            amount: record.amount("amount")?,
            status: record.status("status")?,
        })
    }

    /// Values for the INSERT, dated `date`.
    pub fn into_new_invoice(self, date: NaiveDate) -> NewInvoice {
        NewInvoice {
            customer_id: self.customer_id,
            amount_cents: self.amount.cents(),
            status: self.status,
            date,
        }
    }

    /// Values for the UPDATE.  The stored date is left alone.
    pub fn into_changes(self) -> InvoiceChanges {
        InvoiceChanges {
            customer_id: self.customer_id,
            amount_cents: self.amount.cents(),
            status: self.status,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What the caller should do after a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// Navigate to the given route.
    Redirect(String),
    /// Stay on the current view; it has already been invalidated.
    Stay,
}

impl Outcome {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect(route) => Some(route),
            Self::Stay => None,
        }
    }
}
