//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry no validation behaviour.
//! Form parsing and amount scaling live in the `invoices` crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// invoice status
// ---------------------------------------------------------------------------

/// Lifecycle state of an invoice. Stored as lowercase text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// Every accepted status, in the order forms list them.
    pub const ALL: [InvoiceStatus; 2] = [Self::Pending, Self::Paid];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid"    => Ok(Self::Paid),
            other     => Err(format!("unknown invoice status: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// invoices
// ---------------------------------------------------------------------------

/// A persisted invoice row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRow {
    pub id: String,
    pub customer_id: String,
    /// Minor units (cents).
    pub amount: i64,
    pub status: String,
    pub date: NaiveDate,
}

/// Bound values for the single INSERT issued by a create.
///
/// `id` is absent on purpose: the column default generates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

/// Bound values for the single UPDATE issued by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceChanges {
    pub customer_id: String,
    pub amount_cents: i64,
    pub status: InvoiceStatus,
}
