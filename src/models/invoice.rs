use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::utils::format_currency;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(format!("unknown invoice status: {}", other)),
        }
    }
}

/// Invoice joined with its customer, for the paginated invoices table
#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct InvoicesTable {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub date: NaiveDate,
    /// Amount in cents
    pub amount: i32,
    pub status: String,
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct LatestInvoiceRaw {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub email: String,
    pub amount: i32,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LatestInvoice {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
    pub email: String,
    pub amount: String,
}

impl From<LatestInvoiceRaw> for LatestInvoice {
    fn from(raw: LatestInvoiceRaw) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            image_url: raw.image_url,
            email: raw.email,
            amount: format_currency(i64::from(raw.amount)),
        }
    }
}

#[derive(sqlx::FromRow, Debug, Clone)]
pub struct InvoiceFormRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: String,
}

/// Invoice as shown in the edit form, with the amount in dollars
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct InvoiceForm {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: f64,
    pub status: String,
}

impl From<InvoiceFormRow> for InvoiceForm {
    fn from(row: InvoiceFormRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            amount: f64::from(row.amount) / 100.0,
            status: row.status,
        }
    }
}
