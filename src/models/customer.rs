use serde::Serialize;
use uuid::Uuid;

use crate::utils::format_currency;

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
}

/// Select-box option for picking a customer
#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

/// Customer row with invoice totals in cents, straight from the database
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct CustomersTableRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Customer row ready for display
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CustomersTable {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: Option<String>,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

impl From<CustomersTableRow> for CustomersTable {
    fn from(row: CustomersTableRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            image_url: row.image_url,
            total_invoices: row.total_invoices,
            total_pending: format_currency(row.total_pending),
            total_paid: format_currency(row.total_paid),
        }
    }
}
