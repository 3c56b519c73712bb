use serde::Serialize;

/// Summary figures shown on the dashboard cards
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CardData {
    pub number_of_customers: i64,
    pub number_of_invoices: i64,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}
