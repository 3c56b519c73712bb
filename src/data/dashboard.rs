use crate::db::sql::TaggedQuery;
use crate::db::Database;
use crate::error::{DashboardError, Result};
use crate::models::{CardData, LatestInvoice, LatestInvoiceRaw, Revenue};
use crate::sql;
use crate::utils::format_currency;

/// Number of invoices on the "latest invoices" card
const LATEST_INVOICES: i64 = 5;

#[derive(sqlx::FromRow)]
struct StatusTotals {
    paid: i64,
    pending: i64,
}

/// The newest invoices with their customers; ties on date fall back to id.
pub fn latest_invoices_query() -> Result<TaggedQuery> {
    sql!(
        r#"
        SELECT
            invoices.id,
            invoices.amount,
            customers.name,
            customers.image_url,
            customers.email
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        ORDER BY invoices.date DESC, invoices.id
        LIMIT {}
        "#,
        LATEST_INVOICES
    )
}

impl Database {
    pub async fn fetch_revenue(&self) -> Result<Vec<Revenue>> {
        tracing::debug!("fetching revenue data");
        let run = async {
            sql!("SELECT month, revenue FROM revenue")?
                .fetch_all::<Revenue>(self.get_pool())
                .await
        };
        let revenue = run
            .await
            .map_err(DashboardError::wrap("Failed to fetch revenue data."))?;

        if revenue.is_empty() {
            tracing::warn!("no revenue data found in database");
        }

        Ok(revenue)
    }

    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>> {
        let run = async {
            latest_invoices_query()?
                .fetch_all::<LatestInvoiceRaw>(self.get_pool())
                .await
        };
        let rows = run
            .await
            .map_err(DashboardError::wrap("Failed to fetch the latest invoices."))?;

        Ok(rows.into_iter().map(LatestInvoice::from).collect())
    }

    /// Counts and totals for the summary cards.
    ///
    /// The three queries are independent and run concurrently.
    pub async fn fetch_card_data(&self) -> Result<CardData> {
        let pool = self.get_pool();

        let invoice_count = async {
            sql!("SELECT COUNT(*) FROM invoices")?
                .fetch_scalar::<i64>(pool)
                .await
        };
        let customer_count = async {
            sql!("SELECT COUNT(*) FROM customers")?
                .fetch_scalar::<i64>(pool)
                .await
        };
        let status_totals = async {
            sql!(
                r#"
                SELECT
                    COALESCE(SUM(CASE WHEN status = 'paid' THEN amount ELSE 0 END), 0) AS paid,
                    COALESCE(SUM(CASE WHEN status = 'pending' THEN amount ELSE 0 END), 0) AS pending
                FROM invoices
                "#
            )?
            .fetch_one::<StatusTotals>(pool)
            .await
        };

        let (number_of_invoices, number_of_customers, totals) =
            tokio::try_join!(invoice_count, customer_count, status_totals)
                .map_err(DashboardError::wrap("Failed to fetch card data."))?;

        Ok(CardData {
            number_of_customers,
            number_of_invoices,
            total_paid_invoices: format_currency(totals.paid),
            total_pending_invoices: format_currency(totals.pending),
        })
    }
}
