use uuid::Uuid;

use super::{page_offset, search_pattern, total_pages, ITEMS_PER_PAGE};
use crate::db::sql::TaggedQuery;
use crate::db::Database;
use crate::error::{DashboardError, Result};
use crate::models::{InvoiceForm, InvoiceFormRow, InvoicesTable};
use crate::sql;

/// One page of invoices whose customer, amount, date or status matches.
pub fn filtered_invoices_query(query: &str, current_page: i64) -> Result<TaggedQuery> {
    let pattern = search_pattern(query);
    sql!(
        r#"
        SELECT
            invoices.id,
            invoices.customer_id,
            invoices.amount,
            invoices.date,
            invoices.status,
            customers.name,
            customers.email,
            customers.image_url
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE
            customers.name ILIKE {} OR
            customers.email ILIKE {} OR
            invoices.amount::text ILIKE {} OR
            invoices.date::text ILIKE {} OR
            invoices.status ILIKE {}
        ORDER BY invoices.date DESC, invoices.id
        LIMIT {} OFFSET {}
        "#,
        &pattern,
        &pattern,
        &pattern,
        &pattern,
        &pattern,
        ITEMS_PER_PAGE,
        page_offset(current_page),
    )
}

/// Count of invoices matching the same filter as [`filtered_invoices_query`].
pub fn invoices_count_query(query: &str) -> Result<TaggedQuery> {
    let pattern = search_pattern(query);
    sql!(
        r#"
        SELECT COUNT(*)
        FROM invoices
        JOIN customers ON invoices.customer_id = customers.id
        WHERE
            customers.name ILIKE {} OR
            customers.email ILIKE {} OR
            invoices.amount::text ILIKE {} OR
            invoices.date::text ILIKE {} OR
            invoices.status ILIKE {}
        "#,
        &pattern,
        &pattern,
        &pattern,
        &pattern,
        &pattern,
    )
}

impl Database {
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        current_page: i64,
    ) -> Result<Vec<InvoicesTable>> {
        let run = async {
            filtered_invoices_query(query, current_page)?
                .fetch_all::<InvoicesTable>(self.get_pool())
                .await
        };
        run.await.map_err(DashboardError::wrap("Failed to fetch invoices."))
    }

    pub async fn fetch_invoices_pages(&self, query: &str) -> Result<i64> {
        let run = async {
            invoices_count_query(query)?
                .fetch_scalar::<i64>(self.get_pool())
                .await
        };
        let count = run
            .await
            .map_err(DashboardError::wrap("Failed to fetch total number of invoices."))?;

        Ok(total_pages(count))
    }

    /// Invoice for the edit form, amount converted from cents to dollars
    pub async fn fetch_invoice_by_id(&self, id: Uuid) -> Result<Option<InvoiceForm>> {
        let run = async {
            sql!(
                r#"
                SELECT
                    invoices.id,
                    invoices.customer_id,
                    invoices.amount,
                    invoices.status
                FROM invoices
                WHERE invoices.id = {}
                "#,
                id
            )?
            .fetch_optional::<InvoiceFormRow>(self.get_pool())
            .await
        };
        let row = run.await.map_err(DashboardError::wrap("Failed to fetch invoice."))?;

        Ok(row.map(InvoiceForm::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sql::SqlValue;

    #[test]
    fn filtered_query_binds_pattern_and_page() {
        let query = filtered_invoices_query("Acme", 3).unwrap();

        assert!(query.sql().contains("customers.name ILIKE $1"));
        assert!(query.sql().contains("invoices.status ILIKE $5"));
        assert!(query.sql().contains("LIMIT $6 OFFSET $7"));

        let params = query.params();
        assert_eq!(params.len(), 7);
        assert!(params[..5].iter().all(|p| *p == SqlValue::Text("%Acme%".into())));
        assert_eq!(params[5], SqlValue::BigInt(6));
        assert_eq!(params[6], SqlValue::BigInt(12));
    }

    #[test]
    fn out_of_range_page_saturates_the_offset() {
        let query = filtered_invoices_query("", i64::MAX).unwrap();
        assert_eq!(query.params()[6], SqlValue::BigInt(i64::MAX));
    }

    #[test]
    fn count_query_has_no_paging() {
        let query = invoices_count_query("").unwrap();

        assert!(query.sql().contains("SELECT COUNT(*)"));
        assert!(!query.sql().contains("LIMIT"));
        assert_eq!(query.params().len(), 5);
        assert_eq!(query.params()[0], SqlValue::Text("%%".into()));
    }
}
