use uuid::Uuid;

use super::{page_offset, search_pattern, total_pages, ITEMS_PER_PAGE};
use crate::db::sql::TaggedQuery;
use crate::db::Database;
use crate::error::{DashboardError, Result};
use crate::models::{Customer, CustomerField, CustomersTable, CustomersTableRow};
use crate::sql;

/// One page of customers matching by name or email, with invoice totals.
pub fn filtered_customers_query(query: &str, current_page: i64) -> Result<TaggedQuery> {
    let pattern = search_pattern(query);
    sql!(
        r#"
        SELECT
            customers.id,
            customers.name,
            customers.email,
            customers.image_url,
            COUNT(invoices.id) AS total_invoices,
            COALESCE(SUM(CASE WHEN invoices.status = 'pending'
                THEN invoices.amount ELSE 0 END), 0) AS total_pending,
            COALESCE(SUM(CASE WHEN invoices.status = 'paid'
                THEN invoices.amount ELSE 0 END), 0) AS total_paid
        FROM customers
        LEFT JOIN invoices ON customers.id = invoices.customer_id
        WHERE
            customers.name ILIKE {} OR
            customers.email ILIKE {}
        GROUP BY customers.id, customers.name, customers.email, customers.image_url
        ORDER BY customers.name ASC
        LIMIT {} OFFSET {}
        "#,
        &pattern,
        &pattern,
        ITEMS_PER_PAGE,
        page_offset(current_page),
    )
}

pub fn customers_count_query(query: &str) -> Result<TaggedQuery> {
    let pattern = search_pattern(query);
    sql!(
        r#"
        SELECT COUNT(*)
        FROM customers
        WHERE
            customers.name ILIKE {} OR
            customers.email ILIKE {}
        "#,
        &pattern,
        &pattern,
    )
}

impl Database {
    /// Every customer's id and name, for select boxes
    pub async fn fetch_customers(&self) -> Result<Vec<CustomerField>> {
        let run = async {
            sql!("SELECT id, name FROM customers ORDER BY name ASC")?
                .fetch_all::<CustomerField>(self.get_pool())
                .await
        };
        run.await.map_err(DashboardError::wrap("Failed to fetch all customers."))
    }

    pub async fn fetch_customer_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let run = async {
            sql!(
                "SELECT id, name, email, image_url FROM customers WHERE id = {}",
                id
            )?
            .fetch_optional::<Customer>(self.get_pool())
            .await
        };
        run.await.map_err(DashboardError::wrap("Failed to fetch customer."))
    }

    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
        current_page: i64,
    ) -> Result<Vec<CustomersTable>> {
        let run = async {
            filtered_customers_query(query, current_page)?
                .fetch_all::<CustomersTableRow>(self.get_pool())
                .await
        };
        let rows = run
            .await
            .map_err(DashboardError::wrap("Failed to fetch customer table."))?;

        Ok(rows.into_iter().map(CustomersTable::from).collect())
    }

    pub async fn fetch_customers_pages(&self, query: &str) -> Result<i64> {
        let run = async {
            customers_count_query(query)?
                .fetch_scalar::<i64>(self.get_pool())
                .await
        };
        let count = run
            .await
            .map_err(DashboardError::wrap("Failed to fetch total number of customers."))?;

        Ok(total_pages(count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sql::SqlValue;

    #[test]
    fn customer_search_matches_name_and_email() {
        let query = filtered_customers_query("globex", 1).unwrap();

        assert!(query.sql().contains("customers.name ILIKE $1"));
        assert!(query.sql().contains("customers.email ILIKE $2"));
        assert!(query.sql().contains("LIMIT $3 OFFSET $4"));
        assert_eq!(
            query.params(),
            &[
                SqlValue::Text("%globex%".into()),
                SqlValue::Text("%globex%".into()),
                SqlValue::BigInt(6),
                SqlValue::BigInt(0),
            ]
        );
    }

    #[test]
    fn count_uses_the_same_filter() {
        let query = customers_count_query("Acme").unwrap();
        assert!(query.sql().contains("customers.email ILIKE $2"));
        assert_eq!(query.params().len(), 2);
    }
}
