//! Tagged queries: SQL templates whose holes become positional parameters.
//!
//! A template is written with `{}` holes, one per value:
//!
//! ```ignore
//! let query = sql!("SELECT * FROM invoices WHERE id = {}", id)?;
//! assert_eq!(query.sql(), "SELECT * FROM invoices WHERE id = $1");
//! ```
//!
//! Values never reach the SQL text; they are bound in order at execution.

use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{DashboardError, Result};

/// Marker for a value hole in a template
pub const HOLE: &str = "{}";

/// A value bound to a query placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Int(i32),
    BigInt(i64),
    Float(f64),
    Uuid(Uuid),
    Date(NaiveDate),
    Null,
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        SqlValue::Text(value.clone())
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::BigInt(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<Uuid> for SqlValue {
    fn from(value: Uuid) -> Self {
        SqlValue::Uuid(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        SqlValue::Date(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// A parameterized query ready to run
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedQuery {
    sql: String,
    params: Vec<SqlValue>,
}

// Query, QueryAs and QueryScalar share `bind` but no trait.
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for value in $params {
            query = match value {
                SqlValue::Text(v) => query.bind(v.as_str()),
                SqlValue::Int(v) => query.bind(*v),
                SqlValue::BigInt(v) => query.bind(*v),
                SqlValue::Float(v) => query.bind(*v),
                SqlValue::Uuid(v) => query.bind(*v),
                SqlValue::Date(v) => query.bind(*v),
                SqlValue::Null => query.bind(Option::<String>::None),
            };
        }
        query
    }};
}

impl TaggedQuery {
    /// Join template fragments with `$n` placeholders.
    ///
    /// There must be exactly one more fragment than there are values.
    pub fn from_parts(fragments: &[&str], values: Vec<SqlValue>) -> Result<Self> {
        if fragments.is_empty() || fragments.len() != values.len() + 1 {
            return Err(DashboardError::TaggedTemplate {
                fragments: fragments.len(),
                values: values.len(),
            });
        }

        let mut sql = String::from(fragments[0]);
        for (index, fragment) in fragments.iter().enumerate().skip(1) {
            sql.push('$');
            sql.push_str(&index.to_string());
            sql.push_str(fragment);
        }

        Ok(Self {
            sql,
            params: values,
        })
    }

    /// Split a template on its `{}` holes and translate it.
    pub fn from_template(template: &str, values: Vec<SqlValue>) -> Result<Self> {
        let fragments: Vec<&str> = template.split(HOLE).collect();
        Self::from_parts(&fragments, values)
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }

    /// Run a statement and return the number of affected rows
    pub async fn execute(&self, pool: &PgPool) -> Result<u64> {
        tracing::debug!(sql = %self.sql, params = self.params.len(), "execute");
        let query = bind_params!(sqlx::query(&self.sql), &self.params);
        let result = query.execute(pool).await?;
        Ok(result.rows_affected())
    }

    pub async fn fetch_all<T>(&self, pool: &PgPool) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %self.sql, params = self.params.len(), "fetch_all");
        let query = bind_params!(sqlx::query_as::<_, T>(&self.sql), &self.params);
        Ok(query.fetch_all(pool).await?)
    }

    pub async fn fetch_optional<T>(&self, pool: &PgPool) -> Result<Option<T>>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %self.sql, params = self.params.len(), "fetch_optional");
        let query = bind_params!(sqlx::query_as::<_, T>(&self.sql), &self.params);
        Ok(query.fetch_optional(pool).await?)
    }

    pub async fn fetch_one<T>(&self, pool: &PgPool) -> Result<T>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %self.sql, params = self.params.len(), "fetch_one");
        let query = bind_params!(sqlx::query_as::<_, T>(&self.sql), &self.params);
        Ok(query.fetch_one(pool).await?)
    }

    /// Fetch the first column of the first row
    pub async fn fetch_scalar<T>(&self, pool: &PgPool) -> Result<T>
    where
        (T,): for<'r> FromRow<'r, PgRow>,
        T: Send + Unpin,
    {
        tracing::debug!(sql = %self.sql, params = self.params.len(), "fetch_scalar");
        let query = bind_params!(sqlx::query_scalar::<_, T>(&self.sql), &self.params);
        Ok(query.fetch_one(pool).await?)
    }
}

/// Build a [`TaggedQuery`] from a template with `{}` holes.
///
/// Evaluates to `Result<TaggedQuery>`; a hole/value count mismatch is an error.
#[macro_export]
macro_rules! sql {
    ($template:expr $(, $value:expr)* $(,)?) => {
        $crate::db::sql::TaggedQuery::from_template(
            $template,
            vec![$($crate::db::sql::SqlValue::from($value)),*],
        )
    };
}
