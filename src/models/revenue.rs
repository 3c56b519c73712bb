use serde::Serialize;

/// Monthly revenue in whole dollars
#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq)]
pub struct Revenue {
    pub month: String,
    pub revenue: i32,
}
