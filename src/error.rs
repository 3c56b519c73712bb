use thiserror::Error;

/// Errors raised by the dashboard's data layer
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),

    /// The template and the value list do not line up
    #[error("incorrect tagged template call: {fragments} fragments for {values} values")]
    TaggedTemplate { fragments: usize, values: usize },

    /// A wrapped database failure, displayed with its user-facing message
    #[error("{message}")]
    Query {
        message: &'static str,
        #[source]
        source: Box<DashboardError>,
    },
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    /// Log the failure and replace it with a generic message for the caller.
    pub fn wrap(message: &'static str) -> impl FnOnce(DashboardError) -> DashboardError {
        move |source| {
            tracing::error!("Database Error: {}", source);
            DashboardError::Query {
                message,
                source: Box::new(source),
            }
        }
    }
}
