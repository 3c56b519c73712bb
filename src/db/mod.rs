pub mod sql;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::config::{self, Config};
use crate::error::Result;

/// Handle to the dashboard database
#[derive(Clone, Debug)]
pub struct Database {
    pool: PgPool,
}

static CLIENT: OnceCell<Database> = OnceCell::const_new();

impl Database {
    /// Connect using the loaded configuration
    pub async fn new(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(config.database_url())
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "database connection established"
        );

        Ok(Self { pool })
    }

    /// Build a handle without opening a connection yet.
    ///
    /// The first query connects; until then nothing touches the server.
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("migrations applied");
        Ok(())
    }
}

/// Initialize a database handle from configuration
pub async fn init(config: &Config) -> Result<Database> {
    Database::new(config).await
}

/// Process-wide handle, created on first use.
///
/// Configuration is read from the environment the first time through;
/// concurrent first callers wait on the same initialization.
pub async fn get_client() -> Result<&'static Database> {
    CLIENT
        .get_or_try_init(|| async {
            let config = config::init()?;
            init(&config).await
        })
        .await
}
