//! Relational storage for accounts, groups, posts, comments and follow edges.
//!
//! Every method maps database failures to [`AppError::internal_server_error`]
//! after logging them, so handlers can propagate with `?`.

mod accounts;
mod comments;
mod follows;
mod groups;
mod posts;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, warn};

#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Opens the database at `database_url` and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if database_url.contains(":memory:") {
            // Each connection to `:memory:` opens its own empty database, so keep a
            // single connection alive for the whole life of the pool.
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await.map_err(|e| {
            warn!("Error running migrations on {database_url} : {e}");
            sqlx::Error::from(e)
        })?;

        info!("Connected to {database_url}");

        Ok(Self { pool })
    }

    /// Fresh private database, used by tests.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        Self::connect("sqlite::memory:").await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
