//! Connection pool settings.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

/// Settings for the PostgreSQL connection pool.
///
/// The server binary fills this from its environment; tests construct it
/// directly with small pool sizes.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string
    pub database_url: String,

    /// Upper bound on pooled connections
    pub max_connections: u32,

    /// Connections kept open while the pool is idle
    pub min_connections: u32,

    /// Seconds to wait when acquiring a connection
    pub connection_timeout_secs: u64,

    /// Seconds before an idle connection is dropped
    pub idle_timeout_secs: u64,

    /// Seconds before a connection is recycled
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    /// Local development defaults against `credit_wallet_db`.
    pub fn development() -> Self {
        Self {
            database_url: "postgres://postgres@localhost/credit_wallet_db".to_string(),
            max_connections: 20,
            min_connections: 5,
            connection_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }

    /// Pool options carrying these settings, minus the URL.
    pub(crate) fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connection_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(self.max_lifetime_secs))
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::development()
    }
}
