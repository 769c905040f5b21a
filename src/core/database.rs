use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::core::config::DatabaseConfig;

/// Connect eagerly so an unreachable database fails startup.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database at {}", redact_url(&config.url));

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect(&config.url)
        .await
}

/// Drop credentials from a connection URL before it reaches the logs.
fn redact_url(url: &str) -> &str {
    url.rsplit_once('@').map(|(_, host)| host).unwrap_or("***")
}
