// src/database.rs
use std::sync::Arc;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use crate::repository::{MemoryProductRepository, PgProductRepository, ProductRepository};

const MEMORY_SCHEME: &str = "memory://";

pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Connects the product store named by `database_url` and applies pending migrations.
pub async fn connect_products(
    database_url: &str,
    max_connections: u32,
) -> Result<Arc<dyn ProductRepository>, sqlx::Error> {
    if database_url.starts_with(MEMORY_SCHEME) {
        info!("Using in-memory product store");
        return Ok(Arc::new(MemoryProductRepository::new()));
    }

    let pool = create_pool(database_url, max_connections).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Connected to database");
    Ok(Arc::new(PgProductRepository::new(pool)))
}
