pub mod memory;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use crate::config::{Config, StoreBackend};

pub use memory::MemoryUserStore;
pub use postgres::{create_pool, PgUserStore};
pub use store::UserStore;

/// Builds the store selected by `config`.
///
/// For PostgreSQL this opens the pool and applies pending migrations.
pub async fn connect(config: &Config) -> anyhow::Result<Arc<dyn UserStore>> {
    match config.backend()? {
        StoreBackend::Postgres => {
            let pool = create_pool(&config.database_url, config.database_max_connections).await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("Connected to PostgreSQL user store");
            Ok(Arc::new(PgUserStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory user store; data is lost on restart");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
