#[macro_use]
extern crate tracing;

use self::pool::ConnectionOptions;
use diesel::{
    r2d2::{ConnectionManager, Pool},
    SqliteConnection,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tackboard_config::database::Configuration as DatabaseConfig;
use tackboard_error::{Error, Result};
use tokio::task;

pub use self::pool::{DbPool, PoolError};

mod pool;

pub mod changeset;
pub mod insert;
pub mod model;
#[allow(clippy::wildcard_imports)]
pub mod schema;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Connect to the database and run any pending migrations
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool> {
    let url = config.url.clone();
    let max_connections = config.max_connections;

    let pool = task::spawn_blocking(move || {
        let pool = Pool::builder()
            .max_size(max_connections)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout_ms: BUSY_TIMEOUT_MS,
            }))
            .build(ConnectionManager::<SqliteConnection>::new(url.as_str()))?;

        let mut conn = pool.get()?;
        let conn: &mut SqliteConnection = &mut conn;
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(Error::msg)?;
        debug!(count = applied.len(), "applied pending migrations");

        Ok::<_, Error>(pool)
    })
    .await??;

    Ok(pool.into())
}
