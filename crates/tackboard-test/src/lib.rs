use std::future::Future;
use tackboard_config::database::Configuration as DatabaseConfig;
use tackboard_db::DbPool;

pub use self::agent::{Agent, TestResponse};

mod agent;

/// Run the test against a fresh, migrated database
///
/// The database lives in a temporary directory that is removed once the test finishes.
pub async fn database_test<F, Fut>(func: F) -> Fut::Output
where
    F: FnOnce(DbPool) -> Fut,
    Fut: Future,
{
    let directory = tempfile::tempdir().expect("Failed to create temporary directory");
    let db_path = directory.path().join("tackboard.db");

    let pool = tackboard_db::connect(&DatabaseConfig {
        url: db_path.to_string_lossy().into_owned().into(),
        max_connections: 4,
    })
    .await
    .expect("Failed to connect to database");

    let out = func(pool).await;
    drop(directory);

    out
}
