use diesel::{
    connection::SimpleConnection,
    r2d2::{self, ConnectionManager, CustomizeConnection, Pool},
    SqliteConnection,
};
use thiserror::Error;
use tokio::task::{self, JoinError};

#[derive(Debug, Error)]
pub enum PoolError {
    #[error(transparent)]
    Join(#[from] JoinError),

    #[error(transparent)]
    Pool(#[from] r2d2::PoolError),
}

/// Applied to every connection the pool hands out
#[derive(Debug)]
pub(crate) struct ConnectionOptions {
    pub busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

#[derive(Clone)]
pub struct DbPool {
    inner: Pool<ConnectionManager<SqliteConnection>>,
}

impl DbPool {
    /// Run the code inside a context with a database connection
    ///
    /// The closure is executed on the blocking thread pool.
    pub async fn with_connection<F, T, E>(&self, func: F) -> Result<T, E>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<PoolError> + Send + 'static,
    {
        let pool = self.inner.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(PoolError::from)?;
            func(&mut *conn)
        })
        .await
        .map_err(PoolError::from)?
    }

    /// Run the code inside a context with a database transaction
    ///
    /// The transaction is rolled back if the closure returns an error.
    pub async fn with_transaction<F, T, E>(&self, func: F) -> Result<T, E>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<PoolError> + From<diesel::result::Error> + Send + 'static,
    {
        self.with_connection(|conn| conn.immediate_transaction(func))
            .await
    }
}

impl From<Pool<ConnectionManager<SqliteConnection>>> for DbPool {
    fn from(value: Pool<ConnectionManager<SqliteConnection>>) -> Self {
        Self { inner: value }
    }
}
