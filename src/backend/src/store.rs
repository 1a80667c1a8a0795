//! Shared handle to the SQLite database.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use sql_migrate::Migration;
use thiserror::Error;

static MIGRATIONS: &[Migration] = sql_migrate::embed_migrations!();

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("database connection lock poisoned")]
    Poisoned,

    #[error("database task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Migrate(#[from] sql_migrate::Error),
}

/// A single connection shared by every request.
///
/// Cloning is cheap; all clones use the same connection and access is
/// serialized by the inner mutex.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        tracing::info!(path = %path.display(), "Opened database");
        Ok(Self::from_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self::from_connection(Connection::open_in_memory()?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Applies the embedded schema migrations. Returns the ids that ran.
    pub fn migrate(&self) -> Result<Vec<&'static str>, StoreError> {
        let mut conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(sql_migrate::up(&mut conn, MIGRATIONS)?)
    }

    /// Runs `f` against the connection on the blocking thread pool.
    pub async fn with_connection<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(|_| StoreError::Poisoned)?;
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }
}
