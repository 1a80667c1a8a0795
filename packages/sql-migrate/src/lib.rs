//! Compile-time embedded SQL migrations for SQLite.
//!
//! Migration files live in a directory of the consuming crate (`migrations/` by
//! default). A build script calls [`list`] to generate an include file, the crate
//! embeds it with [`embed_migrations!`], and [`up`] applies whatever has not been
//! recorded in the `_migrations` table yet.

mod codegen;
mod runner;

pub use crate::codegen::list;
pub use crate::runner::{applied, up};

use thiserror::Error;

/// Error type for migration discovery and execution.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A migration's SQL failed to execute
    #[error("Migration '{id}' failed: {message}")]
    MigrationFailed { id: String, message: String },

    /// Environment variable not found
    #[error("Environment variable '{0}' not set")]
    EnvVarNotFound(String),

    /// Database error outside of a migration body
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type MigrateResult<T> = std::result::Result<T, Error>;

/// A single migration: a unique id (the file stem) and the SQL batch to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub id: &'static str,
    pub sql: &'static str,
}

impl Migration {
    pub const fn new(id: &'static str, sql: &'static str) -> Self {
        Self { id, sql }
    }
}

/// Expands to the `&[Migration]` slice generated by [`list`] in the build script.
///
/// # Example
/// ```ignore
/// static MIGRATIONS: &[sql_migrate::Migration] = sql_migrate::embed_migrations!();
/// ```
#[macro_export]
macro_rules! embed_migrations {
    () => {
        ::core::include!(::core::concat!(
            ::core::env!("OUT_DIR"),
            "/migrations_gen.rs"
        ))
    };
}
