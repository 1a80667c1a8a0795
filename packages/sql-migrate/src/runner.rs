use std::collections::HashSet;

use rusqlite::Connection;

use crate::{Error, MigrateResult, Migration};

/// Creates the `_migrations` tracking table if it doesn't exist.
fn ensure_migrations_table(conn: &Connection) -> MigrateResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Returns the ids of migrations already recorded as applied.
pub fn applied(conn: &Connection) -> MigrateResult<HashSet<String>> {
    ensure_migrations_table(conn)?;

    let mut statement = conn.prepare("SELECT id FROM _migrations")?;
    let ids = statement
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;

    Ok(ids)
}

/// Applies pending migrations in slice order and returns the ids that ran.
///
/// All pending migrations run inside a single transaction: if one fails, none of
/// them are recorded and the schema is left untouched.
///
/// # Errors
/// - [`Error::MigrationFailed`] when a migration's SQL fails.
/// - [`Error::Database`] for failures of the bookkeeping statements.
pub fn up(conn: &mut Connection, migrations: &[Migration]) -> MigrateResult<Vec<&'static str>> {
    let already_applied = applied(conn)?;

    let pending: Vec<&Migration> = migrations
        .iter()
        .filter(|m| !already_applied.contains(m.id))
        .collect();

    if pending.is_empty() {
        tracing::debug!(total = migrations.len(), "No pending migrations");
        return Ok(Vec::new());
    }

    let tx = conn.transaction()?;
    let mut ran = Vec::with_capacity(pending.len());

    for migration in pending {
        tx.execute_batch(migration.sql)
            .map_err(|e| Error::MigrationFailed {
                id: migration.id.to_string(),
                message: e.to_string(),
            })?;

        tx.execute("INSERT INTO _migrations(id) VALUES (?1)", [migration.id])?;
        tracing::info!(id = migration.id, "Applied migration");
        ran.push(migration.id);
    }

    tx.commit()?;

    Ok(ran)
}
