//! Versioned schema migrations.
//!
//! Each migration runs inside its own transaction and is recorded in the
//! `migrations` table, so startup is idempotent: already-applied versions
//! are skipped. Migrations are registered in version order and never edited
//! once shipped.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, Transaction};
use tracing::info;

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_tasks_table",
    up: |tx| {
        tx.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                due_date TEXT NOT NULL,
                overdue INTEGER NOT NULL DEFAULT 0,
                completed INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;
        // Covers the sweep predicate (overdue = 0 AND due_date <= today).
        tx.execute(
            "CREATE INDEX IF NOT EXISTS idx_tasks_overdue ON tasks (overdue, due_date)",
            [],
        )?;
        Ok(())
    },
}];

/// Applies all pending migrations to the given connection.
pub fn apply(conn: &mut Connection) -> Result<()> {
    conn.execute(MIGRATIONS_TABLE, [])?;
    let current = current_version(conn)?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let tx = conn.transaction()?;
        (migration.up)(&tx).with_context(|| format!("migration v{} ({}) failed", migration.version, migration.name))?;
        tx.execute(
            "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
            params![migration.version, migration.name],
        )?;
        tx.commit()?;
        info!("applied migration v{} ({})", migration.version, migration.name);
    }

    Ok(())
}

/// The highest applied migration version, 0 for a fresh database.
pub fn current_version(conn: &Connection) -> Result<u32> {
    let version = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM migrations", [], |row| {
        row.get::<_, u32>(0)
    })?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply(&mut conn).unwrap();
        let first = current_version(&conn).unwrap();
        apply(&mut conn).unwrap();
        assert_eq!(current_version(&conn).unwrap(), first);
        assert_eq!(first, MIGRATIONS.last().unwrap().version);
    }

    #[test]
    fn tasks_table_exists_after_apply() {
        let mut conn = Connection::open_in_memory().unwrap();
        apply(&mut conn).unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'tasks'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }
}
