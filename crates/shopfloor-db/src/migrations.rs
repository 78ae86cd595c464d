//! Embedded SQL migration runner.
//!
//! Migrations are SQL files embedded at compile time. They run sequentially
//! on startup, tracked by the `_shopfloor_migrations` table. Each migration
//! runs exactly once — if it has already been applied, it is skipped.
//!
//! Parent tables (`lines`, `products`) are created before `work_orders` so
//! its `REFERENCES` clauses resolve at creation time.

use rusqlite::Connection;
use thiserror::Error;

/// A single embedded migration.
struct Migration {
    name: &'static str,
    sql: &'static str,
}

/// All migrations in order. New migrations are appended here.
const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "000_lines",
        sql: include_str!("migrations/000_lines.sql"),
    },
    Migration {
        name: "001_products",
        sql: include_str!("migrations/001_products.sql"),
    },
    Migration {
        name: "002_work_orders",
        sql: include_str!("migrations/002_work_orders.sql"),
    },
    Migration {
        name: "003_employees",
        sql: include_str!("migrations/003_employees.sql"),
    },
];

/// Errors that can occur during migration execution.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A SQL statement within a migration failed.
    #[error("migration '{name}' failed: {source}")]
    ExecutionFailed {
        /// The name of the migration that failed.
        name: String,
        /// The underlying SQLite error.
        source: rusqlite::Error,
    },

    /// Failed to query migration state.
    #[error("failed to check migration state: {0}")]
    StateQuery(rusqlite::Error),
}

/// Runs all pending migrations against the given connection.
///
/// Migrations that have already been applied (tracked in
/// `_shopfloor_migrations`) are skipped. New migrations are applied in order
/// and recorded, each inside its own transaction.
///
/// # Errors
///
/// Returns `MigrationError` if any migration fails to execute or if the
/// migration tracking table cannot be queried.
pub fn run_migrations(conn: &Connection) -> Result<usize, MigrationError> {
    run_migrations_from_list(conn, MIGRATIONS)
}

fn run_migrations_from_list(
    conn: &Connection,
    migrations: &[Migration],
) -> Result<usize, MigrationError> {
    // The tracking table must exist before we can check what's been applied.
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS _shopfloor_migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .map_err(|e| MigrationError::ExecutionFailed {
        name: "_shopfloor_migrations_bootstrap".to_string(),
        source: e,
    })?;

    let mut applied = 0;

    for migration in migrations {
        let already_applied: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM _shopfloor_migrations WHERE name = ?1",
                [migration.name],
                |row| row.get(0),
            )
            .map_err(MigrationError::StateQuery)?;

        if already_applied {
            tracing::debug!(
                migration = migration.name,
                "migration already applied, skipping"
            );
            continue;
        }

        tracing::info!(migration = migration.name, "applying migration");

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| MigrationError::ExecutionFailed {
                name: migration.name.to_string(),
                source: e,
            })?;

        tx.execute_batch(migration.sql)
            .map_err(|e| MigrationError::ExecutionFailed {
                name: migration.name.to_string(),
                source: e,
            })?;

        tx.execute(
            "INSERT INTO _shopfloor_migrations (name) VALUES (?1)",
            [migration.name],
        )
        .map_err(|e| MigrationError::ExecutionFailed {
            name: migration.name.to_string(),
            source: e,
        })?;

        tx.commit().map_err(|e| MigrationError::ExecutionFailed {
            name: migration.name.to_string(),
            source: e,
        })?;

        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn open_with_foreign_keys() -> Connection {
        let conn = Connection::open_in_memory().expect("should open in-memory db");
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .expect("should enable foreign keys");
        conn
    }

    #[test]
    fn run_migrations_on_fresh_db() {
        let conn = open_with_foreign_keys();
        let applied = run_migrations(&conn).expect("migrations should succeed");
        assert_eq!(applied, 4, "should apply all schema migrations");

        let count: i32 = conn
            .query_row("SELECT COUNT(*) FROM _shopfloor_migrations", [], |row| {
                row.get(0)
            })
            .expect("should query migration count");
        assert_eq!(count, 4);
    }

    #[test]
    fn run_migrations_idempotent() {
        let conn = open_with_foreign_keys();

        let first = run_migrations(&conn).expect("first run should succeed");
        assert_eq!(first, 4);

        let second = run_migrations(&conn).expect("second run should succeed");
        assert_eq!(second, 0, "no new migrations to apply");
    }

    #[test]
    fn all_schema_tables_exist_after_migration() {
        let conn = open_with_foreign_keys();
        run_migrations(&conn).expect("migrations should succeed");

        for table in ["lines", "products", "work_orders", "employees"] {
            let exists: bool = conn
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                    [table],
                    |row| row.get(0),
                )
                .expect("should query sqlite_master");
            assert!(exists, "{table} table should exist");
        }
    }

    #[test]
    fn work_order_foreign_keys_are_enforced() {
        let conn = open_with_foreign_keys();
        run_migrations(&conn).expect("migrations should succeed");

        // No lines or products exist, so both references are dangling.
        let result = conn.execute(
            "INSERT INTO work_orders (order_number, quantity, status, line_id, product_id)
             VALUES ('WO-0001', 10, 'PLANNED', 1, 1)",
            [],
        );

        let err = result.expect_err("insert with dangling references should fail");
        assert!(
            err.to_string().contains("FOREIGN KEY constraint failed"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn work_order_insert_succeeds_with_resolvable_references() {
        let conn = open_with_foreign_keys();
        run_migrations(&conn).expect("migrations should succeed");

        conn.execute(
            "INSERT INTO lines (name, location) VALUES ('Assembly 1', 'Hall A')",
            [],
        )
        .expect("should insert line");
        conn.execute(
            "INSERT INTO products (code, name, category) VALUES ('P-100', 'Widget', 'Widgets')",
            [],
        )
        .expect("should insert product");

        conn.execute(
            "INSERT INTO work_orders (order_number, quantity, status, line_id, product_id)
             VALUES ('WO-0001', 10, 'PLANNED', 1, 1)",
            [],
        )
        .expect("insert with resolvable references should succeed");
    }

    #[test]
    fn migration_side_effects_rollback_when_tracking_insert_fails() {
        let conn = open_with_foreign_keys();
        let migrations = [Migration {
            name: "900_tracking_insert_conflict",
            sql: "
                CREATE TABLE rollback_probe (id INTEGER PRIMARY KEY);
                INSERT INTO _shopfloor_migrations (name) VALUES ('900_tracking_insert_conflict');
            ",
        }];

        let err = run_migrations_from_list(&conn, &migrations)
            .expect_err("tracking insert conflict should fail migration");

        match err {
            MigrationError::ExecutionFailed { name, .. } => {
                assert_eq!(name, "900_tracking_insert_conflict")
            }
            other => panic!("unexpected error type: {other:?}"),
        }

        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'rollback_probe')",
                [],
                |row| row.get(0),
            )
            .expect("should query sqlite_master");

        assert!(
            !exists,
            "schema side effects should be rolled back when tracking insert fails"
        );
    }
}
