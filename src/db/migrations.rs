//! Database schema migration management and versioning.
//!
//! Schema changes are registered as numbered migrations and applied in order
//! inside a single transaction. Applied versions are recorded in the
//! `migrations` table, so opening an up-to-date database is a no-op.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdash::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("taskdash.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::libs::error::{Result, StoreContext};
use crate::libs::messages::Message;
use crate::{msg_debug, msg_error};
use rusqlite::{params, Connection, Transaction};

/// Tracking table for applied migrations.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const SCHEMA_CATEGORIES: &str = "CREATE TABLE IF NOT EXISTS categories (
    category_id INTEGER PRIMARY KEY,
    category_name TEXT NOT NULL,
    category_code TEXT,
    full_path TEXT
)";

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    task_id INTEGER PRIMARY KEY,
    subject TEXT NOT NULL CHECK (length(subject) BETWEEN 1 AND 500),
    description TEXT,
    category_id INTEGER REFERENCES categories(category_id),
    status TEXT NOT NULL DEFAULT 'Open'
        CHECK (status IN ('Idea', 'Open', 'In Progress', 'Blocked', 'Closed', 'Deferred')),
    importance INTEGER NOT NULL DEFAULT 3 CHECK (importance BETWEEN 1 AND 5),
    urgency INTEGER NOT NULL DEFAULT 3 CHECK (urgency BETWEEN 1 AND 5),
    due_date DATE,
    created_at TIMESTAMP NOT NULL,
    created_by INTEGER NOT NULL,
    assigned_to INTEGER NOT NULL
)";

/// One schema change.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Registry of all migrations, kept in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: categories and tasks
        self.add_migration(1, "create_categories_and_tasks", |tx| {
            tx.execute(SCHEMA_CATEGORIES, [])?;
            tx.execute(SCHEMA_TASKS, [])?;
            Ok(())
        });

        // Version 2: indices for the dashboard filters and aggregates
        self.add_migration(2, "add_task_indices", |tx| {
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_due_date ON tasks(due_date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_category_id ON tasks(category_id)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_categories_name ON categories(category_name)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Latest version this build knows about.
    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }

    /// Applies every pending migration in one transaction.
    ///
    /// A failing migration rolls back the whole batch; the transaction is
    /// dropped without commit.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, []).op("run_migrations")?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DatabaseUpToDate);
            return Ok(());
        }

        msg_debug!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction().op("run_migrations")?;

        for migration in pending {
            msg_debug!(Message::RunningMigration(migration.version, migration.name.to_string()));

            if let Err(e) = (migration.up)(&tx) {
                msg_error!(Message::MigrationFailed(migration.version, e.to_string()));
                return Err(e).op("run_migrations");
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )
            .op("run_migrations")?;
        }

        tx.commit().op("run_migrations")?;
        msg_debug!(Message::AllMigrationsCompleted);

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn
            .query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))
            .op("get_db_version")?;

        Ok(version.unwrap_or(0))
    }

    /// Whether `version` is recorded in the migrations table.
    pub fn is_migration_applied(&self, conn: &Connection, version: u32) -> Result<bool> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM migrations WHERE version = ?1", params![version], |row| row.get(0))
            .op("is_migration_applied")?;

        Ok(count > 0)
    }

    /// Applied migrations as (version, name, applied_at), oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn
            .prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")
            .op("get_migration_history")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))
            .op("get_migration_history")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .op("get_migration_history")?;

        Ok(history)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings `conn` up to the latest schema.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

/// Highest applied migration, or 0 for a database never migrated.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    if !has_migrations_table(conn)? {
        return Ok(0);
    }
    manager.get_current_version(conn)
}

/// Whether migrations are pending.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    Ok(get_db_version(conn)? < manager.latest_version())
}

fn has_migrations_table(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'migrations'",
            [],
            |row| row.get(0),
        )
        .op("get_db_version")?;
    Ok(count > 0)
}
