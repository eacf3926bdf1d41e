//! Store access: a bounded connection pool over the SQLite database.
//!
//! Every operation checks a connection out of the pool, runs one statement
//! and hands the connection back when the guard drops. No connection is held
//! between operations. Failures are tagged with the operation name so callers
//! see which query broke.

use super::migrations::init_with_migrations;
use crate::libs::config::Config;
use crate::libs::error::{Result, StoreContext};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, Params, Row};
use std::path::Path;
use tracing::debug;

/// Bounded pool of SQLite connections.
pub type ConnectionPool = Pool<SqliteConnectionManager>;
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

/// SQL name of the Unicode-aware lowercase function registered on every
/// pooled connection. SQLite's built-in `LOWER` only folds ASCII.
pub const UNICODE_LOWER_FN: &str = "unicode_lower";

/// Per-connection setup: pragmas plus the custom scalar functions.
fn init_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CONNECTION_PRAGMAS)?;
    conn.create_scalar_function(
        UNICODE_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )
}

#[derive(Clone)]
pub struct Db {
    pool: ConnectionPool,
}

impl Db {
    /// Opens the database named by the user configuration and applies migrations.
    pub fn new() -> anyhow::Result<Db> {
        let config = Config::read()?;
        let path = config.database_path()?;
        Ok(Self::open(&path, config.database.pool_size)?)
    }

    /// Opens `path` with at most `pool_size` connections and applies pending
    /// migrations. The file is created when missing.
    pub fn open(path: &Path, pool_size: u32) -> Result<Db> {
        let db = Self::open_without_migrations(path, pool_size)?;
        let mut conn = db.conn("open_database")?;
        init_with_migrations(&mut conn)?;
        drop(conn);
        Ok(db)
    }

    /// Opens the pool without touching the schema. Used for migration status.
    pub fn open_without_migrations(path: &Path, pool_size: u32) -> Result<Db> {
        debug!(path = %path.display(), pool_size, "opening connection pool");
        let manager = SqliteConnectionManager::file(path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size.max(1)).build(manager).op("open_database")?;
        Ok(Db { pool })
    }

    /// Checks out a connection for a single operation.
    pub fn conn(&self, operation: &'static str) -> Result<PooledConn> {
        self.pool.get().op(operation)
    }

    /// Runs a query and maps every row.
    pub fn query<T, P, F>(&self, operation: &'static str, sql: &str, params: P, map: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(operation, sql, "query");
        let conn = self.conn(operation)?;
        let mut stmt = conn.prepare(sql).op(operation)?;
        let rows = stmt.query_map(params, map).op(operation)?;
        rows.collect::<rusqlite::Result<Vec<T>>>().op(operation)
    }

    /// Runs a query expected to return exactly one row, such as a `COUNT(*)`.
    pub fn query_one<T, P, F>(&self, operation: &'static str, sql: &str, params: P, map: F) -> Result<T>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        debug!(operation, sql, "query_one");
        let conn = self.conn(operation)?;
        conn.query_row(sql, params, map).op(operation)
    }

    /// Runs a query returning at most one row.
    pub fn query_opt<T, P, F>(&self, operation: &'static str, sql: &str, params: P, map: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        use rusqlite::OptionalExtension;

        debug!(operation, sql, "query_opt");
        let conn = self.conn(operation)?;
        conn.query_row(sql, params, map).optional().op(operation)
    }

    /// Runs one INSERT and returns the generated row id.
    pub fn insert<P: Params>(&self, operation: &'static str, sql: &str, params: P) -> Result<i64> {
        debug!(operation, sql, "insert");
        let conn = self.conn(operation)?;
        conn.execute(sql, params).op(operation)?;
        Ok(conn.last_insert_rowid())
    }

    /// Runs one UPDATE/DELETE and returns the number of affected rows.
    pub fn execute<P: Params>(&self, operation: &'static str, sql: &str, params: P) -> Result<usize> {
        debug!(operation, sql, "execute");
        let conn = self.conn(operation)?;
        conn.execute(sql, params).op(operation)
    }
}
