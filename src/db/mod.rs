//! Persistence layer for taskdash.
//!
//! A thin set of repositories over the SQLite store. Each repository holds a
//! handle to the shared connection pool and issues one parameterized
//! statement per operation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdash::db::{db::Db, tasks::Tasks, stats::Stats};
//! use taskdash::libs::task::{NewTask, UserId};
//! use std::path::Path;
//!
//! let db = Db::open(Path::new("taskdash.db"), 5)?;
//! let id = Tasks::new(&db).insert(&NewTask::new("Review code").scores(4, 2), UserId(1))?;
//! let active = Stats::new(&db).count_active_tasks()?;
//! # Ok::<(), taskdash::libs::error::TaskError>(())
//! ```

/// Connection pool and the generic query/write primitives.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Flat category list.
pub mod categories;

/// Task creation, filtered listing and completion.
pub mod tasks;

/// Read-only dashboard aggregates.
pub mod stats;
