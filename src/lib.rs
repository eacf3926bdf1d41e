//! # Taskdash
//!
//! A single-user task dashboard over a relational store.
//!
//! ## Features
//!
//! - **Task Management**: add tasks and categories, close tasks
//! - **Filtered Lists**: status, category, priority band and text search
//! - **Prioritization**: priority bands and the Eisenhower matrix
//! - **Dashboard Metrics**: active/high-priority counts, weekly due tasks,
//!   30-day completion rate, status and category breakdowns, recent activity
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskdash::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
