//! Core library modules for taskdash.
//!
//! ## Features
//!
//! - **Domain**: task and status model, priority classification
//! - **Querying**: composable filtered-list query builder
//! - **Infrastructure**: configuration, data storage, typed errors, messaging
//! - **Presentation**: table views, formatting, CSV/JSON output
//!
//! ## Usage
//!
//! ```rust
//! use taskdash::libs::priority::{quadrant, Quadrant};
//! use taskdash::libs::task::NewTask;
//!
//! let task = NewTask::new("Prepare quarterly review").scores(4, 2);
//! assert!(task.validate().is_ok());
//! assert_eq!(quadrant(task.importance, task.urgency), Quadrant::Schedule);
//! ```

pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod priority;
pub mod query;
pub mod task;
pub mod view;
