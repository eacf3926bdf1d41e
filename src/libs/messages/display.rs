//! Display implementation for taskdash messages.
//!
//! All user-facing text lives in this one match, so wording stays consistent
//! and every new variant needs an explicit rendering.

use super::types::Message;
use crate::libs::priority::{MAX_SCORE, MIN_SCORE};
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(id, subject) => format!("Task #{} '{}' created.", id, subject),
            Message::TaskCompleted(id) => format!("Task #{} closed.", id),
            Message::TaskNotFoundWithId(id) => format!("Task with ID {} not found.", id),
            Message::TasksFound(count) => format!("Found {} tasks", count),
            Message::NoTasksMatchingFilters => "No tasks found matching your filters".to_string(),
            Message::PromptTaskSubject => "Subject".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskCategory => "Category".to_string(),
            Message::PromptTaskStatus => "Status".to_string(),
            Message::PromptImportance => format!("Importance ({}-{})", MIN_SCORE, MAX_SCORE),
            Message::PromptUrgency => format!("Urgency ({}-{})", MIN_SCORE, MAX_SCORE),
            Message::PromptDueDate => "Due date (YYYY-MM-DD, optional)".to_string(),
            Message::InvalidDueDate(value) => format!("'{}' is not a valid date, expected YYYY-MM-DD", value),
            Message::ScoreRange => format!("Value must be between {} and {}", MIN_SCORE, MAX_SCORE),
            Message::NoCategoryOption => "(no category)".to_string(),
            Message::ConfirmCompleteTask(subject) => format!("Close task '{}'?", subject),

            // === CATEGORY MESSAGES ===
            Message::CategoryCreated(name) => format!("Category '{}' created.", name),
            Message::CategoryNotFound(name) => format!("Category '{}' not found.", name),
            Message::CategoryListHeader => "Categories:".to_string(),
            Message::NoCategoriesFound => "No categories found.".to_string(),

            // === DASHBOARD MESSAGES ===
            Message::DashboardHeader => "📊 Dashboard".to_string(),
            Message::SidebarHeader => "📋 Today".to_string(),
            Message::StatusDistributionHeader => "Status distribution".to_string(),
            Message::CategoryBreakdownHeader => "Tasks by category".to_string(),
            Message::MatrixHeader => "🎯 Eisenhower Matrix".to_string(),
            Message::RecentActivityHeader(days) => format!("📈 Recent Activity (last {} days)", days),
            Message::NoActiveTasks => "No active tasks.".to_string(),
            Message::NoTasksYet => "No tasks yet. Add one with `taskdash add`.".to_string(),
            Message::NoRecentActivity => "No tasks created recently.".to_string(),
            Message::NoCategorizedTasks => "No tasks are assigned to a category.".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigModuleDatabase => "Database settings".to_string(),
            Message::ConfigModuleDashboard => "Dashboard settings".to_string(),
            Message::PromptDatabasePath => "Database file (empty for default location)".to_string(),
            Message::PromptPoolSize => "Connection pool size".to_string(),
            Message::PoolSizeRange => "Pool size must be at least 1".to_string(),
            Message::PromptUserId => "Your user ID".to_string(),
            Message::PromptCategoryLimit => "Categories shown in the breakdown".to_string(),
            Message::PromptActivityDays => "Recent activity window (days)".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseVersion(current, latest) => format!("Schema version {} (latest {})", current, latest),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::NoMigrationsApplied => "No migrations applied yet".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Export written to {}", path),
            Message::OutputNeedsFormat => "--output needs --format csv or --format json".to_string(),

            // === GENERIC ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", s)
    }
}
