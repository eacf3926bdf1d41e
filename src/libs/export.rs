//! Task list output in machine-readable formats.
//!
//! The `tasks` command prints a table by default; `--format csv|json` writes
//! the same rows to stdout or to a file for spreadsheets and scripts.

use super::formatter::format_category;
use super::task::Task;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Terminal table
    #[default]
    Table,
    /// Pretty-printed JSON array
    Json,
    /// Comma-separated values with a header row
    Csv,
}

/// Flattened row used by both CSV and JSON output.
#[derive(Debug, Serialize)]
pub struct ExportTask {
    pub task_id: i64,
    pub subject: String,
    pub description: String,
    pub status: String,
    pub category: String,
    pub importance: i64,
    pub urgency: i64,
    pub priority: String,
    pub quadrant: String,
    pub due_date: Option<String>,
    pub created_at: String,
}

impl From<&Task> for ExportTask {
    fn from(task: &Task) -> Self {
        ExportTask {
            task_id: task.task_id,
            subject: task.subject.clone(),
            description: task.description.clone().unwrap_or_default(),
            status: task.status.to_string(),
            category: format_category(task.category_name.as_deref()),
            importance: task.importance,
            urgency: task.urgency,
            priority: task.priority().to_string(),
            quadrant: task.quadrant().label().to_string(),
            due_date: task.due_date.map(|d| d.format("%Y-%m-%d").to_string()),
            created_at: task.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Writes `tasks` as CSV with a header row taken from [`ExportTask`].
pub fn write_csv<W: Write>(tasks: &[Task], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for task in tasks {
        wtr.serialize(ExportTask::from(task))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `tasks` as a pretty-printed JSON array followed by a newline.
pub fn write_json<W: Write>(tasks: &[Task], mut writer: W) -> Result<()> {
    let rows: Vec<ExportTask> = tasks.iter().map(ExportTask::from).collect();
    serde_json::to_writer_pretty(&mut writer, &rows)?;
    writeln!(writer)?;
    Ok(())
}
