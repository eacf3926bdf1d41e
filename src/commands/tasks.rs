//! Task listing with filters and export formats.
//!
//! Without filters the list is the flat "recent" view, newest first. Any
//! filter switches to the filtered view, ordered by due date and priority,
//! where search covers subject and description. `--recent` forces the flat
//! view, whose search only looks at subjects.

use crate::{
    db::{db::Db, tasks::Tasks},
    libs::{
        export::{write_csv, write_json, OutputFormat},
        messages::Message,
        priority::PriorityRule,
        query::{BandSelection, ListView, TaskFilter},
        task::Status,
        view::View,
    },
    msg_bail_anyhow, msg_info, msg_print, msg_success,
};
use anyhow::Result;
use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum RuleArg {
    /// High when importance and urgency are both at least 3
    #[default]
    V1,
    /// High when importance or urgency is at least 4
    V2,
}

impl From<RuleArg> for PriorityRule {
    fn from(rule: RuleArg) -> Self {
        match rule {
            RuleArg::V1 => PriorityRule::BothAtLeastThree,
            RuleArg::V2 => PriorityRule::EitherAtLeastFour,
        }
    }
}

#[derive(Debug, Args)]
pub struct TasksArgs {
    /// Status to include; repeat for several (e.g. --status open --status in-progress)
    #[arg(short, long)]
    status: Vec<Status>,

    /// Category name ("All" means no restriction)
    #[arg(short, long)]
    category: Option<String>,

    /// Priority band: all, high, medium or low
    #[arg(short, long, default_value = "all")]
    priority: BandSelection,

    /// Rule used to compute the priority band
    #[arg(long, value_enum, default_value_t = RuleArg::V1)]
    rule: RuleArg,

    /// Case-insensitive text search
    #[arg(long)]
    search: Option<String>,

    /// Newest first, searching subjects only
    #[arg(long)]
    recent: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Write CSV/JSON output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl TasksArgs {
    fn filter(&self) -> TaskFilter {
        let mut filter = TaskFilter::new()
            .statuses(self.status.clone())
            .priority(self.priority, self.rule.into());
        if let Some(category) = &self.category {
            filter = filter.category(category);
        }
        if let Some(search) = &self.search {
            filter = filter.search(search);
        }
        filter
    }

    /// A table only goes to the terminal; `--output` needs csv or json.
    fn check_output(&self) -> Result<()> {
        if self.format == OutputFormat::Table && self.output.is_some() {
            msg_bail_anyhow!(Message::OutputNeedsFormat);
        }
        Ok(())
    }

    fn has_filters(&self) -> bool {
        !self.status.is_empty()
            || self.category.is_some()
            || self.priority != BandSelection::All
            || self.search.is_some()
    }

    fn view(&self) -> ListView {
        if self.recent || !self.has_filters() {
            ListView::Recent
        } else {
            ListView::Filtered
        }
    }
}

/// Lists tasks as a table or writes them as CSV/JSON.
pub fn cmd(args: TasksArgs) -> Result<()> {
    args.check_output()?;
    let filter = args.filter();
    let view = args.view();

    let db = Db::new()?;
    let tasks = Tasks::new(&db).fetch(&filter, view)?;

    match (args.format, &args.output) {
        (OutputFormat::Table, _) => {
            if tasks.is_empty() {
                msg_info!(Message::NoTasksMatchingFilters);
                return Ok(());
            }
            msg_print!(Message::TasksFound(tasks.len()), true);
            View::tasks(&tasks);
        }
        (format, Some(path)) => {
            let writer = BufWriter::new(File::create(path)?);
            match format {
                OutputFormat::Csv => write_csv(&tasks, writer)?,
                _ => write_json(&tasks, writer)?,
            }
            msg_success!(Message::ExportCompleted(path.display().to_string()));
        }
        (OutputFormat::Csv, None) => write_csv(&tasks, io::stdout().lock())?,
        (OutputFormat::Json, None) => write_json(&tasks, io::stdout().lock())?,
    }

    Ok(())
}
