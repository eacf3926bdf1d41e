use super::formatter::{format_category, format_due, format_rate, truncate, LIST_SUBJECT_WIDTH, SAMPLE_SUBJECT_WIDTH};
use super::priority::Quadrant;
use super::task::Task;
use crate::db::categories::Category;
use crate::db::stats::{CategoryCount, DailyActivity, DashboardSummary, QuadrantSummary, StatusCount};
use prettytable::{row, Table};

/// Terminal renderings of task data.
///
/// Every method prints one `prettytable` table to stdout. Callers print the
/// section header and handle the empty case first.
pub struct View {}

impl View {
    /// Task list with priority marker, status, category, scores and dates.
    pub fn tasks(tasks: &[Task]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "PRIORITY", "SUBJECT", "STATUS", "CATEGORY", "I/U", "DUE", "CREATED"]);
        for task in tasks {
            let band = task.priority();
            table.add_row(row![
                task.task_id,
                format!("{} {}", band.marker(), band),
                truncate(&task.subject, LIST_SUBJECT_WIDTH),
                task.status,
                format_category(task.category_name.as_deref()),
                format!("{}/{}", task.importance, task.urgency),
                format_due(task.due_date),
                task.created_at.format("%Y-%m-%d"),
            ]);
        }
        table.printstd();
    }

    /// Category list in store order.
    pub fn categories(categories: &[Category]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "CODE", "PATH"]);
        for category in categories {
            table.add_row(row![
                category.category_id,
                category.category_name,
                category.category_code.as_deref().unwrap_or(""),
                category.full_path.as_deref().unwrap_or(""),
            ]);
        }
        table.printstd();
    }

    /// The four metric cards as a single row.
    pub fn summary(summary: &DashboardSummary) {
        let mut table = Table::new();

        table.add_row(row!["ACTIVE TASKS", "THIS WEEK", "HIGH PRIORITY", "COMPLETION RATE"]);
        table.add_row(row![
            summary.active_tasks,
            summary.due_this_week,
            summary.high_priority,
            format_rate(summary.completion_rate),
        ]);
        table.printstd();
    }

    /// Due-today and overdue counters.
    pub fn sidebar(summary: &DashboardSummary) {
        let mut table = Table::new();

        table.add_row(row!["TODAY", "OVERDUE"]);
        table.add_row(row![summary.due_today, summary.overdue]);
        table.printstd();
    }

    /// Task count per status.
    pub fn status_distribution(counts: &[StatusCount]) {
        let mut table = Table::new();

        table.add_row(row!["STATUS", "COUNT"]);
        for entry in counts {
            table.add_row(row![entry.status, entry.count]);
        }
        table.printstd();
    }

    /// Task count per category, as returned by the breakdown query.
    pub fn category_breakdown(counts: &[CategoryCount]) {
        let mut table = Table::new();

        table.add_row(row!["CATEGORY", "COUNT"]);
        for entry in counts {
            table.add_row(row![entry.category_name, entry.count]);
        }
        table.printstd();
    }

    /// Two-by-two grid: important row on top, urgent column on the right.
    pub fn matrix(summaries: &[QuadrantSummary]) {
        let render = |q: Quadrant| -> String {
            let summary = summaries.iter().find(|s| s.quadrant == q);
            let count = summary.map(|s| s.count).unwrap_or(0);
            let mut text = format!("{}\n{}\nCount: {}", q.label(), q.description(), count);
            for subject in summary.map(|s| s.sample_subjects.as_slice()).unwrap_or(&[]) {
                text.push_str(&format!("\n• {}", truncate(subject, SAMPLE_SUBJECT_WIDTH)));
            }
            text
        };

        let mut table = Table::new();
        table.add_row(row!["", "NOT URGENT", "URGENT"]);
        table.add_row(row!["IMPORTANT", render(Quadrant::Schedule), render(Quadrant::DoFirst)]);
        table.add_row(row!["NOT IMPORTANT", render(Quadrant::Eliminate), render(Quadrant::Delegate)]);
        table.printstd();
    }

    /// Created and closed counts per day, newest first.
    pub fn activity(days: &[DailyActivity]) {
        let mut table = Table::new();

        table.add_row(row!["DATE", "CREATED", "COMPLETED"]);
        for day in days {
            table.add_row(row![day.date.format("%Y-%m-%d"), day.created, day.completed]);
        }
        table.printstd();
    }
}
