//! Dashboard aggregates.
//!
//! A fixed catalogue of read-only queries. Each one is independent of the
//! others and reads whatever the store holds at call time. Date windows are
//! computed here with chrono and bound as parameters; the `*_on` / `*_at`
//! variants take the reference day or instant explicitly.

use super::db::Db;
use crate::libs::error::{Result, TaskError};
use crate::libs::priority::{quadrant, Quadrant, DASHBOARD_THRESHOLD};
use crate::libs::task::Status;
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use rusqlite::params;
use serde::Serialize;

/// Subjects kept per quadrant for display.
pub const QUADRANT_SAMPLE_SIZE: usize = 3;

const COMPLETION_WINDOW_DAYS: i64 = 30;

const COUNT_NOT_CLOSED: &str = "SELECT COUNT(*) FROM tasks WHERE status != ?1";
const COUNT_DUE_BETWEEN: &str = "SELECT COUNT(*) FROM tasks WHERE due_date BETWEEN ?1 AND ?2 AND status != ?3";
const COUNT_HIGH_PRIORITY: &str =
    "SELECT COUNT(*) FROM tasks WHERE importance >= ?1 AND urgency >= ?1 AND status NOT IN (?2, ?3)";
const COUNT_DUE_ON: &str = "SELECT COUNT(*) FROM tasks WHERE due_date = ?1 AND status NOT IN (?2, ?3)";
const COUNT_DUE_BEFORE: &str = "SELECT COUNT(*) FROM tasks WHERE due_date < ?1 AND status NOT IN (?2, ?3)";
const COMPLETION_SINCE: &str = "SELECT
    COUNT(*),
    SUM(CASE WHEN status = ?2 THEN 1 ELSE 0 END)
FROM tasks
WHERE created_at >= ?1";
const STATUS_DISTRIBUTION: &str =
    "SELECT status, COUNT(*) AS count FROM tasks GROUP BY status ORDER BY count DESC, status";
const CATEGORY_BREAKDOWN: &str = "SELECT c.category_name, COUNT(t.task_id) AS count
FROM categories c
JOIN tasks t ON t.category_id = c.category_id
GROUP BY c.category_id, c.category_name
HAVING COUNT(t.task_id) > 0
ORDER BY count DESC, c.category_name
LIMIT ?1";
const ACTIVE_SCORES: &str = "SELECT importance, urgency, subject
FROM tasks
WHERE status NOT IN (?1, ?2)
AND importance IS NOT NULL
AND urgency IS NOT NULL
ORDER BY task_id";
const RECENT_ACTIVITY: &str = "SELECT
    DATE(created_at) AS day,
    COUNT(*),
    SUM(CASE WHEN status = ?2 THEN 1 ELSE 0 END)
FROM tasks
WHERE created_at >= ?1
GROUP BY DATE(created_at)
ORDER BY day DESC";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category_name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuadrantSummary {
    pub quadrant: Quadrant,
    pub count: i64,
    pub sample_subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub created: i64,
    pub completed: i64,
}

/// Metric cards and sidebar counters in one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub active_tasks: i64,
    pub due_this_week: i64,
    pub high_priority: i64,
    pub completion_rate: f64,
    pub due_today: i64,
    pub overdue: i64,
}

/// Sunday-to-Saturday week containing `day`.
pub fn week_bounds(day: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = day - Duration::days(day.weekday().num_days_from_sunday() as i64);
    (start, start + Duration::days(6))
}

/// Share of `completed` in `total` as a percentage; 0 when nothing was created.
pub fn completion_rate(completed: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    completed as f64 * 100.0 / total as f64
}

fn timestamp(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Dashboard aggregate queries over the shared pool.
pub struct Stats {
    db: Db,
}

impl Stats {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    fn count<P: rusqlite::Params>(&self, operation: &'static str, sql: &str, params: P) -> Result<i64> {
        self.db.query_one(operation, sql, params, |row| row.get(0))
    }

    /// Tasks not yet closed.
    pub fn count_active_tasks(&self) -> Result<i64> {
        self.count("count_active_tasks", COUNT_NOT_CLOSED, params![Status::Closed])
    }

    /// Open tasks due in the current Sunday-to-Saturday week.
    pub fn count_due_this_week(&self) -> Result<i64> {
        self.count_due_this_week_on(today())
    }

    /// Same as [`count_due_this_week`](Self::count_due_this_week) for the week containing `day`.
    pub fn count_due_this_week_on(&self, day: NaiveDate) -> Result<i64> {
        let (start, end) = week_bounds(day);
        self.count("count_due_this_week", COUNT_DUE_BETWEEN, params![start, end, Status::Closed])
    }

    /// Both scores at least 4, still active.
    pub fn count_high_priority(&self) -> Result<i64> {
        self.count(
            "count_high_priority",
            COUNT_HIGH_PRIORITY,
            params![DASHBOARD_THRESHOLD, Status::Closed, Status::Deferred],
        )
    }

    /// Active tasks due today.
    pub fn count_due_today(&self) -> Result<i64> {
        self.count_due_on(today())
    }

    /// Active tasks due on `day`; closed and deferred tasks are skipped.
    pub fn count_due_on(&self, day: NaiveDate) -> Result<i64> {
        self.count("count_due_today", COUNT_DUE_ON, params![day, Status::Closed, Status::Deferred])
    }

    /// Active tasks whose due date has passed.
    pub fn count_overdue(&self) -> Result<i64> {
        self.count_overdue_on(today())
    }

    /// Active tasks whose due date is strictly before `day`.
    pub fn count_overdue_on(&self, day: NaiveDate) -> Result<i64> {
        self.count("count_overdue", COUNT_DUE_BEFORE, params![day, Status::Closed, Status::Deferred])
    }

    /// Share of tasks created in the last 30 days that are now closed, in
    /// percent. Zero when nothing was created.
    pub fn completion_rate_last_30_days(&self) -> Result<f64> {
        self.completion_rate_last_30_days_at(now())
    }

    pub fn completion_rate_last_30_days_at(&self, at: NaiveDateTime) -> Result<f64> {
        let since = at - Duration::days(COMPLETION_WINDOW_DAYS);
        let (total, completed): (i64, Option<i64>) = self.db.query_one(
            "completion_rate_last_30_days",
            COMPLETION_SINCE,
            params![timestamp(since), Status::Closed],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(completion_rate(completed.unwrap_or(0), total))
    }

    /// Count per status over all tasks, largest first.
    pub fn status_distribution(&self) -> Result<Vec<StatusCount>> {
        self.db.query("status_distribution", STATUS_DISTRIBUTION, [], |row| {
            Ok(StatusCount {
                status: row.get(0)?,
                count: row.get(1)?,
            })
        })
    }

    /// Categories by task count, largest first. Empty categories never appear.
    pub fn category_breakdown(&self, limit: usize) -> Result<Vec<CategoryCount>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.db.query("category_breakdown", CATEGORY_BREAKDOWN, params![limit], |row| {
            Ok(CategoryCount {
                category_name: row.get(0)?,
                count: row.get(1)?,
            })
        })
    }

    /// Active tasks grouped by Eisenhower quadrant, in matrix order.
    ///
    /// Rows are classified with [`quadrant`] rather than a SQL CASE so the
    /// thresholds live in one place. Empty quadrants are left out.
    pub fn quadrant_breakdown(&self) -> Result<Vec<QuadrantSummary>> {
        let rows: Vec<(i64, i64, String)> = self.db.query(
            "quadrant_breakdown",
            ACTIVE_SCORES,
            params![Status::Closed, Status::Deferred],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        let mut summaries: Vec<QuadrantSummary> = Quadrant::ALL
            .iter()
            .map(|&q| QuadrantSummary {
                quadrant: q,
                count: 0,
                sample_subjects: Vec::new(),
            })
            .collect();

        for (importance, urgency, subject) in rows {
            let q = quadrant(importance, urgency);
            if let Some(summary) = summaries.iter_mut().find(|s| s.quadrant == q) {
                summary.count += 1;
                if summary.sample_subjects.len() < QUADRANT_SAMPLE_SIZE {
                    summary.sample_subjects.push(subject);
                }
            }
        }

        summaries.retain(|s| s.count > 0);
        Ok(summaries)
    }

    /// Created/closed counts per creation day, newest day first.
    pub fn recent_activity(&self, days: i64) -> Result<Vec<DailyActivity>> {
        self.recent_activity_at(days, now())
    }

    /// Window of `days` days ending at `at`.
    ///
    /// A window reaching past the representable calendar is a validation
    /// error, never a panic.
    pub fn recent_activity_at(&self, days: i64, at: NaiveDateTime) -> Result<Vec<DailyActivity>> {
        let since = Duration::try_days(days.max(0))
            .and_then(|window| at.checked_sub_signed(window))
            .ok_or_else(|| TaskError::validation("days", format!("{} days reaches outside the calendar", days)))?;
        self.db.query(
            "recent_activity",
            RECENT_ACTIVITY,
            params![timestamp(since), Status::Closed],
            |row| {
                Ok(DailyActivity {
                    date: row.get(0)?,
                    created: row.get(1)?,
                    completed: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
                })
            },
        )
    }

    /// All metric cards and sidebar counters as of now.
    pub fn summary(&self) -> Result<DashboardSummary> {
        self.summary_at(now())
    }

    pub fn summary_at(&self, at: NaiveDateTime) -> Result<DashboardSummary> {
        let day = at.date();
        Ok(DashboardSummary {
            active_tasks: self.count_active_tasks()?,
            due_this_week: self.count_due_this_week_on(day)?,
            high_priority: self.count_high_priority()?,
            completion_rate: self.completion_rate_last_30_days_at(at)?,
            due_today: self.count_due_on(day)?,
            overdue: self.count_overdue_on(day)?,
        })
    }
}
