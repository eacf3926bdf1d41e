use crate::libs::error::{Result, TaskError};
use crate::libs::priority::{self, PriorityBand, Quadrant, DEFAULT_SCORE, MAX_SCORE, MIN_SCORE};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum subject length in characters.
pub const SUBJECT_MAX_LEN: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Idea,
    Open,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Closed,
    Deferred,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::Idea,
        Status::Open,
        Status::InProgress,
        Status::Blocked,
        Status::Closed,
        Status::Deferred,
    ];

    /// Stored and displayed form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idea => "Idea",
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Blocked => "Blocked",
            Status::Closed => "Closed",
            Status::Deferred => "Deferred",
        }
    }

    /// Still on somebody's plate: neither closed nor deferred.
    pub fn is_active(&self) -> bool {
        !matches!(self, Status::Closed | Status::Deferred)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().to_lowercase() == normalized)
            .ok_or_else(|| TaskError::validation("status", format!("unknown status '{}'", s)))
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse().map_err(|e: TaskError| FromSqlError::Other(Box::new(e)))
    }
}

/// Identifier of the acting user, passed explicitly to every write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl Default for UserId {
    fn default() -> Self {
        UserId(1)
    }
}

/// A task row as read back from the store, joined with its category name.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub task_id: i64,
    pub subject: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub status: Status,
    pub importance: i64,
    pub urgency: i64,
    pub due_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
    pub created_by: i64,
    pub assigned_to: i64,
}

impl Task {
    /// Band shown in list views (matrix rule).
    pub fn priority(&self) -> PriorityBand {
        priority::priority_band_v1(self.importance, self.urgency)
    }

    /// Eisenhower quadrant of the task scores.
    pub fn quadrant(&self) -> Quadrant {
        priority::quadrant(self.importance, self.urgency)
    }
}

/// Input of the Add-Task form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub subject: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub status: Status,
    pub importance: i64,
    pub urgency: i64,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Open task with default scores and no category or due date.
    pub fn new(subject: &str) -> Self {
        NewTask {
            subject: subject.to_string(),
            description: None,
            category_id: None,
            status: Status::Open,
            importance: DEFAULT_SCORE,
            urgency: DEFAULT_SCORE,
            due_date: None,
        }
    }

    /// Sets the description; blank text clears it.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string()).filter(|d| !d.trim().is_empty());
        self
    }

    pub fn category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets importance and urgency. Range is checked by [`validate`](Self::validate).
    pub fn scores(mut self, importance: i64, urgency: i64) -> Self {
        self.importance = importance;
        self.urgency = urgency;
        self
    }

    pub fn due(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Checks the form without touching the store.
    pub fn validate(&self) -> Result<()> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(TaskError::validation("subject", "must not be empty"));
        }
        if subject.chars().count() > SUBJECT_MAX_LEN {
            return Err(TaskError::validation(
                "subject",
                format!("must be at most {} characters", SUBJECT_MAX_LEN),
            ));
        }
        validate_score("importance", self.importance)?;
        validate_score("urgency", self.urgency)?;
        Ok(())
    }
}

fn validate_score(field: &'static str, score: i64) -> Result<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(TaskError::validation(
            field,
            format!("{} is outside {}..={}", score, MIN_SCORE, MAX_SCORE),
        ));
    }
    Ok(())
}
