//! Task storage: Add-Task, filtered listing and completion.

use super::categories::Categories;
use super::db::Db;
use crate::libs::error::{Result, TaskError};
use crate::libs::query::{ListView, TaskFilter};
use crate::libs::task::{NewTask, Status, Task, UserId};
use chrono::{Local, NaiveDateTime};
use rusqlite::{params, params_from_iter, Row};

const INSERT_TASK: &str = "INSERT INTO tasks
    (subject, description, category_id, status, importance, urgency, due_date, created_at, created_by, assigned_to)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_TASK_BY_ID: &str = "SELECT
    t.task_id, t.subject, t.description, t.category_id, c.category_name, t.status,
    t.importance, t.urgency, t.due_date, t.created_at, t.created_by, t.assigned_to
FROM tasks t
LEFT JOIN categories c ON t.category_id = c.category_id
WHERE t.task_id = ?1";
const COMPLETE_TASK: &str = "UPDATE tasks SET status = ?2 WHERE task_id = ?1";

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        task_id: row.get(0)?,
        subject: row.get(1)?,
        description: row.get(2)?,
        category_id: row.get(3)?,
        category_name: row.get(4)?,
        status: row.get(5)?,
        importance: row.get(6)?,
        urgency: row.get(7)?,
        due_date: row.get(8)?,
        created_at: row.get(9)?,
        created_by: row.get(10)?,
        assigned_to: row.get(11)?,
    })
}

/// Task repository over the shared pool.
pub struct Tasks {
    db: Db,
}

impl Tasks {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Adds a task on behalf of `user`.
    ///
    /// Validation happens before any store access; a dangling category id
    /// is reported as not found. The write itself is a single INSERT.
    pub fn insert(&self, task: &NewTask, user: UserId) -> Result<i64> {
        self.insert_at(task, user, Local::now().naive_local())
    }

    /// Like [`insert`](Self::insert) with an explicit creation time.
    pub fn insert_at(&self, task: &NewTask, user: UserId, created_at: NaiveDateTime) -> Result<i64> {
        task.validate()?;
        if let Some(category_id) = task.category_id {
            Categories::new(&self.db).require(category_id)?;
        }
        let id = self.db.insert(
            "insert_task",
            INSERT_TASK,
            params![
                task.subject.trim(),
                task.description,
                task.category_id,
                task.status,
                task.importance,
                task.urgency,
                task.due_date,
                created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                user.0,
                user.0,
            ],
        )?;
        tracing::info!(task_id = id, user = user.0, "task created");
        Ok(id)
    }

    /// Tasks matching `filter`, ordered for `view`.
    pub fn fetch(&self, filter: &TaskFilter, view: ListView) -> Result<Vec<Task>> {
        let query = filter.build(view);
        self.db
            .query("fetch_tasks", &query.sql, params_from_iter(query.params.iter()), task_from_row)
    }

    /// Single task with its category name, or `None`.
    pub fn get_by_id(&self, task_id: i64) -> Result<Option<Task>> {
        self.db.query_opt("get_task_by_id", SELECT_TASK_BY_ID, params![task_id], task_from_row)
    }

    /// Closes a task. `user` is the actor; it is logged but not stored,
    /// since the schema has no "closed by" column.
    pub fn complete(&self, task_id: i64, user: UserId) -> Result<()> {
        let affected = self.db.execute("complete_task", COMPLETE_TASK, params![task_id, Status::Closed])?;
        if affected == 0 {
            return Err(TaskError::not_found("task", task_id));
        }
        tracing::info!(task_id, user = user.0, "task closed");
        Ok(())
    }
}
