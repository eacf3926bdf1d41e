//! Category storage.
//!
//! Categories form a flat list. `full_path` is stored and returned as-is;
//! nothing here interprets it as a hierarchy.

use super::db::Db;
use crate::libs::error::{Result, TaskError};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

const INSERT_CATEGORY: &str = "INSERT INTO categories (category_name, category_code, full_path) VALUES (?1, ?2, ?3)";
const SELECT_ALL_CATEGORIES: &str =
    "SELECT category_id, category_name, category_code, full_path FROM categories ORDER BY category_name";
const SELECT_CATEGORY_BY_NAME: &str =
    "SELECT category_id, category_name, category_code, full_path FROM categories WHERE category_name = ?1 ORDER BY category_id LIMIT 1";
const SELECT_CATEGORY_BY_ID: &str =
    "SELECT category_id, category_name, category_code, full_path FROM categories WHERE category_id = ?1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
    pub category_code: Option<String>,
    pub full_path: Option<String>,
}

impl Category {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Category {
            category_id: row.get(0)?,
            category_name: row.get(1)?,
            category_code: row.get(2)?,
            full_path: row.get(3)?,
        })
    }
}

/// Input of the Add-Category form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub category_name: String,
    pub category_code: Option<String>,
    pub full_path: Option<String>,
}

impl NewCategory {
    pub fn new(name: &str) -> Self {
        NewCategory {
            category_name: name.to_string(),
            category_code: None,
            full_path: None,
        }
    }

    pub fn code(mut self, code: &str) -> Self {
        self.category_code = non_blank(code);
        self
    }

    pub fn path(mut self, full_path: &str) -> Self {
        self.full_path = non_blank(full_path);
        self
    }

    /// Checks the form without touching the store.
    pub fn validate(&self) -> Result<()> {
        if self.category_name.trim().is_empty() {
            return Err(TaskError::validation("category_name", "must not be empty"));
        }
        if self.category_name.trim() == crate::libs::query::ALL_CATEGORIES {
            return Err(TaskError::validation("category_name", "'All' is reserved for the category filter"));
        }
        Ok(())
    }
}

fn non_blank(value: &str) -> Option<String> {
    Some(value.trim().to_string()).filter(|v| !v.is_empty())
}

/// Category repository over the shared pool.
pub struct Categories {
    db: Db,
}

impl Categories {
    pub fn new(db: &Db) -> Self {
        Self { db: db.clone() }
    }

    /// Creates a category. Names are looked up by exact match elsewhere, so
    /// a duplicate name is rejected.
    pub fn create(&self, category: &NewCategory) -> Result<i64> {
        category.validate()?;
        let name = category.category_name.trim();
        if self.get_by_name(name)?.is_some() {
            return Err(TaskError::validation("category_name", format!("'{}' already exists", name)));
        }
        self.db.insert(
            "create_category",
            INSERT_CATEGORY,
            params![name, category.category_code, category.full_path],
        )
    }

    /// All categories ordered by name.
    pub fn list(&self) -> Result<Vec<Category>> {
        self.db.query("list_categories", SELECT_ALL_CATEGORIES, [], Category::from_row)
    }

    /// Category with exactly this name, or `None`.
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>> {
        self.db
            .query_opt("get_category_by_name", SELECT_CATEGORY_BY_NAME, params![name], Category::from_row)
    }

    /// Category with this id, or `None`.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.db
            .query_opt("get_category_by_id", SELECT_CATEGORY_BY_ID, params![id], Category::from_row)
    }

    /// Like [`get_by_id`](Self::get_by_id) but a missing row is an error.
    pub fn require(&self, id: i64) -> Result<Category> {
        self.get_by_id(id)?.ok_or_else(|| TaskError::not_found("category", id))
    }
}
