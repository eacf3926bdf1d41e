//! Filtered task-list query construction.
//!
//! Builds one parameterized `SELECT` from a fixed base plus an ordered list of
//! optional predicates. User-supplied values only ever travel as bound
//! parameters; the SQL text is assembled from constants.
//!
//! ## Rules enforced by construction
//!
//! - The base always ends in `WHERE 1=1`, so a builder with no active
//!   predicates yields a valid "all tasks" query with no parameters.
//! - An empty value set produces no predicate at all (never `IN ()`).
//! - Predicates are appended in the order they are offered; [`TaskFilter`]
//!   offers them as status, category, priority, search.
//!
//! ```rust
//! use taskdash::libs::query::{ListView, TaskFilter};
//! use taskdash::libs::task::Status;
//!
//! let filter = TaskFilter::new().statuses(vec![Status::Open, Status::InProgress]);
//! let query = filter.build(ListView::Filtered);
//! assert_eq!(query.params.len(), 2);
//! ```

use crate::db::db::UNICODE_LOWER_FN;
use crate::libs::error::{Result, TaskError};
use crate::libs::priority::{PriorityBand, PriorityRule, DASHBOARD_THRESHOLD, MATRIX_THRESHOLD};
use crate::libs::task::Status;
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const SELECT_TASKS: &str = "SELECT
    t.task_id,
    t.subject,
    t.description,
    t.category_id,
    c.category_name,
    t.status,
    t.importance,
    t.urgency,
    t.due_date,
    t.created_at,
    t.created_by,
    t.assigned_to
FROM tasks t
LEFT JOIN categories c ON t.category_id = c.category_id
WHERE 1=1";

const ORDER_RECENT: &str = "t.created_at DESC, t.task_id DESC";
const ORDER_FILTERED: &str = "t.due_date, t.importance DESC, t.urgency DESC";

/// Category selection meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// A SQL fragment together with the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Predicate {
    /// Predicate from a fixed SQL fragment and its bound values.
    ///
    /// The fragment must use one `?` per value, in order.
    pub fn raw(sql: &str, params: Vec<Value>) -> Self {
        Predicate {
            sql: sql.to_string(),
            params,
        }
    }

    /// `column = ?` bound to `value`.
    pub fn eq(column: &str, value: impl Into<Value>) -> Self {
        Predicate {
            sql: format!("{} = ?", column),
            params: vec![value.into()],
        }
    }

    /// `column IN (?, ...)`, or `None` for an empty set.
    pub fn in_list<I, V>(column: &str, values: I) -> Option<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let params: Vec<Value> = values.into_iter().map(Into::into).collect();
        if params.is_empty() {
            return None;
        }
        let placeholders = vec!["?"; params.len()].join(", ");
        Some(Predicate {
            sql: format!("{} IN ({})", column, placeholders),
            params,
        })
    }

    /// Case-insensitive substring match against any of `columns`.
    ///
    /// Returns `None` when `needle` is blank or no columns are given.
    pub fn like_any(columns: &[&str], needle: &str) -> Option<Self> {
        let needle = needle.trim();
        if needle.is_empty() || columns.is_empty() {
            return None;
        }
        let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
        let sql = columns
            .iter()
            .map(|column| format!("{}({}) LIKE ? ESCAPE '\\'", UNICODE_LOWER_FN, column))
            .collect::<Vec<_>>()
            .join(" OR ");
        let params = columns.iter().map(|_| Value::Text(pattern.clone())).collect();
        Some(Predicate { sql, params })
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Finished statement ready for execution.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub params: Vec<Value>,
    /// Number of `AND` filter clauses beyond the base predicate.
    pub clauses: usize,
}

/// Folds optional predicates onto a base `... WHERE 1=1` statement.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    base: &'static str,
    predicates: Vec<Predicate>,
    order_by: Option<&'static str>,
}

impl SelectBuilder {
    /// Starts from a base statement ending in `WHERE 1=1`.
    pub fn new(base: &'static str) -> Self {
        SelectBuilder {
            base,
            predicates: Vec::new(),
            order_by: None,
        }
    }

    /// Appends a predicate as `AND (...)`. `None` adds nothing, so optional
    /// filters can be passed straight through.
    pub fn and(mut self, predicate: Option<Predicate>) -> Self {
        if let Some(predicate) = predicate {
            self.predicates.push(predicate);
        }
        self
    }

    /// Sets the trailing `ORDER BY` list.
    pub fn order_by(mut self, order_by: &'static str) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Joins base, predicates and ordering into one statement.
    ///
    /// Parameters come out in the same order as the placeholders.
    pub fn build(self) -> BuiltQuery {
        let mut sql = String::from(self.base);
        let mut params = Vec::new();
        let clauses = self.predicates.len();
        for predicate in self.predicates {
            sql.push_str(" AND (");
            sql.push_str(&predicate.sql);
            sql.push(')');
            params.extend(predicate.params);
        }
        if let Some(order_by) = self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order_by);
        }
        BuiltQuery { sql, params, clauses }
    }
}

/// Band selection offered by the priority filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BandSelection {
    #[default]
    All,
    Only(PriorityBand),
}

impl FromStr for BandSelection {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        // UI labels carry a quadrant hint, e.g. "High (Q1)"
        let head = lowered.split_whitespace().next().unwrap_or("");
        match head {
            "" | "all" => Ok(BandSelection::All),
            "high" => Ok(BandSelection::Only(PriorityBand::High)),
            "medium" => Ok(BandSelection::Only(PriorityBand::Medium)),
            "low" => Ok(BandSelection::Only(PriorityBand::Low)),
            _ => Err(TaskError::validation("priority", format!("unknown priority '{}'", s))),
        }
    }
}

/// Priority filter: which band, under which rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PriorityFilter {
    pub band: BandSelection,
    pub rule: PriorityRule,
}

impl PriorityFilter {
    /// SQL predicate for the selected band, or `None` for "All".
    pub fn predicate(&self) -> Option<Predicate> {
        match self.band {
            BandSelection::All => None,
            BandSelection::Only(band) => Some(band_predicate(self.rule, band)),
        }
    }
}

/// SQL mirror of `priority_band_v1` / `priority_band_v2`.
pub fn band_predicate(rule: PriorityRule, band: PriorityBand) -> Predicate {
    let m = || Value::Integer(MATRIX_THRESHOLD);
    let d = || Value::Integer(DASHBOARD_THRESHOLD);
    match (rule, band) {
        (PriorityRule::BothAtLeastThree, PriorityBand::High) => {
            Predicate::raw("t.importance >= ? AND t.urgency >= ?", vec![m(), m()])
        }
        (PriorityRule::BothAtLeastThree, PriorityBand::Medium) => Predicate::raw(
            "(t.importance >= ? OR t.urgency >= ?) AND NOT (t.importance >= ? AND t.urgency >= ?)",
            vec![m(), m(), m(), m()],
        ),
        (PriorityRule::EitherAtLeastFour, PriorityBand::High) => {
            Predicate::raw("t.importance >= ? OR t.urgency >= ?", vec![d(), d()])
        }
        (PriorityRule::EitherAtLeastFour, PriorityBand::Medium) => Predicate::raw(
            "(t.importance >= ? OR t.urgency >= ?) AND t.importance < ? AND t.urgency < ?",
            vec![m(), m(), d(), d()],
        ),
        (_, PriorityBand::Low) => Predicate::raw("t.importance < ? AND t.urgency < ?", vec![m(), m()]),
    }
}

/// Which task list is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListView {
    /// Flat list, most recent first; search covers the subject only.
    Recent,
    /// Filtered list ordered by due date then priority; search covers
    /// subject and description.
    Filtered,
}

impl ListView {
    fn order_by(&self) -> &'static str {
        match self {
            ListView::Recent => ORDER_RECENT,
            ListView::Filtered => ORDER_FILTERED,
        }
    }

    fn search_columns(&self) -> &'static [&'static str] {
        match self {
            ListView::Recent => &["t.subject"],
            ListView::Filtered => &["t.subject", "t.description"],
        }
    }
}

/// Filter selections as they come from the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub statuses: Vec<Status>,
    pub category_name: Option<String>,
    pub priority: PriorityFilter,
    pub search: Option<String>,
}

impl TaskFilter {
    /// Empty filter: every task.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to the given statuses. An empty list means no restriction.
    pub fn statuses(mut self, statuses: Vec<Status>) -> Self {
        self.statuses = statuses;
        self
    }

    /// Restricts to one category by exact name. `"All"` or blank means no
    /// restriction.
    pub fn category(mut self, name: &str) -> Self {
        self.category_name = Some(name.to_string());
        self
    }

    /// Restricts to a priority band computed with `rule`.
    pub fn priority(mut self, band: BandSelection, rule: PriorityRule) -> Self {
        self.priority = PriorityFilter { band, rule };
        self
    }

    /// Case-insensitive substring search. Blank text means no restriction.
    pub fn search(mut self, text: &str) -> Self {
        self.search = Some(text.to_string());
        self
    }

    fn status_predicate(&self) -> Option<Predicate> {
        // Duplicates would bind the same value twice; keep first occurrence order.
        let mut seen = Vec::with_capacity(self.statuses.len());
        for status in &self.statuses {
            if !seen.contains(status) {
                seen.push(*status);
            }
        }
        Predicate::in_list("t.status", seen.iter().map(|s| s.as_str().to_string()))
    }

    fn category_predicate(&self) -> Option<Predicate> {
        let name = self.category_name.as_deref()?.trim();
        if name.is_empty() || name == ALL_CATEGORIES {
            return None;
        }
        Some(Predicate::eq("c.category_name", name.to_string()))
    }

    /// Builds the list query for `view`.
    ///
    /// Clauses are added in a fixed order: status, category, priority, search.
    /// With no active filters the result is the bare base query with no
    /// parameters.
    pub fn build(&self, view: ListView) -> BuiltQuery {
        SelectBuilder::new(SELECT_TASKS)
            .and(self.status_predicate())
            .and(self.category_predicate())
            .and(self.priority.predicate())
            .and(self.search.as_deref().and_then(|s| Predicate::like_any(view.search_columns(), s)))
            .order_by(view.order_by())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_degenerates_to_base_query() {
        for view in [ListView::Recent, ListView::Filtered] {
            let query = TaskFilter::new().build(view);
            assert_eq!(query.clauses, 0);
            assert!(query.params.is_empty());
            assert!(query.sql.contains("WHERE 1=1 ORDER BY"));
        }
    }

    #[test]
    fn status_set_binds_each_value_in_order() {
        let statuses = vec![Status::Blocked, Status::Idea, Status::Deferred];
        let query = TaskFilter::new().statuses(statuses.clone()).build(ListView::Filtered);
        assert!(query.sql.contains("t.status IN (?, ?, ?)"));
        let expected: Vec<Value> = statuses.iter().map(|s| Value::Text(s.to_string())).collect();
        assert_eq!(query.params, expected);
    }

    #[test]
    fn empty_status_set_is_omitted() {
        let query = TaskFilter::new().statuses(vec![]).build(ListView::Filtered);
        assert!(!query.sql.contains("IN ("));
        assert!(!query.sql.contains("IN ()"));
    }

    #[test]
    fn open_in_progress_all_categories_no_search() {
        let query = TaskFilter::new()
            .statuses(vec![Status::Open, Status::InProgress])
            .category(ALL_CATEGORIES)
            .search("")
            .build(ListView::Filtered);
        assert_eq!(query.sql.matches(" IN (").count(), 1);
        assert_eq!(query.params.len(), 2);
        assert_eq!(query.clauses, 1);
        assert!(!query.sql.contains("category_name ="));
        assert!(!query.sql.contains("LIKE"));
    }

    #[test]
    fn clauses_follow_fixed_order() {
        let query = TaskFilter::new()
            .search("deploy")
            .priority(BandSelection::Only(PriorityBand::High), PriorityRule::BothAtLeastThree)
            .category("Work")
            .statuses(vec![Status::Open])
            .build(ListView::Filtered);
        let status = query.sql.find("t.status IN").unwrap();
        let category = query.sql.find("c.category_name =").unwrap();
        let priority = query.sql.find("t.importance >=").unwrap();
        let search = query.sql.find("LIKE").unwrap();
        assert!(status < category && category < priority && priority < search);
        assert_eq!(
            query.params,
            vec![
                Value::Text("Open".into()),
                Value::Text("Work".into()),
                Value::Integer(3),
                Value::Integer(3),
                Value::Text("%deploy%".into()),
                Value::Text("%deploy%".into()),
            ]
        );
    }

    #[test]
    fn search_columns_depend_on_view() {
        let recent = TaskFilter::new().search("Fix").build(ListView::Recent);
        assert_eq!(recent.params, vec![Value::Text("%fix%".into())]);
        assert!(!recent.sql.contains("t.description)"));
        assert!(recent.sql.ends_with("ORDER BY t.created_at DESC, t.task_id DESC"));

        let filtered = TaskFilter::new().search("Fix").build(ListView::Filtered);
        assert_eq!(filtered.params.len(), 2);
        assert!(filtered.sql.contains("unicode_lower(t.description) LIKE ?"));
        assert!(filtered.sql.ends_with("ORDER BY t.due_date, t.importance DESC, t.urgency DESC"));
    }

    #[test]
    fn values_never_reach_sql_text() {
        let hostile = "'; DROP TABLE tasks; --";
        let query = TaskFilter::new().category(hostile).search(hostile).build(ListView::Filtered);
        assert!(!query.sql.contains("DROP TABLE"));
        assert_eq!(query.params.len(), 3);
    }

    #[test]
    fn like_wildcards_are_escaped() {
        let predicate = Predicate::like_any(&["t.subject"], "100%_done").unwrap();
        assert_eq!(predicate.params, vec![Value::Text("%100\\%\\_done%".into())]);
    }

    #[test]
    fn the_two_high_rules_stay_distinct() {
        let v1 = band_predicate(PriorityRule::BothAtLeastThree, PriorityBand::High);
        let v2 = band_predicate(PriorityRule::EitherAtLeastFour, PriorityBand::High);
        assert_ne!(v1, v2);
        assert!(v1.sql.contains(" AND "));
        assert!(v2.sql.contains(" OR "));
        assert_eq!(v2.params, vec![Value::Integer(4), Value::Integer(4)]);
    }

    #[test]
    fn band_selection_accepts_ui_labels() {
        assert_eq!("High (Q1)".parse::<BandSelection>().unwrap(), BandSelection::Only(PriorityBand::High));
        assert_eq!("Low (Q3/Q4)".parse::<BandSelection>().unwrap(), BandSelection::Only(PriorityBand::Low));
        assert_eq!("All".parse::<BandSelection>().unwrap(), BandSelection::All);
        assert!("urgent".parse::<BandSelection>().is_err());
    }

    #[test]
    fn duplicate_statuses_are_bound_once() {
        let query = TaskFilter::new()
            .statuses(vec![Status::Open, Status::Open, Status::Closed])
            .build(ListView::Recent);
        assert_eq!(query.params.len(), 2);
    }
}
