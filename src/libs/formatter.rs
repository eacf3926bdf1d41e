//! Small text formatting helpers shared by table views and exports.

use chrono::NaiveDate;

/// Subject length shown in matrix samples before truncation.
pub const SAMPLE_SUBJECT_WIDTH: usize = 50;

/// Subject length shown in list views.
pub const LIST_SUBJECT_WIDTH: usize = 100;

/// Cuts `text` to `width` characters, appending `...` when something was cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Percentage with one decimal, e.g. `66.7%`.
pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}

/// ISO due date, or a placeholder when the task has none.
pub fn format_due(due: Option<NaiveDate>) -> String {
    due.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "No due date".to_string())
}

/// Category name, or `None` for uncategorized tasks.
pub fn format_category(name: Option<&str>) -> String {
    name.unwrap_or("None").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_appends_ellipsis_only_when_cut() {
        assert_eq!(truncate("short", 50), "short");
        let long = "a".repeat(60);
        let cut = truncate(&long, SAMPLE_SUBJECT_WIDTH);
        assert_eq!(cut.len(), 53);
        assert!(cut.ends_with("..."));
        assert_eq!(truncate(&"b".repeat(50), 50), "b".repeat(50));
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("ééééé", 3), "ééé...");
    }

    #[test]
    fn rate_has_one_decimal() {
        assert_eq!(format_rate(0.0), "0.0%");
        assert_eq!(format_rate(66.6666), "66.7%");
    }

    #[test]
    fn missing_values_have_placeholders() {
        assert_eq!(format_due(None), "No due date");
        assert_eq!(format_due(NaiveDate::from_ymd_opt(2024, 3, 1)), "2024-03-01");
        assert_eq!(format_category(None), "None");
    }
}
