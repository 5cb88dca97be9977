//! Task filtering applied before layout.
//!
//! A filter combines a category allow-set, an optional look-ahead window
//! measured in weeks from today, and an optional name search. Filters are
//! pure predicates and never touch the tasks they inspect.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::{Task, TaskCategory};
use crate::utils::date::add_days;

/// Look-ahead window of `weeks` weeks starting today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub weeks: u32,
}

impl TimeWindow {
    pub fn weeks(weeks: u32) -> Self {
        Self { weeks }
    }

    /// Inclusive `[today, today + 7 * weeks]` bounds.
    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        (today, add_days(today, 7 * self.weeks as i64))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    /// Allowed categories; empty allows every category.
    pub categories: BTreeSet<TaskCategory>,
    pub window: Option<TimeWindow>,
    /// Case-insensitive substring of the task name.
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: TaskCategory) -> Self {
        self.categories.insert(category);
        self
    }

    pub fn with_window(mut self, window: TimeWindow) -> Self {
        self.window = Some(window);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
            && self.window.is_none()
            && self
                .search
                .as_deref()
                .map_or(true, |query| query.trim().is_empty())
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&task.category) {
            return false;
        }

        if let Some(window) = self.window {
            let (start, end) = window.bounds(today);
            if !task.overlaps(start, end) {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                task.name.to_lowercase().contains(&query.to_lowercase())
            }
            _ => true,
        }
    }

    /// Keep the tasks that pass, preserving their order.
    pub fn apply<'a>(&self, tasks: &'a [Task], today: NaiveDate) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|task| self.matches(task, today))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, name: &str, category: TaskCategory, start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(id, name, category, start, end).unwrap()
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            task("1", "Write Report", TaskCategory::Todo, date(2024, 3, 4), date(2024, 3, 6)),
            task("2", "Review PR", TaskCategory::Review, date(2024, 3, 12), date(2024, 3, 12)),
            task("3", "Plan sprint", TaskCategory::InProgress, date(2024, 3, 25), date(2024, 3, 28)),
            task("4", "report archive", TaskCategory::Completed, date(2024, 2, 20), date(2024, 3, 1)),
        ]
    }

    #[test]
    fn test_empty_filter_passes_all() {
        let tasks = sample_tasks();
        let filter = TaskFilter::new();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&tasks, date(2024, 3, 1)).len(), 4);
    }

    #[test]
    fn test_category_allow_set() {
        let tasks = sample_tasks();
        let filter = TaskFilter::new()
            .with_category(TaskCategory::Todo)
            .with_category(TaskCategory::Review);
        let ids: Vec<&str> = filter
            .apply(&tasks, date(2024, 3, 1))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let tasks = sample_tasks();
        let filter = TaskFilter::new().with_search("REPORT");
        let ids: Vec<&str> = filter
            .apply(&tasks, date(2024, 3, 1))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let filter = TaskFilter::new().with_search("   ");
        assert!(filter.is_empty());
        assert!(filter.matches(&sample_tasks()[0], date(2024, 3, 1)));
    }

    // today = 2024-03-01
    #[test_case(1, &["1", "4"] ; "one week")]
    #[test_case(2, &["1", "2", "4"] ; "two weeks")]
    #[test_case(4, &["1", "2", "3", "4"] ; "four weeks")]
    fn test_time_window(weeks: u32, expected: &[&str]) {
        let tasks = sample_tasks();
        let filter = TaskFilter::new().with_window(TimeWindow::weeks(weeks));
        let ids: Vec<&str> = filter
            .apply(&tasks, date(2024, 3, 1))
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_filter_never_mutates_tasks() {
        let tasks = sample_tasks();
        let before = tasks.clone();
        let _ = TaskFilter::new().with_search("x").apply(&tasks, date(2024, 3, 1));
        assert_eq!(tasks, before);
    }
}
