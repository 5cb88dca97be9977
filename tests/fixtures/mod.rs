// Test fixtures - reusable test data
// Provides consistent tasks and dates across the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use rust_taskgrid::models::task::{Task, TaskCategory};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// A day in March 2024
    pub fn march(day: u32) -> NaiveDate {
        ymd(2024, 3, day)
    }

    /// Thursday, March 14 2024, used as "today"
    pub fn today() -> NaiveDate {
        march(14)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Sample tasks for testing
pub mod tasks {
    use super::*;

    pub fn task(id: &str, start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(id, format!("Task {}", id), TaskCategory::Todo, start, end).unwrap()
    }

    /// Sunday Mar 10 through Sunday Mar 17: wraps into a second week row
    pub fn week_wrapping() -> Task {
        task("wrap", dates::march(10), dates::march(17))
    }

    /// Three-day task Mar 4..6
    pub fn three_day() -> Task {
        task("three", dates::march(4), dates::march(6))
    }

    /// A small board with one task per category
    pub fn board() -> Vec<Task> {
        vec![
            Task::new("t1", "Draft plan", TaskCategory::Todo, dates::march(4), dates::march(6)).unwrap(),
            Task::new("t2", "Build", TaskCategory::InProgress, dates::march(11), dates::march(22)).unwrap(),
            Task::new("t3", "Peer review", TaskCategory::Review, dates::march(20), dates::march(21)).unwrap(),
            Task::new("t4", "Ship", TaskCategory::Completed, dates::march(28), dates::ymd(2024, 4, 2)).unwrap(),
        ]
    }
}
