// Month date grid
//
// Produces the whole-week run of day cells shown for one month and indexes
// them by date so pointer hits and segment anchors resolve without string keys.

use std::collections::HashMap;
use std::ops::Range;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::utils::date::{add_days, end_of_week, first_of_month, last_of_month, start_of_week};

pub const DAYS_PER_WEEK: usize = 7;

/// A single calendar day in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
}

/// Ordered day cells for one displayed month, always whole weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct DateGrid {
    month: NaiveDate,
    week_start: Weekday,
    cells: Vec<DayCell>,
    index: HashMap<NaiveDate, usize>,
}

impl DateGrid {
    /// Build the grid for the month containing `reference`.
    ///
    /// # Examples
    /// ```
    /// use chrono::{NaiveDate, Weekday};
    /// use rust_taskgrid::grid::DateGrid;
    ///
    /// let march = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let grid = DateGrid::new(march, march, Weekday::Sun);
    /// assert_eq!(grid.len(), 42);
    /// assert_eq!(grid.first_date(), NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
    /// ```
    pub fn new(reference: NaiveDate, today: NaiveDate, week_start: Weekday) -> Self {
        let month = first_of_month(reference);
        let first = start_of_week(month, week_start);
        let last = end_of_week(last_of_month(reference), week_start);

        let cells: Vec<DayCell> = first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| DayCell {
                date,
                is_current_month: date.year() == month.year() && date.month() == month.month(),
                is_today: date == today,
            })
            .collect();

        let index = cells
            .iter()
            .enumerate()
            .map(|(idx, cell)| (cell.date, idx))
            .collect();

        Self {
            month,
            week_start,
            cells,
            index,
        }
    }

    /// First day of the displayed month.
    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn rows(&self) -> usize {
        self.cells.len() / DAYS_PER_WEEK
    }

    pub fn cell(&self, index: usize) -> Option<&DayCell> {
        self.cells.get(index)
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.index.get(&date).copied()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index.contains_key(&date)
    }

    pub fn first_date(&self) -> NaiveDate {
        self.cells.first().map_or(self.month, |cell| cell.date)
    }

    pub fn last_date(&self) -> NaiveDate {
        self.cells.last().map_or(self.month, |cell| cell.date)
    }

    /// Cell index range covered by week row `row`.
    pub fn row_range(&self, row: usize) -> Range<usize> {
        let start = (row * DAYS_PER_WEEK).min(self.cells.len());
        let end = (start + DAYS_PER_WEEK).min(self.cells.len());
        start..end
    }

    /// First and last date of week row `row`.
    pub fn row_bounds(&self, row: usize) -> Option<(NaiveDate, NaiveDate)> {
        let range = self.row_range(row);
        if range.is_empty() {
            return None;
        }
        let first = self.cells[range.start].date;
        Some((first, add_days(first, (range.len() - 1) as i64)))
    }

    pub fn week_rows(&self) -> std::slice::Chunks<'_, DayCell> {
        self.cells.chunks(DAYS_PER_WEEK)
    }
}
