// Property tests for DateGrid and SegmentPlanner
// Random months, week starts and task sets

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_taskgrid::grid::{DateGrid, Segment, SegmentPlanner, DAYS_PER_WEEK};
use rust_taskgrid::models::task::{Task, TaskCategory};
use rust_taskgrid::utils::date::{add_days, first_of_month, last_of_month, weekday_from_index};

fn month_start() -> impl Strategy<Value = NaiveDate> {
    (1990..2100i32, 1..=12u32).prop_map(|(y, m)| NaiveDate::from_ymd_opt(y, m, 1).unwrap())
}

fn task(id: usize, start: NaiveDate, days: i64) -> Task {
    Task::new(
        format!("t{}", id),
        format!("Task {}", id),
        TaskCategory::Todo,
        start,
        add_days(start, days - 1),
    )
    .unwrap()
}

/// Tasks starting within a few weeks of `month`.
fn tasks_near(month: NaiveDate) -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((-14i64..45, 1i64..30), 0..12).prop_map(move |specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (offset, days))| task(i, add_days(month, offset), days))
            .collect()
    })
}

fn grid_for(month: NaiveDate, week_start: u8) -> DateGrid {
    DateGrid::new(month, month, weekday_from_index(week_start))
}

proptest! {
    /// Property: the grid is whole weeks and covers every day of the month
    #[test]
    fn prop_grid_is_whole_weeks_covering_month(month in month_start(), week_start in 0..7u8) {
        let grid = grid_for(month, week_start);
        prop_assert_eq!(grid.len() % DAYS_PER_WEEK, 0);
        prop_assert!(grid.rows() >= 4 && grid.rows() <= 6);
        prop_assert!(grid.contains(first_of_month(month)));
        prop_assert!(grid.contains(last_of_month(month)));
        prop_assert_eq!(grid.first_date().weekday(), weekday_from_index(week_start));

        // cells are consecutive days
        for pair in grid.cells().windows(2) {
            prop_assert_eq!(add_days(pair[0].date, 1), pair[1].date);
        }
        let in_month = grid.cells().iter().filter(|c| c.is_current_month).count();
        prop_assert_eq!(in_month as u32, last_of_month(month).day());
    }

    /// Property: a single-day task yields exactly one width-1 segment
    #[test]
    fn prop_single_day_task_single_segment(month in month_start(), day in 0i64..28) {
        let grid = grid_for(month, 0);
        let date = add_days(month, day);
        let tasks = vec![task(0, date, 1)];
        let segments = SegmentPlanner::plan(&grid, &tasks);
        prop_assert_eq!(segments.len(), 1);
        prop_assert_eq!(segments[0].width, 1);
        prop_assert_eq!(segments[0].start, date);
        prop_assert_eq!(grid.cell(segments[0].cell_index).map(|c| c.date), Some(date));
    }

    /// Property: a task inside the grid splits into one in-row segment per
    /// week row, with widths summing to its duration
    #[test]
    fn prop_segments_partition_task(month in month_start(), offset in 0i64..20, days in 1i64..30) {
        let grid = grid_for(month, 0);
        let task = task(0, add_days(grid.first_date(), offset), days);
        prop_assume!(task.end_date <= grid.last_date());

        let segments = SegmentPlanner::plan(&grid, std::slice::from_ref(&task));
        let first_row = grid.index_of(task.start_date).unwrap() / DAYS_PER_WEEK;
        let last_row = grid.index_of(task.end_date).unwrap() / DAYS_PER_WEEK;
        prop_assert_eq!(segments.len(), last_row - first_row + 1);

        let total: usize = segments.iter().map(|s| s.width).sum();
        prop_assert_eq!(total as i64, task.duration_days());
        prop_assert_eq!(segments[0].start, task.start_date);
        prop_assert_eq!(segments.last().unwrap().end(), task.end_date);
        for segment in &segments {
            prop_assert!(segment.column + segment.width <= DAYS_PER_WEEK);
        }
        for pair in segments.windows(2) {
            prop_assert_eq!(add_days(pair[0].end(), 1), pair[1].start);
            prop_assert_eq!(pair[1].column, 0);
        }
    }

    /// Property: planning is pure
    #[test]
    fn prop_plan_is_idempotent(month in month_start(), week_start in 0..7u8) {
        let grid = grid_for(month, week_start);
        let tasks: Vec<Task> = (0..6).map(|i| task(i, add_days(month, i as i64 * 3), 5)).collect();
        prop_assert_eq!(SegmentPlanner::plan(&grid, &tasks), SegmentPlanner::plan(&grid, &tasks));
    }

    /// Property: segments sharing a row and lane never overlap, and
    /// segments anchored on the same cell have increasing lanes
    #[test]
    fn prop_lanes_never_collide((month, tasks) in month_start().prop_flat_map(|m| (Just(m), tasks_near(m)))) {
        let grid = grid_for(month, 0);
        let segments = SegmentPlanner::plan(&grid, &tasks);
        prop_assert_eq!(SegmentPlanner::plan(&grid, &tasks), segments.clone());

        for (i, a) in segments.iter().enumerate() {
            for b in &segments[i + 1..] {
                if a.row == b.row && a.lane == b.lane {
                    prop_assert!(!columns_overlap(a, b), "{:?} overlaps {:?}", a, b);
                }
                if a.cell_index == b.cell_index {
                    prop_assert!(a.lane < b.lane);
                }
            }
        }
    }
}

fn columns_overlap(a: &Segment, b: &Segment) -> bool {
    a.column < b.column + b.width && b.column < a.column + a.width
}
