// Segment planner
//
// Lays date-ranged tasks onto a week-wrapped grid. Each task yields one
// segment per week row it touches, anchored at the later of its start and the
// row's first day, clipped to the row end and to the task end.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::date_grid::{DateGrid, DAYS_PER_WEEK};
use crate::models::task::{Task, TaskId};
use crate::utils::date::{add_days, days_inclusive};

/// One visible week-row slice of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub task_id: TaskId,
    /// Anchor date: where this slice starts rendering.
    pub start: NaiveDate,
    pub cell_index: usize,
    pub row: usize,
    pub column: usize,
    /// Width in days, 1..=7.
    pub width: usize,
    pub lane: usize,
    /// The task began in an earlier row.
    pub continues_before: bool,
    /// The task carries on into a later row.
    pub continues_after: bool,
}

impl Segment {
    /// Last date covered by this segment.
    pub fn end(&self) -> NaiveDate {
        add_days(self.start, self.width as i64 - 1)
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end()
    }

    /// True when this slice shows the task's start (its left resize handle).
    pub fn shows_start(&self) -> bool {
        !self.continues_before
    }

    /// True when this slice shows the task's end (its right resize handle).
    pub fn shows_end(&self) -> bool {
        !self.continues_after
    }
}

/// Lane occupancy for one week row.
#[derive(Default)]
struct RowLanes {
    occupied: Vec<[bool; DAYS_PER_WEEK]>,
    /// Highest lane anchored at each column so far.
    anchored: [Option<usize>; DAYS_PER_WEEK],
}

impl RowLanes {
    fn is_free(&self, lane: usize, columns: std::ops::Range<usize>) -> bool {
        match self.occupied.get(lane) {
            Some(cells) => columns.into_iter().all(|col| !cells[col]),
            None => true,
        }
    }

    /// Lowest lane free on every covered column and above every lane already
    /// anchored at `column`.
    fn assign(&mut self, column: usize, width: usize) -> usize {
        let columns = column..column + width;
        let floor = self.anchored[column].map_or(0, |lane| lane + 1);
        let lane = (floor..)
            .find(|&lane| self.is_free(lane, columns.clone()))
            .unwrap_or(floor);

        if self.occupied.len() <= lane {
            self.occupied.resize(lane + 1, [false; DAYS_PER_WEEK]);
        }
        for col in columns {
            self.occupied[lane][col] = true;
        }
        self.anchored[column] = Some(lane);
        lane
    }
}

pub struct SegmentPlanner;

impl SegmentPlanner {
    /// Compute segments for `tasks` in their given order.
    ///
    /// Pure: the same grid and task order always produce the same output.
    pub fn plan<'a, I>(grid: &DateGrid, tasks: I) -> Vec<Segment>
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut lanes: Vec<RowLanes> = (0..grid.rows()).map(|_| RowLanes::default()).collect();
        let mut segments = Vec::new();

        for task in tasks {
            if task.end_date < task.start_date {
                log::warn!("Skipping task {} with inverted range", task.id);
                continue;
            }
            if !task.overlaps(grid.first_date(), grid.last_date()) {
                continue;
            }

            for (row, row_lanes) in lanes.iter_mut().enumerate() {
                let Some((row_first, row_last)) = grid.row_bounds(row) else {
                    break;
                };
                if !task.overlaps(row_first, row_last) {
                    continue;
                }

                let anchor = task.start_date.max(row_first);
                let width = days_inclusive(anchor, task.end_date.min(row_last)) as usize;
                let column = days_inclusive(row_first, anchor) as usize - 1;
                let lane = row_lanes.assign(column, width);

                segments.push(Segment {
                    task_id: task.id.clone(),
                    start: anchor,
                    cell_index: row * DAYS_PER_WEEK + column,
                    row,
                    column,
                    width,
                    lane,
                    continues_before: task.start_date < row_first,
                    continues_after: task.end_date > row_last,
                });
            }
        }

        segments
    }
}

/// Segments that fit under a lane cap plus what was hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CappedLayout {
    pub visible: Vec<Segment>,
    /// Number of hidden segments covering each date.
    pub overflow: BTreeMap<NaiveDate, usize>,
}

impl CappedLayout {
    pub fn hidden_on(&self, date: NaiveDate) -> usize {
        self.overflow.get(&date).copied().unwrap_or(0)
    }
}

/// Hide segments in lanes `>= max_lanes`, counting them per covered date.
/// `None` keeps every lane.
pub fn cap_lanes(segments: &[Segment], max_lanes: Option<usize>) -> CappedLayout {
    let Some(max_lanes) = max_lanes else {
        return CappedLayout {
            visible: segments.to_vec(),
            overflow: BTreeMap::new(),
        };
    };

    let mut layout = CappedLayout::default();
    for segment in segments {
        if segment.lane < max_lanes {
            layout.visible.push(segment.clone());
            continue;
        }
        for offset in 0..segment.width {
            *layout
                .overflow
                .entry(add_days(segment.start, offset as i64))
                .or_insert(0) += 1;
        }
    }
    layout
}
