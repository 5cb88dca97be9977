//! Month grid layout: day cells, measured geometry, and task segments.

pub mod date_grid;
pub mod geometry;
pub mod segments;

pub use date_grid::{DateGrid, DayCell, DAYS_PER_WEEK};
pub use geometry::{pixels_to_days, GridGeometry, PointerPos};
pub use segments::{cap_lanes, CappedLayout, Segment, SegmentPlanner};
