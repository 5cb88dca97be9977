//! Measured grid geometry supplied by the hosting surface.
//!
//! Pointer coordinates are plain `f32` pixels in the host's space. The host
//! re-measures after every layout pass; an unmeasured geometry (zero or
//! non-finite sizes) resolves nothing.

use chrono::NaiveDate;

use super::date_grid::{DateGrid, DAYS_PER_WEEK};

/// A pointer position in host pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPos {
    pub x: f32,
    pub y: f32,
}

impl PointerPos {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: PointerPos) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridGeometry {
    /// Top-left corner of the first cell.
    pub origin: PointerPos,
    pub cell_width: f32,
    pub cell_height: f32,
}

impl GridGeometry {
    pub fn new(origin: PointerPos, cell_width: f32, cell_height: f32) -> Self {
        Self {
            origin,
            cell_width,
            cell_height,
        }
    }

    pub fn is_measured(&self) -> bool {
        is_valid_extent(self.cell_width) && is_valid_extent(self.cell_height)
    }

    /// Resolve the cell under `pos` to its date.
    pub fn date_at(&self, grid: &DateGrid, pos: PointerPos) -> Option<NaiveDate> {
        if !self.is_measured() {
            return None;
        }
        let col = ((pos.x - self.origin.x) / self.cell_width).floor();
        let row = ((pos.y - self.origin.y) / self.cell_height).floor();
        if col < 0.0 || row < 0.0 || col >= DAYS_PER_WEEK as f32 {
            return None;
        }
        let index = row as usize * DAYS_PER_WEEK + col as usize;
        grid.cell(index).map(|cell| cell.date)
    }
}

/// True for a usable measured length in pixels.
pub fn is_valid_extent(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Largest displacement, in days, a single pointer delta can produce.
pub const MAX_DRAG_DAYS: i64 = 1_000_000;

/// Convert a horizontal pixel displacement into whole days.
/// Yields 0 while the cell width is unmeasured.
pub fn pixels_to_days(delta_x: f32, cell_width: f32) -> i64 {
    if !is_valid_extent(cell_width) || !delta_x.is_finite() {
        return 0;
    }
    let limit = MAX_DRAG_DAYS as f32;
    (delta_x / cell_width).round().clamp(-limit, limit) as i64
}
