// Settings module
// Engine behaviour knobs persisted as TOML

use std::path::PathBuf;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::utils::date::weekday_from_index;

/// How drag previews reach the task store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveUpdateMode {
    /// Every preview is written to the store as it happens.
    #[default]
    Optimistic,
    /// Previews stay local; the store sees one write on release.
    Buffered,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("First day of week must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidFirstDayOfWeek(u8),
    #[error("Drag threshold must be a positive number of pixels")]
    InvalidDragThreshold,
    #[error("Visible lane cap must be at least 1")]
    InvalidLaneCap,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 0 = Sunday .. 6 = Saturday.
    pub first_day_of_week: u8,
    /// Pointer travel, in pixels, before a press on a task becomes a drag.
    pub drag_threshold_px: f32,
    /// `None` lets lanes grow without bound.
    pub max_visible_lanes: Option<usize>,
    pub live_update_mode: LiveUpdateMode,
    /// SQLite file used by the command-line host. Defaults to the data dir.
    pub database_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            first_day_of_week: 0, // Sunday
            drag_threshold_px: 5.0,
            max_visible_lanes: None,
            live_update_mode: LiveUpdateMode::Optimistic,
            database_path: None,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.first_day_of_week > 6 {
            return Err(SettingsError::InvalidFirstDayOfWeek(self.first_day_of_week));
        }
        if !self.drag_threshold_px.is_finite() || self.drag_threshold_px <= 0.0 {
            return Err(SettingsError::InvalidDragThreshold);
        }
        if self.max_visible_lanes == Some(0) {
            return Err(SettingsError::InvalidLaneCap);
        }
        Ok(())
    }

    pub fn week_start(&self) -> Weekday {
        weekday_from_index(self.first_day_of_week)
    }
}
