use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use crate::models::settings::Settings;

const SETTINGS_FILE: &str = "settings.toml";
const DATABASE_FILE: &str = "tasks.db";

/// Loads and stores [`Settings`] as a TOML file.
pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service for the per-user config directory.
    pub fn from_project_dirs() -> Result<Self> {
        let dirs = project_dirs()?;
        Ok(Self::new(dirs.config_dir().join(SETTINGS_FILE)))
    }

    /// Get the current settings; a missing file yields the defaults.
    pub fn get(&self) -> Result<Settings> {
        if !self.path.exists() {
            return Ok(Settings::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {}", self.path.display()))?;
        let settings: Settings = toml::from_str(&data)
            .with_context(|| format!("Failed to parse settings in {}", self.path.display()))?;
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;
        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &Settings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {}", parent.display()))?;
        }
        let data = toml::to_string_pretty(settings).context("Failed to serialize settings")?;
        fs::write(&self.path, data)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))?;
        Ok(())
    }
}

/// Database path from settings, or the per-user data directory.
pub fn resolve_database_path(settings: &Settings) -> Result<PathBuf> {
    if let Some(path) = &settings.database_path {
        return Ok(path.clone());
    }
    let dirs = project_dirs()?;
    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
    Ok(data_dir.join(DATABASE_FILE))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "Ken24T", "RustTaskGrid")
        .ok_or_else(|| anyhow!("Could not determine a home directory"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::LiveUpdateMode;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("settings.toml"));
        assert_eq!(service.get().unwrap(), Settings::default());
    }

    #[test]
    fn test_update_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let service = SettingsService::new(dir.path().join("conf").join("settings.toml"));

        let mut settings = Settings::default();
        settings.first_day_of_week = 1;
        settings.max_visible_lanes = Some(3);
        settings.live_update_mode = LiveUpdateMode::Buffered;
        service.update(&settings).unwrap();

        assert_eq!(service.get().unwrap(), settings);
    }

    #[test]
    fn test_invalid_settings_not_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let service = SettingsService::new(&path);

        let mut settings = Settings::default();
        settings.drag_threshold_px = -1.0;
        assert!(service.update(&settings).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "first_day_of_week = \"monday\"").unwrap();

        let service = SettingsService::new(&path);
        assert!(service.get().is_err());
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let mut settings = Settings::default();
        settings.database_path = Some(PathBuf::from("/tmp/custom.db"));
        assert_eq!(resolve_database_path(&settings).unwrap(), PathBuf::from("/tmp/custom.db"));
    }
}
