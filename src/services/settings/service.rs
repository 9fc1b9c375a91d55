use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

use super::persistence::{load_settings, save_settings};
use crate::models::settings::InteractionSettings;

pub const SETTINGS_FILE_NAME: &str = "interaction.toml";

/// Settings file inside the platform config directory, if one can be resolved
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "KenBoyle", "RustCalendar")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
}

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Service bound to the platform config directory
    pub fn from_default_location() -> Result<Self> {
        let path = default_settings_path()
            .ok_or_else(|| anyhow!("Could not determine the config directory"))?;
        Ok(Self::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the current settings
    pub fn get(&self) -> Result<InteractionSettings> {
        let settings = load_settings(&self.path)?;
        settings
            .validate()
            .with_context(|| format!("Invalid settings in {}", self.path.display()))?;
        Ok(settings)
    }

    /// Update settings
    pub fn update(&self, settings: &InteractionSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        save_settings(&self.path, settings)?;
        log::info!("Saved interaction settings to {}", self.path.display());
        Ok(())
    }

    /// Reset settings to defaults
    pub fn reset(&self) -> Result<()> {
        self.update(&InteractionSettings::default())
    }
}
