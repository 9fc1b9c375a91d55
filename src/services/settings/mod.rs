mod persistence;
mod service;

pub use persistence::{load_settings, save_settings};
pub use service::{default_settings_path, SettingsService, SETTINGS_FILE_NAME};
