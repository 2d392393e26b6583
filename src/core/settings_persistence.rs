//! Settings persistence system
//!
//! Saves and loads [`InteractionSettings`] to/from a JSON file so user
//! preferences survive across sessions.
//!
//! # File Location
//!
//! Settings are stored in `interaction_settings.json` in the platform
//! configuration directory (via `directories::ProjectDirs`), falling back to
//! the working directory when no such directory exists. The path lives in the
//! [`SettingsPath`] resource so hosts and tests can redirect it.
//!
//! # Error Handling
//!
//! - [`load_settings`] / [`save_settings`] return [`CoreResult`]
//! - the Bevy systems log failures and keep running with defaults

use super::error::CoreResult;
use super::settings::InteractionSettings;
use bevy::prelude::*;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// Settings filename
const SETTINGS_FILENAME: &str = "interaction_settings.json";

/// Where the settings file is read from and written to
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct SettingsPath(pub PathBuf);

impl Default for SettingsPath {
    fn default() -> Self {
        Self(default_settings_path())
    }
}

/// Resolve the settings file in the user's configuration directory
///
/// E.g. `~/.config/checkmates/interaction_settings.json` on Linux.
pub fn default_settings_path() -> PathBuf {
    match ProjectDirs::from("com", "trilltino", "Checkmates") {
        Some(proj_dirs) => proj_dirs.config_dir().join(SETTINGS_FILENAME),
        None => PathBuf::from(SETTINGS_FILENAME),
    }
}

/// Read and parse the settings file at `path`
pub fn load_settings(path: &Path) -> CoreResult<InteractionSettings> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Write `settings` to `path` as pretty JSON, creating parent directories
pub fn save_settings(path: &Path, settings: &InteractionSettings) -> CoreResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load settings, falling back to defaults on a missing or unreadable file
pub fn load_settings_or_default(path: &Path) -> InteractionSettings {
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return InteractionSettings::default();
    }
    match load_settings(path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("[SETTINGS] Failed to load settings at {:?}: {}. Using defaults.", path, e);
            InteractionSettings::default()
        }
    }
}

/// Load settings from file on startup
pub fn load_settings_system(mut commands: Commands, path: Res<SettingsPath>) {
    commands.insert_resource(load_settings_or_default(&path.0));
}

/// Save settings to file when they change
///
/// The initial insertion is not written back; only later edits are.
pub fn save_settings_system(settings: Res<InteractionSettings>, path: Res<SettingsPath>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    match save_settings(&path.0, &settings) {
        Ok(()) => info!("[SETTINGS] Saved settings to {:?}", path.0),
        Err(e) => error!("[SETTINGS] Failed to save settings to {:?}: {}", path.0, e),
    }
}
