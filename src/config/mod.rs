//! Configuration module for Artifind
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Locate and load settings, falling back to defaults.
///
/// `ARTIFIND_SETTINGS_PATH` wins over the well-known locations. Environment
/// overrides are applied on top of whatever was loaded.
pub fn load() -> Result<Settings> {
    if let Ok(path) = std::env::var("ARTIFIND_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return load_from(&path);
        }
    }

    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/artifind/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("artifind/settings.yml"))
            .unwrap_or_default(),
    ];

    for path in paths.iter() {
        if path.is_file() {
            return load_from(path);
        }
    }

    info!("No settings file found, using defaults");
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}

fn load_from(path: &Path) -> Result<Settings> {
    info!("Loading settings from: {}", path.display());
    let mut settings = Settings::from_file(path)?;
    settings.merge_env();
    Ok(settings)
}
