// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::Settings;
use crate::config::validate::validate_settings;
use crate::errors::Result;

/// Load a settings file from a given path.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let mut settings: Settings = toml::from_str(&contents)?;
    settings.source = path.to_path_buf();

    Ok(settings)
}

/// Load a settings file from path and run basic validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Settings> {
    let settings = load_from_path(&path)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Load settings for a run.
///
/// An explicit path must exist. Without one, `Fabfile.toml` is used when
/// present and built-in defaults otherwise; either way `source` points at
/// `Fabfile.toml` so `update_fab` knows which file to rewrite (or create).
pub fn load_or_default(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_and_validate(path);
    }

    let path = default_config_path();
    if path.exists() {
        return load_and_validate(&path);
    }

    debug!(path = ?path, "no settings file found, using defaults");
    let settings = Settings {
        source: path,
        ..Settings::default()
    };
    validate_settings(&settings)?;
    Ok(settings)
}

/// Default settings file, relative to the current working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Fabfile.toml")
}
