// src/config/validate.rs

use crate::config::model::Settings;
use crate::errors::{FabError, Result};

/// Run basic semantic validation against loaded settings.
///
/// This checks:
/// - `target.user`, `target.path` and `target.host` are non-empty
/// - `target.path` is absolute (it is a path on the VM)
/// - `target.port` is non-zero
///
/// The project name is deliberately not checked: it is substituted into
/// commands verbatim, placeholder token included.
pub fn validate_settings(settings: &Settings) -> Result<()> {
    let target = &settings.target;

    for (field, value) in [
        ("user", &target.user),
        ("path", &target.path),
        ("host", &target.host),
    ] {
        if value.trim().is_empty() {
            return Err(FabError::Config(format!(
                "[target].{field} must not be empty"
            )));
        }
    }

    if !target.path.starts_with('/') {
        return Err(FabError::Config(format!(
            "[target].path must be absolute on the VM (got '{}')",
            target.path
        )));
    }

    if target.port == 0 {
        return Err(FabError::Config(
            "[target].port must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}
