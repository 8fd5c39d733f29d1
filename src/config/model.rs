// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Marker left in a fresh project template, replaced by `update_fab`.
pub const PLACEHOLDER_TOKEN: &str = "<% project_name %>";

/// Settings file written by `update_fab` when the run started from defaults.
/// Only the project name is recorded; everything else keeps its default.
pub const SEED_SETTINGS: &str = "[project]\nname = \"<% project_name %>\"\n";

/// Top-level settings as read from a TOML file.
///
/// ```toml
/// [target]
/// user = "vagrant"
/// path = "/vagrant"
/// host = "127.0.0.1"
/// port = 2222
/// identity_file = "~/.vagrant.d/insecure_private_key"
///
/// [project]
/// name = "<% project_name %>"
/// ```
///
/// All sections are optional and have defaults matching a stock Vagrant box.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// The VM commands run on, from `[target]`.
    #[serde(default)]
    pub target: TargetSection,

    /// The Django project, from `[project]`.
    #[serde(default)]
    pub project: ProjectSection,

    /// Where these settings were (or would have been) loaded from.
    ///
    /// `update_fab` rewrites the placeholder token in this file.
    #[serde(skip)]
    pub source: PathBuf,
}

/// `[target]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetSection {
    /// Remote user that composite tasks put into the execution context.
    #[serde(default = "default_user")]
    pub user: String,

    /// Working directory on the VM; composite tasks `cd` here.
    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default = "default_host")]
    pub host: String,

    /// Vagrant forwards the guest's ssh port to 2222 on the host.
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub identity_file: Option<String>,
}

fn default_user() -> String {
    "vagrant".to_string()
}

fn default_path() -> String {
    "/vagrant".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    2222
}

impl Default for TargetSection {
    fn default() -> Self {
        Self {
            user: default_user(),
            path: default_path(),
            host: default_host(),
            port: default_port(),
            identity_file: None,
        }
    }
}

/// `[project]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectSection {
    /// Project name used by `build`, `update` and `serve`.
    ///
    /// Stays the placeholder token until `update_fab` has rewritten the
    /// settings file.
    #[serde(default = "default_project_name")]
    pub name: String,

    /// Project template handed to `django-admin.py startproject`.
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_project_name() -> String {
    PLACEHOLDER_TOKEN.to_string()
}

fn default_template() -> String {
    "https://github.com/twoscoops/django-twoscoops-project/archive/master.zip".to_string()
}

impl Default for ProjectSection {
    fn default() -> Self {
        Self {
            name: default_project_name(),
            template: default_template(),
        }
    }
}

impl ProjectSection {
    /// True while the name is still the unreplaced template marker.
    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_TOKEN
    }
}
