// src/config/mod.rs

//! Settings loading and validation for vagrantfab.
//!
//! Responsibilities:
//! - Define the TOML-backed settings model (`model.rs`).
//! - Load a settings file from disk, or fall back to defaults (`loader.rs`).
//! - Validate basic invariants like an absolute target path (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path, load_or_default};
pub use model::{PLACEHOLDER_TOKEN, ProjectSection, SEED_SETTINGS, Settings, TargetSection};
pub use validate::validate_settings;
