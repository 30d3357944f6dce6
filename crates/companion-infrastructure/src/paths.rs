//! Path management for CourseCompanion configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/coursecompanion/   # Config directory (platform default via `dirs`)
//! └── widget.toml              # Widget init configuration
//! ```

use companion_core::{CompanionError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "coursecompanion";
const CONFIG_FILE: &str = "widget.toml";

pub struct CompanionPaths;

impl CompanionPaths {
    /// Returns the configuration directory for the platform.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CompanionError::config("Cannot find config directory"))
    }

    /// Returns the path to the widget configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Resolves an explicit path or falls back to [`Self::config_file`].
    pub fn resolve_config_file(explicit: Option<PathBuf>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path),
            None => Self::config_file(),
        }
    }
}
