//! Widget config file storage.
//!
//! The file is TOML on disk but is handed out as `serde_json::Value`, the
//! same patch format the host page passes to `init`.

use companion_core::config::WidgetConfig;
use companion_core::{CompanionError, Result};
use serde_json::Value as JsonValue;
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// A TOML config file read and written as JSON patches.
///
/// Responsibilities:
/// - **Atomic write** (tmp file + rename)
/// - **Format conversion** (TOML ⇄ serde_json::Value)
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file as a config patch.
    ///
    /// - `Ok(Some(JsonValue))`: Successfully loaded and converted to JSON
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<JsonValue>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let toml_value: toml::Value = toml::from_str(&content)?;
        Ok(Some(toml_to_json(toml_value)?))
    }

    /// Loads the file and resolves it into a full configuration.
    ///
    /// A missing file yields the defaults.
    pub fn load_config(&self) -> Result<WidgetConfig> {
        match self.load()? {
            Some(patch) => WidgetConfig::from_patch(&patch),
            None => Ok(WidgetConfig::default()),
        }
    }

    /// Saves a patch as TOML, replacing the file atomically.
    pub fn save(&self, data: &JsonValue) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_value = json_to_toml(data)?;
        let toml_string = toml::to_string_pretty(&toml_value).map_err(|e| {
            CompanionError::Serialization {
                format: "TOML".to_string(),
                message: e.to_string(),
            }
        })?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        tracing::debug!("[ConfigStorage] Saved {}", self.path.display());
        Ok(())
    }

    /// Sets one key, validating the result as a [`WidgetConfig`] first.
    ///
    /// `null` removes the key, since TOML has no null. An invalid value
    /// leaves the file untouched.
    pub fn set(&self, key: &str, value: JsonValue) -> Result<WidgetConfig> {
        let mut data = self
            .load()?
            .unwrap_or_else(|| JsonValue::Object(Default::default()));
        let map = data
            .as_object_mut()
            .ok_or_else(|| CompanionError::config("config file root must be a table"))?;
        if value.is_null() {
            map.remove(key);
        } else {
            map.insert(key.to_string(), value);
        }

        let config = WidgetConfig::from_patch(&data)?;
        self.save(&data)?;
        Ok(config)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| CompanionError::io("Path has no file name"))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}

fn toml_to_json(toml_value: toml::Value) -> Result<JsonValue> {
    let json_str = serde_json::to_string(&toml_value)?;
    Ok(serde_json::from_str(&json_str)?)
}

fn json_to_toml(json_value: &JsonValue) -> Result<toml::Value> {
    let json_str = serde_json::to_string(json_value)?;
    Ok(serde_json::from_str(&json_str)?)
}
