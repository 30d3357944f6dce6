//! Widget configuration model.
//!
//! Configuration arrives as loosely-typed JSON-like patches (from the host
//! page, a TOML file or the CLI) and is merged into a typed [`WidgetConfig`].

use crate::error::{CompanionError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Screen corner the floating button is pinned to.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

/// Resolved widget configuration.
///
/// Keys the widget does not recognize are kept in `extra` so that they
/// survive merges and round-trip back to the host page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub user_id: Option<String>,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub position: Position,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            user_id: None,
            api_url: default_api_url(),
            theme: Theme::default(),
            position: Position::default(),
            extra: Map::new(),
        }
    }
}

/// Keys that fall back to their default instead of taking a `null`.
const DEFAULTED_KEYS: [&str; 3] = ["apiUrl", "theme", "position"];

impl WidgetConfig {
    /// Builds a configuration from an init patch, filling defaults.
    pub fn from_patch(patch: &Value) -> Result<Self> {
        let mut config = Self::default();
        config.merge(patch)?;
        Ok(config)
    }

    /// Merges a patch into this configuration.
    ///
    /// The patch must be a JSON object. Values for recognized keys must be
    /// valid; on any error `self` is left untouched.
    pub fn merge(&mut self, patch: &Value) -> Result<()> {
        let patch = patch
            .as_object()
            .ok_or_else(|| CompanionError::config("configuration patch must be an object"))?;

        let mut merged = match serde_json::to_value(&*self)? {
            Value::Object(map) => map,
            _ => return Err(CompanionError::internal("config did not serialize to an object")),
        };

        for (key, value) in patch {
            if value.is_null() && DEFAULTED_KEYS.contains(&key.as_str()) {
                continue;
            }
            merged.insert(key.clone(), value.clone());
        }

        let updated: WidgetConfig = serde_json::from_value(Value::Object(merged))
            .map_err(|e| CompanionError::config(format!("invalid configuration: {}", e)))?;
        *self = updated;
        Ok(())
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
