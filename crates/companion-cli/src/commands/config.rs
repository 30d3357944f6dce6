use anyhow::{Context, Result};
use colored::Colorize;
use companion_infrastructure::{CompanionPaths, ConfigStorage};
use serde_json::Value;
use std::path::PathBuf;

pub fn storage(file: Option<PathBuf>) -> Result<ConfigStorage> {
    let path = CompanionPaths::resolve_config_file(file).context("Failed to resolve config file")?;
    Ok(ConfigStorage::new(path))
}

pub fn show(file: Option<PathBuf>) -> Result<()> {
    let storage = storage(file)?;
    let config = storage.load_config()?;

    println!("{}", format!("# {}", storage.path().display()).bright_black());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

pub fn set(file: Option<PathBuf>, key: &str, raw: &str) -> Result<()> {
    let storage = storage(file)?;
    let config = storage.set(key, parse_value(raw))?;

    println!("{}", format!("Updated {}", key).green());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// JSON literals keep their type; anything else is taken as a string.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("dark"), Value::String("dark".into()));
        assert_eq!(parse_value("null"), Value::Null);
        assert_eq!(parse_value("42"), serde_json::json!(42));
        assert_eq!(parse_value("\"quoted\""), Value::String("quoted".into()));
    }
}
