//! Configuration management.
//!
//! [`ConfigManager`] is implemented by application config structs. It
//! resolves the config file location, loads TOML with environment overrides,
//! and exports the config as environment variables. The dotted-key helpers
//! operate on `toml::Value` trees and are shared with the CLI.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Behavior shared by TOML-backed application configs.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Project name, used for the config directory and env prefix.
    fn project_name() -> &'static str;

    /// Prefix for environment variables (e.g. `LOCALBANK`).
    fn env_prefix() -> String {
        Self::project_name().to_uppercase().replace('-', "_")
    }

    /// `<config_dir>/<project>/config.toml` for the current platform.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve the config path: explicit argument, then `<PREFIX>_CONFIG`,
    /// then the platform default.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var(format!("{}_CONFIG", Self::env_prefix())) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        Self::default_config_path()
    }

    /// Load the config using the process environment for overrides.
    fn load(explicit: Option<&str>) -> Result<Self> {
        Self::load_with_env(explicit, std::env::vars())
    }

    /// Load the config, applying overrides from `vars`.
    ///
    /// A missing file is not an error: defaults are used.
    fn load_with_env<I>(explicit: Option<&str>, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let base: Self = match Self::resolve_config_path(explicit) {
            Some(path) if path.exists() => {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                log::debug!("Loading config from {}", path.display());
                toml::from_str(&content).map_err(|e| {
                    Error::config(format!("Failed to parse {}: {e}", path.display()))
                })?
            }
            _ => Self::default(),
        };
        base.with_env_overrides(vars)
    }

    /// Apply `<PREFIX>_<SECTION>_<KEY>` overrides for keys this config has.
    fn with_env_overrides<I>(self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut value = toml::Value::try_from(&self).map_err(|e| Error::config(e.to_string()))?;
        let known = env_key_map(&value, &Self::env_prefix());

        let mut changed = false;
        for (name, raw) in vars {
            if let Some((_, key)) = known.iter().find(|(env, _)| *env == name) {
                log::debug!("Config override from {name}");
                set_nested_value(&mut value, key, parse_value(&raw))?;
                changed = true;
            }
        }

        if !changed {
            return Ok(self);
        }
        value
            .try_into()
            .map_err(|e| Error::config(format!("Invalid environment override: {e}")))
    }

    /// Serialize to pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten scalar settings into `(ENV_NAME, value)` pairs.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        Ok(env_key_map(&value, &Self::env_prefix())
            .into_iter()
            .filter_map(|(env, key)| {
                get_nested_value(&value, &key).map(|v| (env, format_toml_value(v)))
            })
            .collect())
    }
}

/// Map every scalar leaf to `(ENV_NAME, dotted.key)`. Arrays are skipped.
fn env_key_map(value: &toml::Value, prefix: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    collect_leaves(value, "", &mut out);
    out.into_iter()
        .map(|key| {
            let env = format!("{prefix}_{}", key.replace('.', "_").to_uppercase());
            (env, key)
        })
        .collect()
}

fn collect_leaves(value: &toml::Value, path: &str, out: &mut Vec<String>) {
    match value {
        toml::Value::Table(table) => {
            for (k, v) in table {
                let child = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                collect_leaves(v, &child, out);
            }
        }
        toml::Value::Array(_) => {}
        _ => out.push(path.to_string()),
    }
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    let mut current = value;
    for part in key.split('.') {
        current = current.as_table()?.get(part)?;
    }
    Some(current)
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(Error::config("Empty key path"));
    };
    if last.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?;
    table.insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool → integer → float → string.
pub fn parse_value(s: &str) -> toml::Value {
    if s == "true" {
        return toml::Value::Boolean(true);
    }
    if s == "false" {
        return toml::Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}
