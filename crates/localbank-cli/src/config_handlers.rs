//! Handler functions for the `config` subcommands.
//!
//! The `config_*` functions are generic over [`ConfigManager`] and return
//! what they would print; [`handle_config_command`] does the printing for
//! [`LocalbankConfig`].

use std::path::PathBuf;

use localbank_core::config::{format_toml_value, get_nested_value, parse_value, set_nested_value};
use localbank_core::{ConfigManager, Error, Result};

use crate::cli::ConfigAction;
use crate::config::LocalbankConfig;

// ============================================================================
// Command dispatch
// ============================================================================

/// Run a `config` subcommand against [`LocalbankConfig`].
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let path = config_path_of::<LocalbankConfig>(config_path)?;
            println!("{}", path.display());
            if !path.exists() {
                eprintln!(
                    "(file does not exist; run `{} config init` to create it)",
                    LocalbankConfig::project_name()
                );
            }
        }
        ConfigAction::Get { key } => {
            println!("{}", config_get::<LocalbankConfig>(config_path, &key)?);
        }
        ConfigAction::Set { key, value } => {
            let path = config_set::<LocalbankConfig>(config_path, &key, &value)?;
            println!("Set {key} = {value} in {}", path.display());
        }
        ConfigAction::Init { file, force } => {
            let path = config_init::<LocalbankConfig>(file.as_deref().or(config_path), force)?;
            println!("Config file created at {}", path.display());
        }
        ConfigAction::Export { docker_env } => {
            let config = LocalbankConfig::load(config_path)?;
            for line in export_lines(&config, docker_env)? {
                println!("{line}");
            }
        }
    }
    Ok(())
}

// ============================================================================
// Generic handlers
// ============================================================================

/// The config file that would be read.
pub fn config_path_of<C: ConfigManager>(config_path: Option<&str>) -> Result<PathBuf> {
    C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory for this platform"))
}

/// Effective value of a dotted key, environment overrides included.
pub fn config_get<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Write one dotted key into the config file.
///
/// Only keys the configuration actually has are accepted, and the edited
/// file must still load; on any error the file is left untouched.
pub fn config_set<C: ConfigManager>(
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<PathBuf> {
    let defaults = toml::Value::try_from(C::default()).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&defaults, key) {
        Some(toml::Value::Table(_)) | Some(toml::Value::Array(_)) => {
            return Err(Error::config(format!(
                "Key '{key}' is a section; set one of its values instead"
            )));
        }
        Some(_) => {}
        None => return Err(Error::config(format!("Unknown configuration key '{key}'"))),
    }

    let path = config_path_of::<C>(config_path)?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parse_value(value))?;
    doc.clone()
        .try_into::<C>()
        .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Write a default config file; refuses to overwrite unless `force`.
pub fn config_init<C: ConfigManager>(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = C::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// `KEY=VALUE` lines, or `--env KEY=VALUE` for `docker run`.
pub fn export_lines<C: ConfigManager>(config: &C, docker_env: bool) -> Result<Vec<String>> {
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================
