//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `JSONCOL_DEBUG` | `debug` |
//! | `JSONCOL_LOG_LEVEL` | `log_level` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use jsoncol_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/jsoncol.toml").unwrap();
//! for (column, opts) in &settings.columns {
//!     println!("{column}: {:?}", opts.kind);
//! }
//! ```

use std::path::Path;

use crate::error::CoreError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values.
///
/// ```
/// use jsoncol_core::settings::ColumnKind;
/// use jsoncol_core::settings_loader::from_toml_str;
///
/// let settings = from_toml_str(r#"
///     [columns.tags]
///     kind = "array"
/// "#).unwrap();
/// assert_eq!(settings.columns["tags"].kind, ColumnKind::Array);
/// ```
pub fn from_toml_str(toml_str: &str) -> Result<Settings, CoreError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| CoreError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_into_defaults(toml_to_json(toml_value)).map_err(|e| {
        CoreError::ConfigurationError(format!("Failed to deserialize settings from TOML: {e}"))
    })
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, CoreError> {
    from_toml_str(&read_config_file(path.as_ref())?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, CoreError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<Settings, CoreError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| CoreError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_into_defaults(json_value).map_err(|e| {
        CoreError::ConfigurationError(format!("Failed to deserialize settings from JSON: {e}"))
    })
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, CoreError> {
    from_json_str(&read_config_file(path.as_ref())?)
}

/// Loads settings from a JSON file and then applies environment variable overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> Result<Settings, CoreError> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Applies environment variable overrides to a settings struct.
///
/// - `JSONCOL_DEBUG` -> `debug` (values: "true"/"1"/"yes" => true, anything else => false)
/// - `JSONCOL_LOG_LEVEL` -> `log_level`
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

fn apply_overrides_from(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("JSONCOL_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("JSONCOL_LOG_LEVEL") {
        settings.log_level = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config_file(path: &Path) -> Result<String, CoreError> {
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "loaded settings file");
    Ok(content)
}

fn merge_into_defaults(overrides: serde_json::Value) -> Result<Settings, serde_json::Error> {
    let default_json = serde_json::to_value(Settings::default())?;
    serde_json::from_value(merge_json(default_json, overrides))
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
///
/// A column's `default_value` is data, not settings, so it replaces the
/// base wholesale instead of being merged key by key.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = match base_map.remove(&key) {
                    Some(base_v) if key != "default_value" => merge_json(base_v, override_v),
                    _ => override_v,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
