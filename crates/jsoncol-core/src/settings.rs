//! Settings for jsoncol.
//!
//! [`Settings`] holds logging configuration and the declarative column
//! options that model definitions can be built from. Settings are plain data;
//! see [`settings_loader`](crate::settings_loader) for reading them from TOML
//! or JSON files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The structural kind a JSON column stores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// Any JSON value; the empty default is an object.
    #[default]
    Object,
    /// A JSON array; the empty default is an empty array.
    Array,
}

/// Declarative options for one JSON column.
///
/// # Examples
///
/// ```
/// use jsoncol_core::settings::{ColumnKind, ColumnSettings};
///
/// let opts: ColumnSettings = serde_json::from_str(
///     r#"{"kind": "array", "column_type": "CharField"}"#,
/// ).unwrap();
/// assert_eq!(opts.kind, ColumnKind::Array);
/// assert_eq!(opts.column_type.as_deref(), Some("CharField"));
/// assert!(opts.default_value.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSettings {
    /// Object or array column.
    pub kind: ColumnKind,
    /// Storage type name (`TextField`, `CharField`, `JsonField`). `None` means text.
    pub column_type: Option<String>,
    /// Value returned when the column holds nothing.
    pub default_value: Option<serde_json::Value>,
}

/// The complete set of jsoncol settings.
///
/// # Examples
///
/// ```
/// use jsoncol_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// assert!(settings.columns.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON logs).
    pub debug: bool,
    /// The log filter directive (e.g. "info", "jsoncol_db=debug").
    pub log_level: String,
    /// JSON column declarations keyed by column name.
    pub columns: BTreeMap<String, ColumnSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            columns: BTreeMap::new(),
        }
    }
}
