//! Raw column storage.
//!
//! JSON column codecs never talk to a database. They only need to read and
//! write the raw text of one column on one record, which is what
//! [`RawStorage`] provides. [`Record`] is the in-memory implementation used by
//! model instances; any other storage layer can implement the trait instead.

use std::collections::BTreeMap;

use crate::value::Value;

/// Per-instance access to raw column text.
///
/// `read_raw` returns `None` when the column holds nothing usable as text:
/// unset, `NULL`, the empty string, or a non-string value. A raw number or
/// boolean is never parsed as JSON, so a column holding `Int(3)` reads as the
/// codec's default rather than as `3`.
pub trait RawStorage {
    /// Returns the raw text stored in `column`.
    fn read_raw(&self, column: &str) -> Option<&str>;

    /// Replaces the raw text stored in `column`.
    fn write_raw(&mut self, column: &str, raw: String);
}

/// An in-memory row: column name to raw [`Value`].
///
/// # Examples
///
/// ```
/// use jsoncol_db::storage::{RawStorage, Record};
/// use jsoncol_db::value::Value;
///
/// let mut record = Record::new();
/// assert_eq!(record.read_raw("meta"), None);
///
/// record.write_raw("meta", r#"{"a":1}"#.to_string());
/// assert_eq!(record.read_raw("meta"), Some(r#"{"a":1}"#));
/// assert_eq!(record.value("meta"), Some(&Value::String(r#"{"a":1}"#.into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: BTreeMap<String, Value>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from persisted `(column, value)` pairs.
    pub fn from_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Returns the raw value stored in `column`, if set.
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }

    /// Sets the raw value of `column`, bypassing any codec.
    pub fn set_value(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(column.into(), value.into());
    }

    /// Returns all `(column, value)` pairs, ordered by column name.
    pub fn field_values(&self) -> Vec<(&str, Value)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect()
    }
}

impl RawStorage for Record {
    fn read_raw(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .filter(|v| !v.is_blank())
            .and_then(Value::as_str)
    }

    fn write_raw(&mut self, column: &str, raw: String) {
        self.values.insert(column.to_string(), Value::String(raw));
    }
}
