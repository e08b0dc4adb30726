//! JSON-in-text column codecs.
//!
//! A [`JsonField`] reads the raw text of one column, parses it as JSON and
//! returns an owned value; writes go the other way. The type parameter fixes
//! the shape the column holds:
//!
//! - [`AnyJson`]: any JSON value. Nothing stored reads as the configured
//!   default object, or `{}`.
//! - [`JsonArray`]: a JSON array. Nothing stored reads as the configured
//!   default array, or `[]`. Other shapes are rejected on write and treated as
//!   a decode failure on read.
//!
//! The storage type is text unless the options say otherwise.

use std::fmt;
use std::marker::PhantomData;

use jsoncol_core::ColumnKind;

use crate::error::{json_kind, DecodeError, ShapeError};
use crate::fields::types::{ColumnAccessor, FieldDescriptor, FieldType};
use crate::storage::RawStorage;

/// The shape a [`JsonField`] stores.
pub trait JsonShape: Send + Sync + fmt::Debug + 'static {
    /// The decoded value handed to callers.
    type Output: Clone + fmt::Debug + PartialEq + Send + Sync;
    /// The type of a configured default.
    type Default: Clone + fmt::Debug + PartialEq + Send + Sync;

    /// Object or array.
    const KIND: ColumnKind;
    /// Name used in error messages.
    const EXPECTED: &'static str;

    /// The value read when nothing is stored and no default is configured.
    fn empty() -> Self::Output;

    /// Turns a configured default into an owned output value.
    fn from_default(default: &Self::Default) -> Self::Output;

    /// Narrows a parsed JSON value to this shape, handing it back on mismatch.
    fn narrow(value: serde_json::Value) -> Result<Self::Output, serde_json::Value>;

    /// Widens an output value back to JSON.
    fn widen(value: Self::Output) -> serde_json::Value;

    /// Whether a setter accepts `value`.
    fn accepts(value: &serde_json::Value) -> bool;
}

/// Any JSON value; defaults are objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyJson;

impl JsonShape for AnyJson {
    type Output = serde_json::Value;
    type Default = serde_json::Map<String, serde_json::Value>;

    const KIND: ColumnKind = ColumnKind::Object;
    const EXPECTED: &'static str = "JSON";

    fn empty() -> Self::Output {
        serde_json::Value::Object(serde_json::Map::new())
    }

    fn from_default(default: &Self::Default) -> Self::Output {
        serde_json::Value::Object(default.clone())
    }

    fn narrow(value: serde_json::Value) -> Result<Self::Output, serde_json::Value> {
        Ok(value)
    }

    fn widen(value: Self::Output) -> serde_json::Value {
        value
    }

    fn accepts(_value: &serde_json::Value) -> bool {
        true
    }
}

/// A JSON array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonArray;

impl JsonShape for JsonArray {
    type Output = Vec<serde_json::Value>;
    type Default = Vec<serde_json::Value>;

    const KIND: ColumnKind = ColumnKind::Array;
    const EXPECTED: &'static str = "array";

    fn empty() -> Self::Output {
        Vec::new()
    }

    fn from_default(default: &Self::Default) -> Self::Output {
        default.clone()
    }

    fn narrow(value: serde_json::Value) -> Result<Self::Output, serde_json::Value> {
        match value {
            serde_json::Value::Array(items) => Ok(items),
            other => Err(other),
        }
    }

    fn widen(value: Self::Output) -> serde_json::Value {
        serde_json::Value::Array(value)
    }

    fn accepts(value: &serde_json::Value) -> bool {
        value.is_array()
    }
}

/// Options recognized by [`json_column`] and [`json_array_column`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JsonColumnOptions<D> {
    /// Overrides the storage type (text by default).
    #[serde(default)]
    pub column_type: Option<FieldType>,
    /// Returned when the column holds nothing.
    #[serde(default)]
    pub default_value: Option<D>,
}

impl<D> JsonColumnOptions<D> {
    /// Creates options with the given storage type and no default.
    pub const fn new(column_type: Option<FieldType>) -> Self {
        Self {
            column_type,
            default_value: None,
        }
    }

    /// Sets the storage type.
    #[must_use]
    pub const fn column_type(mut self, column_type: FieldType) -> Self {
        self.column_type = Some(column_type);
        self
    }

    /// Sets the value returned when the column holds nothing.
    #[must_use]
    pub fn default_value(mut self, default_value: D) -> Self {
        self.default_value = Some(default_value);
        self
    }
}

/// A codec between one raw text column and a JSON value of shape `S`.
///
/// # Examples
///
/// ```
/// use jsoncol_db::fields::{JsonArrayColumn, JsonColumnOptions};
/// use jsoncol_db::storage::Record;
/// use serde_json::json;
///
/// let tags = JsonArrayColumn::new("tags", JsonColumnOptions::default());
/// let mut record = Record::new();
/// assert_eq!(tags.get(&record), Some(vec![]));
///
/// tags.set(&mut record, &json!(["x", "y"])).unwrap();
/// assert_eq!(tags.get(&record), Some(vec![json!("x"), json!("y")]));
/// assert!(tags.set(&mut record, &json!("x")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct JsonField<S: JsonShape> {
    column: String,
    default_value: Option<S::Default>,
    shape: PhantomData<S>,
}

/// A column holding any JSON value.
pub type JsonColumn = JsonField<AnyJson>;

/// A column holding a JSON array.
pub type JsonArrayColumn = JsonField<JsonArray>;

impl<S: JsonShape> JsonField<S> {
    /// Creates a codec for `column`. The storage type in `options` only
    /// matters to the [`FieldDescriptor`] built around the codec.
    pub fn new(column: impl Into<String>, options: JsonColumnOptions<S::Default>) -> Self {
        Self {
            column: column.into(),
            default_value: options.default_value,
            shape: PhantomData,
        }
    }

    /// The backing raw column.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Returns the default that an empty column reads as, as an owned value.
    pub fn default_output(&self) -> S::Output {
        self.default_value
            .as_ref()
            .map_or_else(S::empty, S::from_default)
    }

    /// Reads and decodes the column, returning decode failures.
    pub fn try_get<R: RawStorage + ?Sized>(&self, storage: &R) -> Result<S::Output, DecodeError> {
        let Some(raw) = storage.read_raw(&self.column).filter(|raw| !raw.is_empty()) else {
            return Ok(self.default_output());
        };

        let parsed: serde_json::Value =
            serde_json::from_str(raw).map_err(|source| DecodeError::Malformed {
                column: self.column.clone(),
                source,
            })?;

        S::narrow(parsed).map_err(|other| DecodeError::WrongShape {
            column: self.column.clone(),
            expected: S::EXPECTED,
            found: json_kind(&other),
        })
    }

    /// Reads and decodes the column.
    ///
    /// A decode failure is logged at error level and read as `None`.
    pub fn get<R: RawStorage + ?Sized>(&self, storage: &R) -> Option<S::Output> {
        match self.try_get(storage) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::error!(column = %self.column, error = %err, "failed to decode JSON column");
                None
            }
        }
    }

    /// Encodes `value` and writes it to the column.
    ///
    /// A value of the wrong shape is rejected before anything is written.
    pub fn set<R: RawStorage + ?Sized>(
        &self,
        storage: &mut R,
        value: &serde_json::Value,
    ) -> Result<(), ShapeError> {
        if !S::accepts(value) {
            return Err(ShapeError {
                column: self.column.clone(),
                expected: S::EXPECTED,
                found: json_kind(value),
            });
        }
        storage.write_raw(&self.column, value.to_string());
        Ok(())
    }

    /// Encodes an already well-shaped value and writes it to the column.
    pub fn set_typed<R: RawStorage + ?Sized>(&self, storage: &mut R, value: S::Output) {
        storage.write_raw(&self.column, S::widen(value).to_string());
    }
}

impl<S: JsonShape> ColumnAccessor for JsonField<S> {
    fn column(&self) -> &str {
        &self.column
    }

    fn kind(&self) -> ColumnKind {
        S::KIND
    }

    fn try_get_json(&self, storage: &dyn RawStorage) -> Result<serde_json::Value, DecodeError> {
        self.try_get(storage).map(S::widen)
    }

    fn get_json(&self, storage: &dyn RawStorage) -> serde_json::Value {
        self.get(storage).map_or(serde_json::Value::Null, S::widen)
    }

    fn set_json(
        &self,
        storage: &mut dyn RawStorage,
        value: &serde_json::Value,
    ) -> Result<(), ShapeError> {
        self.set(storage, value)
    }
}

/// Builds a descriptor for a column holding any JSON value.
///
/// ```
/// use jsoncol_db::fields::{json_column, JsonColumnOptions};
/// use jsoncol_db::storage::Record;
/// use serde_json::json;
///
/// let mut defaults = serde_json::Map::new();
/// defaults.insert("a".into(), json!(1));
/// let meta = json_column("meta", JsonColumnOptions::default().default_value(defaults));
///
/// let mut record = Record::new();
/// assert_eq!(meta.get(&record), json!({"a": 1}));
/// meta.set(&mut record, &json!({"b": 2})).unwrap();
/// assert_eq!(meta.get(&record), json!({"b": 2}));
/// ```
pub fn json_column(
    field_name: impl Into<String>,
    options: JsonColumnOptions<serde_json::Map<String, serde_json::Value>>,
) -> FieldDescriptor {
    let field_type = options.column_type.unwrap_or_default();
    FieldDescriptor::new(field_type, Box::new(JsonColumn::new(field_name, options)))
}

/// Builds a descriptor for a column holding a JSON array.
pub fn json_array_column(
    field_name: impl Into<String>,
    options: JsonColumnOptions<Vec<serde_json::Value>>,
) -> FieldDescriptor {
    let field_type = options.column_type.unwrap_or_default();
    FieldDescriptor::new(field_type, Box::new(JsonArrayColumn::new(field_name, options)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Record;
    use crate::value::Value;
    use serde_json::json;

    fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    // ── Object codec ────────────────────────────────────────────────

    #[test]
    fn test_json_column_empty_reads_empty_object() {
        let meta = JsonColumn::new("meta", JsonColumnOptions::default());
        assert_eq!(meta.get(&Record::new()), Some(json!({})));
    }

    #[test]
    fn test_json_column_blank_string_reads_default() {
        let meta = JsonColumn::new(
            "meta",
            JsonColumnOptions::default().default_value(object(json!({"a": 1}))),
        );
        let record = Record::from_values([("meta", Value::from(""))]);
        assert_eq!(meta.get(&record), Some(json!({"a": 1})));
    }

    #[test]
    fn test_json_column_default_is_independent_copy() {
        let meta = JsonColumn::new(
            "meta",
            JsonColumnOptions::default().default_value(object(json!({"a": {"nested": [1]}}))),
        );
        let record = Record::new();

        let mut first = meta.get(&record).unwrap();
        first["a"]["nested"] = json!("changed");
        first["b"] = json!(2);

        assert_eq!(meta.get(&record), Some(json!({"a": {"nested": [1]}})));
    }

    #[test]
    fn test_json_column_accepts_any_shape() {
        let meta = JsonColumn::new("meta", JsonColumnOptions::default());
        let mut record = Record::new();
        for value in [json!(1), json!("x"), json!([1, 2]), json!(null), json!({"k": true})] {
            meta.set(&mut record, &value).unwrap();
            assert_eq!(meta.get(&record), Some(value));
        }
    }

    #[test]
    fn test_json_column_writes_compact_json() {
        let meta = JsonColumn::new("meta", JsonColumnOptions::default());
        let mut record = Record::new();
        meta.set(&mut record, &json!({"b": 2})).unwrap();
        assert_eq!(record.read_raw("meta"), Some(r#"{"b":2}"#));
    }

    #[test]
    fn test_json_column_malformed_reads_none() {
        let meta = JsonColumn::new("meta", JsonColumnOptions::default());
        let record = Record::from_values([("meta", Value::from("{not json"))]);
        assert_eq!(meta.get(&record), None);
        assert!(matches!(
            meta.try_get(&record),
            Err(DecodeError::Malformed { .. })
        ));
    }

    // ── Array codec ─────────────────────────────────────────────────

    #[test]
    fn test_json_array_column_empty_reads_empty_vec() {
        let tags = JsonArrayColumn::new("tags", JsonColumnOptions::default());
        assert_eq!(tags.get(&Record::new()), Some(vec![]));
    }

    #[test]
    fn test_json_array_column_configured_default() {
        let tags = JsonArrayColumn::new(
            "tags",
            JsonColumnOptions::default().default_value(vec![json!("new")]),
        );
        assert_eq!(tags.get(&Record::new()), Some(vec![json!("new")]));
    }

    #[test]
    fn test_json_array_column_rejects_non_array_without_writing() {
        let tags = JsonArrayColumn::new("tags", JsonColumnOptions::default());
        let mut record = Record::new();
        tags.set(&mut record, &json!(["keep"])).unwrap();

        for bad in [json!("x"), json!({"a": 1}), json!(3), json!(null)] {
            let err = tags.set(&mut record, &bad).unwrap_err();
            assert_eq!(err.expected, "array");
            assert_eq!(err.found, json_kind(&bad));
        }
        assert_eq!(record.read_raw("tags"), Some(r#"["keep"]"#));
    }

    #[test]
    fn test_json_array_column_stored_object_is_decode_failure() {
        let tags = JsonArrayColumn::new("tags", JsonColumnOptions::default());
        let record = Record::from_values([("tags", Value::from(r#"{"a":1}"#))]);
        assert_eq!(tags.get(&record), None);
        match tags.try_get(&record) {
            Err(DecodeError::WrongShape {
                expected, found, ..
            }) => {
                assert_eq!(expected, "array");
                assert_eq!(found, "object");
            }
            other => panic!("expected WrongShape, got {other:?}"),
        }
    }

    #[test]
    fn test_json_array_column_set_typed() {
        let tags = JsonArrayColumn::new("tags", JsonColumnOptions::default());
        let mut record = Record::new();
        tags.set_typed(&mut record, vec![json!(1), json!({"x": null})]);
        assert_eq!(record.read_raw("tags"), Some(r#"[1,{"x":null}]"#));
        assert_eq!(tags.get(&record), Some(vec![json!(1), json!({"x": null})]));
    }

    // ── Descriptors ─────────────────────────────────────────────────

    #[test]
    fn test_json_column_descriptor_column_type_override() {
        let f = json_column(
            "meta",
            JsonColumnOptions::default().column_type(FieldType::JsonField),
        );
        assert_eq!(f.field_type, FieldType::JsonField);
        assert_eq!(f.kind(), ColumnKind::Object);
    }

    #[test]
    fn test_json_array_column_descriptor_defaults_to_text() {
        let f = json_array_column("tags", JsonColumnOptions::default());
        assert_eq!(f.field_type, FieldType::TextField);
        assert_eq!(f.kind(), ColumnKind::Array);
        assert!(f.default.is_none());
    }

    #[test]
    fn test_accessor_masks_decode_failure_as_null() {
        let f = json_array_column("tags", JsonColumnOptions::default());
        let record = Record::from_values([("tags", Value::from("[1,"))]);
        assert_eq!(f.get(&record), serde_json::Value::Null);
        assert!(f.try_get(&record).is_err());
    }

    #[test]
    fn test_options_deserialize() {
        let opts: JsonColumnOptions<Vec<serde_json::Value>> =
            serde_json::from_str(r#"{"column_type": "CharField", "default_value": ["a"]}"#)
                .unwrap();
        assert_eq!(opts.column_type, Some(FieldType::CharField));
        assert_eq!(opts.default_value, Some(vec![json!("a")]));
    }
}
