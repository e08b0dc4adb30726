//! Storage types and field descriptors.
//!
//! A [`FieldDescriptor`] is what a model definition holds for one JSON column:
//! the storage [`FieldType`] plus the accessor pair that encodes and decodes
//! values on their way to and from raw storage.

use std::fmt;
use std::str::FromStr;

use jsoncol_core::{ColumnKind, ColumnSettings, CoreError};

use crate::error::{ColumnError, DecodeError, ShapeError};
use crate::fields::json::{json_array_column, json_column, JsonColumnOptions};
use crate::storage::RawStorage;
use crate::value::Value;

/// The SQL storage type of a JSON column.
///
/// All variants hold text; the type only changes the DDL emitted for the
/// column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FieldType {
    /// Unlimited-length text.
    #[default]
    TextField,
    /// Variable-length string.
    CharField,
    /// Native JSON column where the backend has one.
    JsonField,
}

/// SQL dialect used when rendering column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// PostgreSQL.
    PostgreSql,
    /// SQLite.
    Sqlite,
}

impl FieldType {
    /// Returns the SQL column type on PostgreSQL.
    pub const fn pg_column_type(self) -> &'static str {
        match self {
            Self::TextField => "TEXT",
            Self::CharField => "VARCHAR",
            Self::JsonField => "JSONB",
        }
    }

    /// Returns the SQL column type on SQLite, which stores all of these as text.
    pub const fn sqlite_column_type(self) -> &'static str {
        "TEXT"
    }

    /// Returns the SQL column type for `backend`.
    pub const fn column_type(self, backend: Backend) -> &'static str {
        match backend {
            Backend::PostgreSql => self.pg_column_type(),
            Backend::Sqlite => self.sqlite_column_type(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TextField => "TextField",
            Self::CharField => "CharField",
            Self::JsonField => "JsonField",
        };
        f.write_str(name)
    }
}

impl FromStr for FieldType {
    type Err = ColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TextField" | "text" => Ok(Self::TextField),
            "CharField" | "char" => Ok(Self::CharField),
            "JsonField" | "json" => Ok(Self::JsonField),
            other => Err(ColumnError::UnknownColumnType(other.to_string())),
        }
    }
}

/// The accessor pair behind a [`FieldDescriptor`].
///
/// Implemented by both JSON codecs so that a model can hold descriptors of
/// different shapes side by side. Values cross this boundary as plain
/// `serde_json::Value`.
pub trait ColumnAccessor: Send + Sync + fmt::Debug {
    /// The backing raw column.
    fn column(&self) -> &str;

    /// The declared shape.
    fn kind(&self) -> ColumnKind;

    /// Decodes the column, reporting failures to the caller.
    fn try_get_json(&self, storage: &dyn RawStorage) -> Result<serde_json::Value, DecodeError>;

    /// Decodes the column. A decode failure is logged and read as `Null`.
    fn get_json(&self, storage: &dyn RawStorage) -> serde_json::Value;

    /// Encodes `value` into the column, rejecting the wrong shape.
    fn set_json(
        &self,
        storage: &mut dyn RawStorage,
        value: &serde_json::Value,
    ) -> Result<(), ShapeError>;
}

/// Complete definition of one JSON-backed model field.
///
/// # Examples
///
/// ```
/// use jsoncol_db::fields::{json_column, FieldType, JsonColumnOptions};
///
/// let field = json_column("meta", JsonColumnOptions::default())
///     .named("metadata")
///     .help_text("Free-form attributes");
/// assert_eq!(field.name, "metadata");
/// assert_eq!(field.column(), "meta");
/// assert_eq!(field.field_type, FieldType::TextField);
/// assert!(field.default.is_none());
/// ```
#[derive(Debug)]
pub struct FieldDescriptor {
    /// The attribute name the model exposes.
    pub name: String,
    /// The storage type of the backing column.
    pub field_type: FieldType,
    /// Whether NULL is allowed in the database.
    pub null: bool,
    /// Always `None`: defaulting happens inside the accessor.
    pub default: Option<Value>,
    /// Human-readable help text.
    pub help_text: String,
    accessor: Box<dyn ColumnAccessor>,
}

impl FieldDescriptor {
    /// Wraps an accessor. The field name starts out equal to the column name.
    pub fn new(field_type: FieldType, accessor: Box<dyn ColumnAccessor>) -> Self {
        Self {
            name: accessor.column().to_string(),
            field_type,
            null: true,
            default: None,
            help_text: String::new(),
            accessor,
        }
    }

    /// Builds a descriptor from declarative settings.
    ///
    /// The configured `default_value` must match the declared kind: an object
    /// for object columns, an array for array columns.
    ///
    /// ```
    /// use jsoncol_core::settings::{ColumnKind, ColumnSettings};
    /// use jsoncol_db::fields::{FieldDescriptor, FieldType};
    ///
    /// let opts = ColumnSettings {
    ///     kind: ColumnKind::Array,
    ///     column_type: Some("CharField".into()),
    ///     default_value: Some(serde_json::json!(["x"])),
    /// };
    /// let field = FieldDescriptor::from_settings("tags", &opts).unwrap();
    /// assert_eq!(field.kind(), ColumnKind::Array);
    /// assert_eq!(field.field_type, FieldType::CharField);
    /// ```
    pub fn from_settings(column: &str, settings: &ColumnSettings) -> Result<Self, ColumnError> {
        let column_type = settings
            .column_type
            .as_deref()
            .map(str::parse::<FieldType>)
            .transpose()?;

        let descriptor = match (settings.kind, settings.default_value.clone()) {
            (ColumnKind::Object, None) => json_column(column, JsonColumnOptions::new(column_type)),
            (ColumnKind::Object, Some(serde_json::Value::Object(map))) => json_column(
                column,
                JsonColumnOptions::new(column_type).default_value(map),
            ),
            (ColumnKind::Array, None) => {
                json_array_column(column, JsonColumnOptions::new(column_type))
            }
            (ColumnKind::Array, Some(serde_json::Value::Array(items))) => json_array_column(
                column,
                JsonColumnOptions::new(column_type).default_value(items),
            ),
            (kind, Some(other)) => {
                return Err(CoreError::ImproperlyConfigured(format!(
                    "default_value for {kind:?} column '{column}' is {}",
                    crate::error::json_kind(&other)
                ))
                .into());
            }
        };
        Ok(descriptor)
    }

    /// Sets the attribute name, leaving the backing column unchanged.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Disallows NULL in the database.
    #[must_use]
    pub const fn not_null(mut self) -> Self {
        self.null = false;
        self
    }

    /// Sets the help text.
    #[must_use]
    pub fn help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = text.into();
        self
    }

    /// The backing raw column.
    pub fn column(&self) -> &str {
        self.accessor.column()
    }

    /// The declared shape.
    pub fn kind(&self) -> ColumnKind {
        self.accessor.kind()
    }

    /// Reads and decodes the field. Decode failures are logged and read as `Null`.
    pub fn get(&self, storage: &dyn RawStorage) -> serde_json::Value {
        self.accessor.get_json(storage)
    }

    /// Reads and decodes the field, returning decode failures.
    pub fn try_get(&self, storage: &dyn RawStorage) -> Result<serde_json::Value, DecodeError> {
        self.accessor.try_get_json(storage)
    }

    /// Encodes and writes the field.
    pub fn set(
        &self,
        storage: &mut dyn RawStorage,
        value: &serde_json::Value,
    ) -> Result<(), ShapeError> {
        self.accessor.set_json(storage, value)
    }

    /// Renders this field as a column definition, e.g. `"meta" TEXT NULL`.
    pub fn column_sql(&self, backend: Backend) -> String {
        let null = if self.null { "NULL" } else { "NOT NULL" };
        format!(
            "\"{}\" {} {null}",
            self.column(),
            self.field_type.column_type(backend)
        )
    }
}
