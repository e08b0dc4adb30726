//! Model metadata.
//!
//! [`ModelMeta`] is the registry of JSON field descriptors for one model. It
//! is built once, typically in a `static`, and routes reads and writes of a
//! named field through that field's accessor against any
//! [`RawStorage`](crate::storage::RawStorage).

use jsoncol_core::logging::field_span;
use jsoncol_core::Settings;

use crate::error::ColumnError;
use crate::fields::{Backend, FieldDescriptor};
use crate::storage::RawStorage;

/// The JSON fields of one model.
///
/// # Examples
///
/// ```
/// use jsoncol_db::fields::{json_array_column, json_column, JsonColumnOptions};
/// use jsoncol_db::model::ModelMeta;
/// use jsoncol_db::storage::Record;
/// use serde_json::json;
///
/// let meta = ModelMeta::new("article")
///     .field(json_column("meta", JsonColumnOptions::default()))
///     .field(json_array_column("tags", JsonColumnOptions::default()));
///
/// let mut record = Record::new();
/// meta.set_field(&mut record, "tags", &json!(["rust"])).unwrap();
/// assert_eq!(meta.get_field(&record, "tags").unwrap(), json!(["rust"]));
/// assert_eq!(meta.get_field(&record, "meta").unwrap(), json!({}));
/// assert!(meta.get_field(&record, "body").is_err());
/// ```
#[derive(Debug)]
pub struct ModelMeta {
    /// The model name in lowercase (e.g. "article").
    pub model_name: String,
    /// The database table name.
    pub db_table: String,
    fields: Vec<FieldDescriptor>,
}

impl ModelMeta {
    /// Creates metadata with no fields. The table name defaults to the model name.
    pub fn new(model_name: impl Into<String>) -> Self {
        let model_name = model_name.into();
        Self {
            db_table: model_name.clone(),
            model_name,
            fields: Vec::new(),
        }
    }

    /// Builds metadata with one descriptor per column declared in `settings`.
    pub fn from_settings(
        model_name: impl Into<String>,
        settings: &Settings,
    ) -> Result<Self, ColumnError> {
        let mut meta = Self::new(model_name);
        for (column, opts) in &settings.columns {
            meta.try_field(FieldDescriptor::from_settings(column, opts)?)?;
        }
        Ok(meta)
    }

    /// Sets the database table name.
    #[must_use]
    pub fn db_table(mut self, table: impl Into<String>) -> Self {
        self.db_table = table.into();
        self
    }

    /// Adds a field. A duplicate name or column is logged and the first field kept.
    #[must_use]
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        if let Err(err) = self.try_field(descriptor) {
            tracing::warn!(model = %self.model_name, error = %err, "ignoring field");
        }
        self
    }

    /// Adds a field, rejecting a name or a column that is already registered.
    ///
    /// Two fields on one column would overwrite each other's JSON.
    pub fn try_field(&mut self, descriptor: FieldDescriptor) -> Result<(), ColumnError> {
        if self.get(&descriptor.name).is_some() {
            return Err(ColumnError::DuplicateField {
                model: self.model_name.clone(),
                field: descriptor.name,
            });
        }
        if self.fields.iter().any(|f| f.column() == descriptor.column()) {
            return Err(ColumnError::DuplicateColumn {
                model: self.model_name.clone(),
                column: descriptor.column().to_string(),
            });
        }
        self.fields.push(descriptor);
        Ok(())
    }

    /// Returns the descriptor registered under `name`.
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All descriptors in registration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    fn lookup(&self, name: &str) -> Result<&FieldDescriptor, ColumnError> {
        self.get(name).ok_or_else(|| ColumnError::UnknownField {
            model: self.model_name.clone(),
            field: name.to_string(),
        })
    }

    /// Reads field `name`. A decode failure is logged and read as `Null`.
    pub fn get_field(
        &self,
        storage: &dyn RawStorage,
        name: &str,
    ) -> Result<serde_json::Value, ColumnError> {
        let field = self.lookup(name)?;
        let _guard = field_span(&self.model_name, name).entered();
        Ok(field.get(storage))
    }

    /// Reads field `name`, returning decode failures.
    pub fn try_get_field(
        &self,
        storage: &dyn RawStorage,
        name: &str,
    ) -> Result<serde_json::Value, ColumnError> {
        let field = self.lookup(name)?;
        Ok(field.try_get(storage)?)
    }

    /// Writes field `name`.
    pub fn set_field(
        &self,
        storage: &mut dyn RawStorage,
        name: &str,
        value: &serde_json::Value,
    ) -> Result<(), ColumnError> {
        let field = self.lookup(name)?;
        let _guard = field_span(&self.model_name, name).entered();
        field.set(storage, value)?;
        tracing::debug!(column = field.column(), "wrote JSON column");
        Ok(())
    }

    /// Renders a `CREATE TABLE` statement for the registered fields.
    pub fn create_table_sql(&self, backend: Backend) -> String {
        let cols: Vec<String> = self.fields.iter().map(|f| f.column_sql(backend)).collect();
        format!("CREATE TABLE \"{}\" ({})", self.db_table, cols.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{json_array_column, json_column, FieldType, JsonColumnOptions};
    use crate::storage::Record;
    use jsoncol_core::settings_loader::from_toml_str;
    use serde_json::json;

    fn article() -> ModelMeta {
        ModelMeta::new("article")
            .field(json_column("meta", JsonColumnOptions::default()))
            .field(json_array_column("tags", JsonColumnOptions::default()))
    }

    #[test]
    fn test_new_defaults_table_to_model_name() {
        let meta = ModelMeta::new("article");
        assert_eq!(meta.db_table, "article");
        assert!(meta.fields().is_empty());

        let meta = meta.db_table("blog_article");
        assert_eq!(meta.db_table, "blog_article");
    }

    #[test]
    fn test_duplicate_field_keeps_first() {
        let meta = article().field(json_array_column("meta", JsonColumnOptions::default()));
        assert_eq!(meta.fields().len(), 2);
        assert_eq!(
            meta.get("meta").unwrap().kind(),
            jsoncol_core::ColumnKind::Object
        );
    }

    #[test]
    fn test_try_field_rejects_duplicate() {
        let mut meta = article();
        let err = meta
            .try_field(json_column("tags", JsonColumnOptions::default()))
            .unwrap_err();
        assert_eq!(err.to_string(), "model 'article' already has a field 'tags'");
    }

    #[test]
    fn test_try_field_rejects_shared_column() {
        let mut meta = article();
        let err = meta
            .try_field(json_column("tags", JsonColumnOptions::default()).named("labels"))
            .unwrap_err();
        assert!(matches!(err, ColumnError::DuplicateColumn { ref column, .. } if column == "tags"));
        assert_eq!(err.to_string(), "model 'article' already maps column 'tags'");
        assert!(meta.get("labels").is_none());
    }

    #[test]
    fn test_field_keeps_first_on_shared_column() {
        let meta = ModelMeta::new("article")
            .field(json_column("meta", JsonColumnOptions::default()))
            .field(json_array_column("meta", JsonColumnOptions::default()).named("meta_list"));
        assert_eq!(meta.fields().len(), 1);
        assert_eq!(meta.fields()[0].name, "meta");
    }

    #[test]
    fn test_named_field_reads_its_column() {
        let meta = ModelMeta::new("article")
            .field(json_column("meta_json", JsonColumnOptions::default()).named("meta"));
        let mut record = Record::new();
        meta.set_field(&mut record, "meta", &json!({"k": 1})).unwrap();
        assert_eq!(record.read_raw("meta_json"), Some(r#"{"k":1}"#));
        assert_eq!(record.read_raw("meta"), None);
    }

    #[test]
    fn test_unknown_field() {
        let meta = article();
        let mut record = Record::new();
        assert!(matches!(
            meta.get_field(&record, "body"),
            Err(ColumnError::UnknownField { .. })
        ));
        assert!(matches!(
            meta.set_field(&mut record, "body", &json!({})),
            Err(ColumnError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_set_field_shape_error_leaves_record() {
        let meta = article();
        let mut record = Record::new();
        let err = meta.set_field(&mut record, "tags", &json!("x")).unwrap_err();
        assert!(matches!(err, ColumnError::Shape(_)));
        assert_eq!(record, Record::new());
    }

    #[test]
    fn test_get_field_masks_and_try_get_field_reports() {
        let meta = article();
        let mut record = Record::new();
        record.set_value("meta", "{not json");
        assert_eq!(meta.get_field(&record, "meta").unwrap(), serde_json::Value::Null);
        assert!(matches!(
            meta.try_get_field(&record, "meta"),
            Err(ColumnError::Decode(_))
        ));
    }

    #[test]
    fn test_create_table_sql() {
        let meta = article().db_table("blog_article");
        assert_eq!(
            meta.create_table_sql(Backend::PostgreSql),
            "CREATE TABLE \"blog_article\" (\"meta\" TEXT NULL, \"tags\" TEXT NULL)"
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = from_toml_str(
            r#"
            [columns.meta]
            column_type = "JsonField"
            default_value = { a = 1 }

            [columns.tags]
            kind = "array"
            "#,
        )
        .unwrap();
        let meta = ModelMeta::from_settings("article", &settings).unwrap();
        assert_eq!(meta.fields().len(), 2);
        assert_eq!(meta.get("meta").unwrap().field_type, FieldType::JsonField);

        let record = Record::new();
        assert_eq!(meta.get_field(&record, "meta").unwrap(), json!({"a": 1}));
        assert_eq!(meta.get_field(&record, "tags").unwrap(), json!([]));
    }

    #[test]
    fn test_from_settings_propagates_bad_default() {
        let settings = from_toml_str(
            r#"
            [columns.tags]
            kind = "array"
            default_value = "x"
            "#,
        )
        .unwrap();
        assert!(ModelMeta::from_settings("article", &settings).is_err());
    }
}
