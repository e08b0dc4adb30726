//! Field descriptors and JSON column codecs.
//!
//! [`json_column`] and [`json_array_column`] build the [`FieldDescriptor`]s a
//! [`ModelMeta`](crate::model::ModelMeta) holds. The codecs themselves
//! ([`JsonColumn`], [`JsonArrayColumn`]) can also be used directly against any
//! [`RawStorage`](crate::storage::RawStorage).

pub mod json;
pub mod types;

pub use json::{
    json_array_column, json_column, AnyJson, JsonArray, JsonArrayColumn, JsonColumn,
    JsonColumnOptions, JsonField, JsonShape,
};
pub use types::{Backend, ColumnAccessor, FieldDescriptor, FieldType};
