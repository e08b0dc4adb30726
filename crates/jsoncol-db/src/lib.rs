//! # jsoncol-db
//!
//! JSON values stored in text columns. A model definition holds one
//! [`FieldDescriptor`](fields::FieldDescriptor) per JSON column; the
//! descriptor's accessor decodes the raw text on read and encodes on write.
//! Codecs only depend on the [`RawStorage`](storage::RawStorage) capability,
//! never on a database connection.
//!
//! ## Module Overview
//!
//! - [`fields`] - Storage types, descriptors, and the JSON codecs
//! - [`storage`] - The [`RawStorage`](storage::RawStorage) trait and in-memory [`Record`](storage::Record)
//! - [`model`] - [`ModelMeta`](model::ModelMeta), the per-model field registry
//! - [`value`] - The raw [`Value`](value::Value) enum
//! - [`error`] - Decode, shape, and field-access errors

#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]

pub mod error;
pub mod fields;
pub mod model;
pub mod storage;
pub mod value;

// Re-export the most commonly used types at the crate root.
pub use error::{ColumnError, DecodeError, ShapeError};
pub use fields::{
    json_array_column, json_column, FieldDescriptor, FieldType, JsonArrayColumn, JsonColumn,
    JsonColumnOptions,
};
pub use model::ModelMeta;
pub use storage::{RawStorage, Record};
pub use value::Value;
