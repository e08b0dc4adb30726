//! # jsoncol
//!
//! JSON-in-text column codecs for ORM model definitions.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `jsoncol-core` or `jsoncol-db` directly for finer-grained control.
//!
//! ```
//! use jsoncol::db::{json_array_column, json_column, JsonColumnOptions, ModelMeta, Record};
//! use jsoncol::serde_json::json;
//!
//! let article = ModelMeta::new("article")
//!     .field(json_column("meta", JsonColumnOptions::default()))
//!     .field(json_array_column("tags", JsonColumnOptions::default()));
//!
//! let mut record = Record::new();
//! article.set_field(&mut record, "meta", &json!({"b": 2})).unwrap();
//! assert_eq!(article.get_field(&record, "meta").unwrap(), json!({"b": 2}));
//! ```

/// Error types, settings, and logging setup.
pub use jsoncol_core as core;

/// JSON column descriptors, raw storage, and model metadata.
#[cfg(feature = "db")]
pub use jsoncol_db as db;

pub use serde;
pub use serde_json;
pub use tracing;

/// Commonly used items.
pub mod prelude {
    pub use jsoncol_core::logging::setup_logging;
    pub use jsoncol_core::{ColumnKind, ColumnSettings, CoreError, Settings};

    #[cfg(feature = "db")]
    pub use jsoncol_db::{
        json_array_column, json_column, ColumnError, DecodeError, FieldDescriptor, FieldType,
        JsonArrayColumn, JsonColumn, JsonColumnOptions, ModelMeta, RawStorage, Record,
        ShapeError, Value,
    };
}
