//! # jsoncol-core
//!
//! Error types, settings, and logging setup shared by the jsoncol crates.
//! This crate knows nothing about columns or records.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Settings and declarative column options
//! - [`settings_loader`] - Loading settings from TOML/JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{CoreError, CoreResult};
pub use settings::{ColumnKind, ColumnSettings, Settings};
