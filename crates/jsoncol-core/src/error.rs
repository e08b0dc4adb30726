//! Core error types for jsoncol.
//!
//! [`CoreError`] covers the failures that can happen outside of a single
//! column read or write: reading and parsing settings files, and column
//! declarations that cannot work. Column-level errors live in `jsoncol-db`.

use thiserror::Error;

/// The error type for settings, configuration, and IO failures.
#[derive(Error, Debug)]
pub enum CoreError {
    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A column or model is declared in a way that cannot work.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CoreError {
    /// Returns `true` for errors caused by the configuration itself rather
    /// than by the environment (missing files, permissions).
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationError(_) | Self::ImproperlyConfigured(_)
        )
    }
}

/// A convenience type alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;
