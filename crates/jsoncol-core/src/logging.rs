//! Logging integration for jsoncol.
//!
//! Column codecs report decode failures as [`tracing`] events. This module
//! installs a subscriber configured from [`Settings`](crate::settings::Settings)
//! and provides the span used around model-level field access.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level` (e.g. "debug", "info", "warn",
/// "error"). In debug mode a pretty, human-readable format is used; otherwise
/// a structured JSON format is used. Installing a second subscriber is a no-op.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for accessing one field of one model.
///
/// # Examples
///
/// ```
/// use jsoncol_core::logging::field_span;
///
/// let span = field_span("article", "meta");
/// let _guard = span.enter();
/// tracing::debug!("reading column");
/// ```
pub fn field_span(model: &str, field: &str) -> tracing::Span {
    tracing::debug_span!("field", model = model, field = field)
}
