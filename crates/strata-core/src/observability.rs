//! Observability infrastructure for Strata.
//!
//! Structured logging with consistent spans. This module provides
//! initialization helpers and span constructors used by catalog adapters.

use std::sync::Once;
use tracing::Span;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Log output format.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs (for production).
    Json,
    /// Pretty-printed logs (for development).
    #[default]
    Pretty,
}

/// Initializes the logging subsystem.
///
/// Call once at application startup. Safe to call multiple times;
/// subsequent calls are no-ops.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Controls log levels (e.g., `info`, `strata_hive=debug`)
///
/// # Example
///
/// ```rust
/// use strata_core::observability::{init_logging, LogFormat};
///
/// init_logging(LogFormat::Pretty);
/// ```
pub fn init_logging(format: LogFormat) {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        match format {
            LogFormat::Json => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().json())
                    .init();
            }
            LogFormat::Pretty => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(fmt::layer().pretty())
                    .init();
            }
        }
    });
}

/// Creates a span for catalog operations with standard fields.
///
/// # Example
///
/// ```rust
/// use strata_core::observability::catalog_span;
///
/// let span = catalog_span("load_table", "lake", "hive_cat");
/// let _guard = span.enter();
/// // ... perform the catalog operation
/// ```
#[must_use]
pub fn catalog_span(operation: &str, metalake: &str, catalog: &str) -> Span {
    tracing::info_span!(
        "catalog",
        op = operation,
        metalake = metalake,
        catalog = catalog,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_is_idempotent() {
        init_logging(LogFormat::Pretty);
        init_logging(LogFormat::Pretty);
    }

    #[test]
    fn span_helper_creates_span() {
        let span = catalog_span("create_table", "lake", "hive_cat");
        let _guard = span.enter();
        tracing::info!("test message in span");
    }
}
