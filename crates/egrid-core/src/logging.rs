#![forbid(unsafe_code)]

//! Logging helpers.
//!
//! With the `tracing` feature the usual macros are re-exported so downstream
//! crates can log through `egrid_core` without a direct `tracing`
//! dependency. With `tracing-json`, [`init_json_logging`] installs a global
//! JSON subscriber filtered by the `EGRID_LOG` environment variable
//! (`EnvFilter` syntax, default `warn`).

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span};

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "EGRID_LOG";

/// Install a JSON-formatting global subscriber.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .is_ok()
}
