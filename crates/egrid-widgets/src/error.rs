#![forbid(unsafe_code)]

//! Error types.
//!
//! Geometry lookups are not errors: a stale or out-of-range index yields
//! `None` and the caller treats it as a no-op.

use std::fmt;

/// Errors raised while constructing or reconfiguring a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid was built without an explorer context.
    MissingContext,
    /// Layout parameters cannot produce a grid.
    InvalidLayout(String),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContext => f.write_str("explorer grid requires an explorer context"),
            Self::InvalidLayout(reason) => write!(f, "invalid grid layout: {reason}"),
        }
    }
}

impl std::error::Error for GridError {}

/// A host platform call failed (opening files, revealing paths).
///
/// These never propagate out of the grid: the dispatcher turns them into an
/// error toast and carries on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    message: String,
}

impl PlatformError {
    /// Create a platform error with a human-readable message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The message shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PlatformError {}

/// Errors raised while loading a [`GridConfig`](crate::config::GridConfig).
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
