//! Error types for configuration loading.
//!
//! Synchronization itself never fails: unknown themes fall back to dark mode
//! and images without a template are skipped. Only building a registry or a
//! configuration can go wrong.

use crate::mode::ColorMode;

/// Errors that can occur while building a registry or configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// YAML parse error or unexpected structure.
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Theme names must be non-empty, lower-case and free of whitespace.
    #[error("Invalid theme name '{0}': expected a non-empty lower-case identifier")]
    InvalidThemeName(String),

    /// A theme was registered again with a different mode.
    #[error("Theme '{name}' is already {existing}, cannot register it as {requested}")]
    ConflictingTheme {
        name: String,
        existing: ColorMode,
        requested: ColorMode,
    },

    /// An attribute name in the configuration cannot be used.
    #[error("Invalid {field}: {message}")]
    InvalidAttribute {
        field: &'static str,
        message: String,
    },

    /// A mode string was neither `light` nor `dark`.
    #[error("Unknown color mode '{0}' (expected 'light' or 'dark')")]
    UnknownMode(String),
}
