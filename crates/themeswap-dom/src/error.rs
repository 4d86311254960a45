//! Error types for building documents.

/// Errors that can occur while loading a document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The page fixture is not valid YAML or has the wrong shape.
    #[error("Failed to parse page fixture: {0}")]
    Parse(#[from] serde_yaml::Error),
}
