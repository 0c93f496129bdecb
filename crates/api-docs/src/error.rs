//! Error types for `skybridge-api-docs`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiDocsError {
    /// Configuration errors (invalid patterns, missing fields).
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Spec parsing errors.
    #[error("Failed to parse OpenAPI spec '{location}': {message}")]
    SpecParse { location: String, message: String },
}

/// Result type alias for documentation-config operations.
pub type Result<T> = std::result::Result<T, ApiDocsError>;
