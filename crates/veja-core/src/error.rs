//! Error types for the MiraVeja metadata pipeline.

use thiserror::Error;

/// Result type alias using the pipeline's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for registry and configuration operations.
///
/// The extraction pipeline itself never surfaces these for malformed image
/// input; container and text parsing degrade to defaults instead. Errors
/// exist at the registry collaborator boundary and in configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource not found (unknown model version, no usable hash)
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
