use thiserror::Error;

/// Top-level error type for the Converse system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates define
/// their own error types and convert into `ConverseError` at crate
/// boundaries so that the `?` operator works across the workspace.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConverseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dictation error: {0}")]
    Dictation(String),

    #[error("Exchange error: {0}")]
    Exchange(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for ConverseError {
    fn from(err: toml::de::Error) -> Self {
        ConverseError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ConverseError {
    fn from(err: toml::ser::Error) -> Self {
        ConverseError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ConverseError {
    fn from(err: serde_json::Error) -> Self {
        ConverseError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Converse operations.
pub type Result<T> = std::result::Result<T, ConverseError>;
