use thiserror::Error;

/// Top-level error type for the Jubilee system.
///
/// Subsystem crates define their own error types and implement
/// `From<SubsystemError> for JubileeError` so that the `?` operator works
/// across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum JubileeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Wish provider error: {0}")]
    Provider(String),

    #[error("Agent error: {0}")]
    Agent(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for JubileeError {
    fn from(err: toml::de::Error) -> Self {
        JubileeError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for JubileeError {
    fn from(err: toml::ser::Error) -> Self {
        JubileeError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for JubileeError {
    fn from(err: serde_json::Error) -> Self {
        JubileeError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Jubilee operations.
pub type Result<T> = std::result::Result<T, JubileeError>;
