use jubilee_core::error::JubileeError;

/// Errors from the wish-generation provider.
///
/// Callers are expected to recover from every variant by falling back to
/// the canned template; none of these ever reaches an end user.
#[derive(Debug, thiserror::Error)]
pub enum WishError {
    #[error("API key environment variable {0} is not set")]
    MissingApiKey(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("provider returned status {0}")]
    BadStatus(u16),
    #[error("provider returned no text")]
    EmptyResponse,
    #[error("request timed out after {0} seconds")]
    Timeout(u64),
}

impl From<WishError> for JubileeError {
    fn from(err: WishError) -> Self {
        JubileeError::Provider(err.to_string())
    }
}
