// Error types for webdriver-proxy

use thiserror::Error;

/// Result type alias for webdriver-proxy operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building or reading proxy settings
#[derive(Debug, Error)]
pub enum Error {
    /// Mutation rejected because the proxy type is already locked
    ///
    /// Raised when a setter belonging to one proxy type is called on a proxy
    /// locked to another, or when the proxy type is set a second time.
    /// The proxy is left exactly as it was before the call.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// `proxyType` token that names no known proxy type
    #[error("Unknown proxy type: '{0}'")]
    UnknownProxyType(String),

    /// A known key holds a value of the wrong JSON type
    #[error("Invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: &'static str },

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }
}
