//! Error types for sinoscreen

/// Result type alias using sinoscreen's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for sinoscreen operations.
///
/// There is deliberately no per-record classification error: classification
/// is total over its input domain and degrades to a `not_detected` verdict.
/// Errors can only arise while loading and compiling configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid indicator or exclusion definitions
    #[error("configuration error: {0}")]
    Config(String),

    /// IO errors while reading configuration files
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
