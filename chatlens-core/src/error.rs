//! Error types for chatlens-core

use thiserror::Error;

/// Main error type for the chatlens-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A timestamp matched the grammar but its fields do not form a valid
    /// calendar date or time. This aborts the whole parse.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Path failed structural validation
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for chatlens-core
pub type Result<T> = std::result::Result<T, Error>;
