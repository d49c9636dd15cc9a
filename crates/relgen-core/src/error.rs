use thiserror::Error;

/// Core error type shared across relgen crates.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration; raised before any catalog call.
    #[error("configuration error: {0}")]
    Config(String),
    /// Catalog introspection failed or returned malformed metadata.
    #[error("introspection error: {0}")]
    Introspection(String),
    /// The extracted declarations violate internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// A requested engine or feature is not supported.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

/// Convenience alias for results returned by relgen crates.
pub type Result<T> = std::result::Result<T, Error>;
