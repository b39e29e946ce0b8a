//! Error types for lp-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

/// Result type alias for lp-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for lp-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or empty storage URI
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// Endpoint URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Catalog root could not be reached
    #[error("Cannot reach catalog: {0}")]
    Connection(String),

    /// No table manifest exists at the catalog root
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidUri(_) => 1,
            Error::InvalidUrl(_) | Error::Connection(_) | Error::TableNotFound(_) => 2,
            Error::Config(_) | Error::Io(_) | Error::TomlParse(_) => 3,
        }
    }
}
