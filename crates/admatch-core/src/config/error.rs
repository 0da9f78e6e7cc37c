//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric environment variable could not be parsed.
    #[error("failed to parse {name} '{value}': {source}")]
    NumberParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The ad-id namespace is not a valid UUID.
    #[error("failed to parse ad-id namespace '{value}': {source}")]
    InvalidNamespace {
        value: String,
        #[source]
        source: uuid::Error,
    },

    /// Embedding dimension must be positive.
    #[error("embedding dimension must be greater than zero")]
    InvalidDimension,

    /// Ingest batch size must be positive.
    #[error("max batch size must be greater than zero")]
    InvalidBatchSize,

    /// Collection name must contain non-whitespace characters.
    #[error("collection name must not be empty")]
    EmptyCollectionName,
}
