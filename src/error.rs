//! Error types for the aquifer service.

use thiserror::Error;

/// Main error type for aquifer operations.
#[derive(Error, Debug)]
pub enum AquiferError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Capability error: {0}")]
    Capability(#[from] CapabilityError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Errors from the external language capabilities (normalize, generate,
/// explain, format). The pipeline treats a timeout the same as any other
/// capability failure.
#[derive(Error, Debug)]
pub enum CapabilityError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Rate limited")]
    RateLimited,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Errors from the relational store. Queries here are read-only, so these
/// are purely propagation: nothing is ever partially applied.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),
}

/// Result type alias for aquifer operations.
pub type Result<T> = std::result::Result<T, AquiferError>;
