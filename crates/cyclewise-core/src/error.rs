//! Core error types for cyclewise-core.
//!
//! Only configuration, knowledge loading and request validation surface to
//! callers. Generation and parse failures have their own module-local types
//! ([`crate::generator::GenerationError`], [`crate::resolver::ParseError`])
//! and are always recovered inside the engine.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cyclewise-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Knowledge base loading errors
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Home/config directory could not be prepared
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading a knowledge file at startup.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// File could not be read
    #[error("Failed to read knowledge file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not valid TOML, or a phase table is missing or malformed
    #[error("Failed to parse knowledge file: {0}")]
    ParseFailed(#[from] toml::de::Error),
}

/// Caller-facing input validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Task text is empty or whitespace
    #[error("task must not be empty")]
    EmptyTask,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
