//! Error category types for granular error handling.

use std::time::Duration;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Missing credentials: an API key or a bearer token is required")]
    MissingCredentials,

    #[error("Invalid API key format")]
    InvalidApiKey,

    #[error("Missing bearer credential field: {field}")]
    MissingBearerField { field: String },

    #[error("Invalid base URL: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Resumable upload protocol violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("Upload session URL header `{header}` missing from start response")]
    MissingUploadUrl { header: String },

    #[error("Upload response is missing `{field}`")]
    MissingField { field: String },

    #[error("Malformed {phase} response: {message}")]
    MalformedResponse { phase: String, message: String },
}

/// Network-related errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Request timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Unexpected HTTP status {status} from {operation}: {body}")]
    UnexpectedStatus {
        operation: String,
        status: u16,
        body: String,
    },
}

/// Response parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    #[error("Failed to deserialize response: {message}")]
    DeserializationError { message: String },

    #[error("Failed to serialize request: {message}")]
    SerializationError { message: String },
}

/// Local and remote resource errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {message}")]
    FileReadFailed { path: String, message: String },

    #[error("File processing failed: {file_name} - {message}")]
    FileProcessingFailed { file_name: String, message: String },
}
