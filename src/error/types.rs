//! Main error type for the Gemini chat client.

use std::time::Duration;
use thiserror::Error;

use super::categories::*;
use super::mapper::ApiErrorResponse;
use crate::transport::TransportError;

/// Result type alias for Gemini operations.
pub type GeminiResult<T> = Result<T, GeminiError>;

/// Failure payload attached to [`GeminiError::GenerationFailed`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationFailure {
    /// HTTP status of the failed call.
    pub http_status: u16,
    /// Structured payload, parsed from the body or synthesized.
    pub payload: ApiErrorResponse,
    /// Whether `payload` came from the response body.
    pub parsed: bool,
    /// The raw response body.
    pub raw_body: String,
}

impl std::fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let error = &self.payload.error;
        write!(f, "{} ({}): {}", error.status, error.code, error.message)
    }
}

/// Top-level error type for the integration.
#[derive(Error, Debug, Clone)]
pub enum GeminiError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Invalid argument `{parameter}`: {message}")]
    InvalidArgument { parameter: String, message: String },

    #[error("Value out of range for `{parameter}`: {message}")]
    OutOfRange { parameter: String, message: String },

    #[error("Invalid operation: {message}")]
    InvalidOperation { message: String },

    #[error("Protocol violation: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Generation failed: {0}")]
    GenerationFailed(Box<GenerationFailure>),

    #[error("{operation} timed out after {attempts} attempts")]
    Timeout { operation: String, attempts: u32 },

    #[error("{operation} was cancelled")]
    Cancelled { operation: String },

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Response error: {0}")]
    Response(#[from] ResponseError),

    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),

    #[error("Operation failed: {message}")]
    OperationFailed {
        message: String,
        #[source]
        source: Box<GeminiError>,
    },
}

impl GeminiError {
    /// Shorthand for an `InvalidArgument` error.
    pub fn invalid_argument(parameter: &str, message: impl Into<String>) -> Self {
        GeminiError::InvalidArgument {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for an `OutOfRange` error.
    pub fn out_of_range(parameter: &str, message: impl Into<String>) -> Self {
        GeminiError::OutOfRange {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    /// Wraps `cause` into `OperationFailed`, keeping its message.
    pub fn operation_failed(cause: GeminiError) -> Self {
        GeminiError::OperationFailed {
            message: cause.to_string(),
            source: Box::new(cause),
        }
    }

    /// Returns the structured failure payload, looking through `OperationFailed`.
    pub fn failure(&self) -> Option<&GenerationFailure> {
        match self {
            GeminiError::GenerationFailed(failure) => Some(failure),
            GeminiError::OperationFailed { source, .. } => source.failure(),
            _ => None,
        }
    }

    /// Returns the innermost error of an `OperationFailed` chain.
    pub fn root_cause(&self) -> &GeminiError {
        match self {
            GeminiError::OperationFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl From<TransportError> for GeminiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { duration } => {
                GeminiError::Network(NetworkError::Timeout { duration })
            }
            other => GeminiError::Network(NetworkError::ConnectionFailed {
                message: other.to_string(),
            }),
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GeminiError::Network(NetworkError::Timeout {
                duration: Duration::from_secs(0), // Unknown actual duration
            })
        } else {
            GeminiError::Network(NetworkError::ConnectionFailed {
                message: err.to_string(),
            })
        }
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::Response(ResponseError::DeserializationError {
            message: err.to_string(),
        })
    }
}

impl From<url::ParseError> for GeminiError {
    fn from(err: url::ParseError) -> Self {
        GeminiError::Configuration(ConfigurationError::InvalidBaseUrl {
            url: err.to_string(),
        })
    }
}
