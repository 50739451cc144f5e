//! Failure-body parsing for the generation endpoint.

use serde::{Deserialize, Serialize};

use super::types::{GeminiError, GenerationFailure};

/// Structured failure body returned by the API: `{"error": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorResponse {
    /// The error payload.
    pub error: ApiErrorDetail,
}

/// Detailed error information from the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorDetail {
    /// HTTP-like numeric code.
    pub code: i32,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Canonical status string such as `RESOURCE_EXHAUSTED`.
    #[serde(default)]
    pub status: String,
    /// Optional typed details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ErrorDetail>>,
}

/// One entry of the `details` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetail {
    /// Type URL of the detail message.
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub type_url: Option<String>,
    /// Field-level violations for bad requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_violations: Option<Vec<FieldViolation>>,
    /// Free-form reason, present on some detail types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A violation tied to a request field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldViolation {
    /// Path of the offending field.
    #[serde(default)]
    pub field: String,
    /// What is wrong with it.
    #[serde(default)]
    pub description: String,
}

impl ApiErrorResponse {
    /// Builds a substitute payload when the body could not be parsed.
    pub fn synthesized(status: u16, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                code: i32::from(status),
                message: message.into(),
                status: String::new(),
                details: None,
            },
        }
    }
}

/// Classifies a non-success generation response into `GeminiError::GenerationFailed`.
///
/// A parseable `{"error": {...}}` body is carried as-is; anything else is
/// replaced by a payload synthesized from the HTTP status and the parse error.
pub fn map_generation_failure(status: u16, body: &[u8]) -> GeminiError {
    let raw_body = String::from_utf8_lossy(body).to_string();

    let (payload, parsed) = match serde_json::from_slice::<ApiErrorResponse>(body) {
        Ok(payload) => (payload, true),
        Err(e) => (ApiErrorResponse::synthesized(status, e.to_string()), false),
    };

    tracing::debug!(
        status = status,
        parsed = parsed,
        api_status = %payload.error.status,
        "Generation endpoint returned failure"
    );

    GeminiError::GenerationFailed(Box::new(GenerationFailure {
        http_status: status,
        payload,
        parsed,
        raw_body,
    }))
}
