//! Client-facing result of a generation call.

use serde::{Deserialize, Serialize};

use super::content::{FunctionCall, FunctionResponse};
use super::generation::{FinishReason, UsageMetadata};

/// What a generation call returns to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModelResponse {
    /// Non-empty text parts of every candidate, joined by a blank line.
    pub text: String,
    /// Search grounding of the first candidate.
    pub grounding_detail: Option<GroundingDetail>,
    /// Function calls of the first candidate; `None` when there are none.
    pub function_calls: Option<Vec<FunctionCall>>,
    /// Function responses of the first candidate; `None` when there are none.
    pub function_responses: Option<Vec<FunctionResponse>>,
    /// Why the first candidate stopped.
    pub finish_reason: Option<FinishReason>,
    /// Token accounting.
    pub usage: Option<UsageMetadata>,
    /// Model version that served the call.
    pub model_version: Option<String>,
}

/// Grounding information flattened for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingDetail {
    /// Search widget HTML.
    pub rendered_content_as_html: Option<String>,
    /// Queries the model searched for.
    pub search_suggestions: Option<Vec<String>>,
    /// Supported text segments, most confident first.
    pub reliable_information: Option<Vec<String>>,
    /// Sources the segments were drawn from.
    pub sources: Option<Vec<GroundingSource>>,
}

/// A grounding source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroundingSource {
    /// Site name as reported by search.
    pub domain: String,
    /// Page URL.
    pub url: String,
}
