//! Content generation types for the Gemini API.
//!
//! This module contains the outbound request payload and the success body of
//! the generateContent endpoint.

use serde::{Deserialize, Serialize};

use super::content::Content;
use super::enums::ResponseMimeType;
use super::safety::SafetySetting;
use super::tools::{Tool, ToolConfig};
use crate::error::{GeminiError, GeminiResult};

/// Lowest accepted sampling temperature.
pub const MIN_TEMPERATURE: f32 = 0.0;

/// Highest accepted sampling temperature.
pub const MAX_TEMPERATURE: f32 = 2.0;

/// Configuration for content generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// The temperature for sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// The nucleus sampling probability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    /// The top-k sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    /// The maximum number of tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
    /// Sequences that will stop generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,
    /// The MIME type of the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<ResponseMimeType>,
    /// The schema for the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
    /// Reasoning budget.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thinking_config: Option<ThinkingConfig>,
}

impl GenerationConfig {
    /// Sampling-only configuration.
    pub fn sampling(temperature: f32, max_output_tokens: i32) -> Self {
        Self {
            temperature: Some(temperature),
            max_output_tokens: Some(max_output_tokens),
            ..Self::default()
        }
    }

    /// Range-checks the sampling parameters.
    pub fn validate(&self) -> GeminiResult<()> {
        if let Some(temperature) = self.temperature {
            if !(MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&temperature) {
                return Err(GeminiError::out_of_range(
                    "temperature",
                    format!(
                        "must be between {MIN_TEMPERATURE:.1} and {MAX_TEMPERATURE:.1}, got {temperature}"
                    ),
                ));
            }
        }

        if let Some(max_output_tokens) = self.max_output_tokens {
            if max_output_tokens < 1 {
                return Err(GeminiError::out_of_range(
                    "max_output_tokens",
                    format!("must be at least 1, got {max_output_tokens}"),
                ));
            }
        }

        Ok(())
    }
}

/// Reasoning configuration for thinking models.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    /// Token budget; `0` disables thinking and `-1` lets the model decide.
    pub thinking_budget: i32,
}

/// The outbound generateContent payload.
///
/// Produced by [`RequestBuilder::build`](crate::request::RequestBuilder::build)
/// and consumed by a single call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub(crate) contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) safety_settings: Option<Vec<SafetySetting>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) tool_config: Option<ToolConfig>,
}

impl ApiRequest {
    /// Conversation contents, in send order.
    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    /// System instruction, if any.
    pub fn system_instruction(&self) -> Option<&Content> {
        self.system_instruction.as_ref()
    }

    /// Generation configuration, if any.
    pub fn generation_config(&self) -> Option<&GenerationConfig> {
        self.generation_config.as_ref()
    }

    /// Safety settings, if any.
    pub fn safety_settings(&self) -> Option<&[SafetySetting]> {
        self.safety_settings.as_deref()
    }

    /// Tool list, if any.
    pub fn tools(&self) -> Option<&[Tool]> {
        self.tools.as_deref()
    }

    /// Tool invocation configuration, if any.
    pub fn tool_config(&self) -> Option<&ToolConfig> {
        self.tool_config.as_ref()
    }
}

/// The reason why content generation finished.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Natural stop point.
    Stop,
    /// Maximum token limit reached.
    MaxTokens,
    /// Safety threshold triggered.
    Safety,
    /// Content recitation detected.
    Recitation,
    /// Prohibited content detected.
    ProhibitedContent,
    /// The model produced an invalid function call.
    MalformedFunctionCall,
    /// Any other reason.
    #[serde(other)]
    Other,
}

/// Metadata about token usage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Number of tokens in the prompt.
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Number of tokens in the candidates.
    #[serde(default)]
    pub candidates_token_count: u32,
    /// Number of reasoning tokens.
    #[serde(default)]
    pub thoughts_token_count: u32,
    /// Total number of tokens.
    #[serde(default)]
    pub total_token_count: u32,
}

/// Search grounding information attached to a candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    /// Rendered search widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_entry_point: Option<SearchEntryPoint>,
    /// Web search queries used for grounding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_search_queries: Option<Vec<String>>,
    /// Sources retrieved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
    /// Text segments backed by the sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_supports: Option<Vec<GroundingSupport>>,
    /// Dynamic retrieval score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retrieval_metadata: Option<RetrievalMetadata>,
}

/// Search entry point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchEntryPoint {
    /// HTML/CSS snippet to embed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rendered_content: Option<String>,
}

/// One retrieved source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GroundingChunk {
    /// Web source, when the chunk came from search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

/// A web page used for grounding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WebSource {
    /// Page URI.
    #[serde(default)]
    pub uri: String,
    /// Page title, usually the domain.
    #[serde(default)]
    pub title: String,
}

/// A response segment with its supporting chunks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GroundingSupport {
    /// The supported text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<Segment>,
    /// Indices into `grounding_chunks`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunk_indices: Option<Vec<u32>>,
    /// One confidence score per chunk index.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_scores: Option<Vec<f64>>,
}

impl GroundingSupport {
    /// Highest confidence score, if any score is present.
    pub fn max_confidence(&self) -> Option<f64> {
        self.confidence_scores
            .as_ref()?
            .iter()
            .copied()
            .max_by(f64::total_cmp)
    }
}

/// A span of the response text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    /// Start offset in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<u32>,
    /// End offset in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<u32>,
    /// The text of the span.
    #[serde(default)]
    pub text: String,
}

/// Retrieval score metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct RetrievalMetadata {
    /// Likelihood that search helped the answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_search_dynamic_retrieval_score: Option<f64>,
}

/// A candidate response from the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of the candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// The reason generation finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Grounding metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_metadata: Option<GroundingMetadata>,
    /// The index of this candidate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

/// Success body of the generateContent endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// The candidate responses.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Usage metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    /// The version of the model used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}
