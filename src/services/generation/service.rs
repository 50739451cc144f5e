//! Generation client: sends requests, keeps history, maps responses.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::code_assist::{CodeAssistRequest, CodeAssistResponse};
use super::history::ConversationHistory;
use super::mapping::to_model_response;
use super::GenerationService;
use crate::error::{GeminiError, GeminiResult};
use crate::observability::Logger;
use crate::transport::{endpoints, HttpMethod, HttpRequestBuilder, HttpTransport, ResponseParser};
use crate::types::{ApiRequest, Content, GenerateContentResponse, ModelResponse, ModelVersion, WireName};

/// Where a [`GenerationClient`] sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Backend {
    /// `models/{model}:generateContent` of the Gemini API.
    Gemini,
    /// Code Assist `generateContent`, with the request wrapped in a project envelope.
    CodeAssist { project_id: String },
}

impl Backend {
    fn label(&self) -> &'static str {
        match self {
            Backend::Gemini => "gemini",
            Backend::CodeAssist { .. } => "code_assist",
        }
    }
}

/// Sends generateContent requests and optionally carries the conversation.
///
/// History is disabled until [`enable_chat_history`](Self::enable_chat_history)
/// is called. One call at a time per instance.
pub struct GenerationClient {
    transport: Arc<dyn HttpTransport>,
    request_builder: HttpRequestBuilder,
    logger: Arc<dyn Logger>,
    default_timeout: Duration,
    history: Option<ConversationHistory>,
    backend: Backend,
}

impl GenerationClient {
    /// Creates a client with history disabled.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        request_builder: HttpRequestBuilder,
        logger: Arc<dyn Logger>,
        default_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            request_builder,
            logger,
            default_timeout,
            history: None,
            backend: Backend::Gemini,
        }
    }

    pub(super) fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// Starts retaining turns, keeping at most `limit` when given.
    ///
    /// Any previously retained turns are discarded.
    pub fn enable_chat_history(&mut self, limit: Option<usize>) {
        self.history = Some(ConversationHistory::new(limit));
    }

    /// Stops retaining turns and drops the retained ones.
    pub fn disable_chat_history(&mut self) {
        self.history = None;
    }

    /// Retained turns, or `None` while history is disabled.
    pub fn history(&self) -> Option<&[Content]> {
        self.history.as_ref().map(ConversationHistory::turns)
    }

    /// Timeout applied by [`generate_content`](GenerationService::generate_content).
    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Generates content with one of the known model versions.
    pub async fn generate_with_model(
        &mut self,
        request: ApiRequest,
        model: ModelVersion,
    ) -> GeminiResult<ModelResponse> {
        let timeout = self.default_timeout;
        self.execute(request, model.wire_name(), timeout).await
    }

    pub(super) async fn execute(
        &mut self,
        mut request: ApiRequest,
        model_alias: &str,
        timeout: Duration,
    ) -> GeminiResult<ModelResponse> {
        let model_alias = model_alias.trim();
        if model_alias.is_empty() {
            return Err(GeminiError::invalid_argument(
                "model_alias",
                "model alias must not be empty",
            ));
        }

        // The retained, already truncated turns replace the request contents.
        if let Some(history) = self.history.as_mut() {
            history.extend(request.contents.iter().cloned());
            if !history.is_empty() {
                request.contents = history.turns().to_vec();
            }
        }

        self.logger.debug(
            "generateContent started",
            json!({
                "model": model_alias,
                "backend": self.backend.label(),
                "contents_count": request.contents.len(),
                "history_enabled": self.history.is_some(),
                "timeout_ms": timeout.as_millis() as u64,
            }),
        );

        let start = Instant::now();
        match self.send(&request, model_alias, timeout).await {
            Ok(response) => {
                if let Some(history) = self.history.as_mut() {
                    history.extend(response.candidates.iter().filter_map(|c| c.content.clone()));
                }

                let usage = response.usage_metadata.unwrap_or_default();
                self.logger.info(
                    "generateContent completed",
                    json!({
                        "model": model_alias,
                        "duration_ms": start.elapsed().as_millis() as u64,
                        "candidates": response.candidates.len(),
                        "prompt_tokens": usage.prompt_token_count,
                        "candidates_tokens": usage.candidates_token_count,
                        "total_tokens": usage.total_token_count,
                    }),
                );

                Ok(to_model_response(&response))
            }
            Err(error) => {
                if let Some(history) = self.history.as_mut() {
                    history.record_failure(&error.to_string());
                }

                self.logger.error(
                    "generateContent failed",
                    json!({
                        "model": model_alias,
                        "duration_ms": start.elapsed().as_millis() as u64,
                        "error": error.to_string(),
                    }),
                );

                Err(match error {
                    GeminiError::GenerationFailed(_) => error,
                    other => GeminiError::operation_failed(other),
                })
            }
        }
    }

    async fn send(
        &self,
        request: &ApiRequest,
        model_alias: &str,
        timeout: Duration,
    ) -> GeminiResult<GenerateContentResponse> {
        let mut http_request = match &self.backend {
            Backend::Gemini => {
                let path = endpoints::generate_content(model_alias);
                self.request_builder
                    .build_request(HttpMethod::Post, &path, Some(request), None)?
            }
            Backend::CodeAssist { project_id } => {
                let url = self
                    .request_builder
                    .build_method_url(endpoints::CODE_ASSIST_GENERATE)?;
                let envelope = CodeAssistRequest {
                    project: project_id,
                    model: model_alias,
                    request,
                };
                self.request_builder
                    .build_request_for_url(HttpMethod::Post, url, Some(&envelope), None)?
            }
        };
        http_request.timeout = Some(timeout);

        let http_response = self.transport.send(http_request).await?;

        if let Some(request_id) = ResponseParser::extract_request_id(&http_response.headers) {
            self.logger.debug(
                "generateContent response received",
                json!({ "status": http_response.status, "request_id": request_id }),
            );
        }

        match self.backend {
            Backend::Gemini => ResponseParser::parse_generation_response(&http_response),
            Backend::CodeAssist { .. } => {
                ResponseParser::parse_generation_response::<CodeAssistResponse>(&http_response)
                    .map(|envelope| envelope.response)
            }
        }
    }
}

#[async_trait]
impl GenerationService for GenerationClient {
    async fn generate_content(
        &mut self,
        request: ApiRequest,
        model_alias: &str,
    ) -> GeminiResult<ModelResponse> {
        let timeout = self.default_timeout;
        self.execute(request, model_alias, timeout).await
    }

    async fn generate_content_with_timeout(
        &mut self,
        request: ApiRequest,
        model_alias: &str,
        timeout: Duration,
    ) -> GeminiResult<ModelResponse> {
        self.execute(request, model_alias, timeout).await
    }
}
