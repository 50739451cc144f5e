//! Content generation service for the Gemini API.

mod code_assist;
mod history;
mod mapping;
mod service;

use async_trait::async_trait;
use std::time::Duration;

use crate::error::GeminiResult;
use crate::types::{ApiRequest, ModelResponse};

pub use code_assist::CodeAssistClient;
pub use history::ConversationHistory;
pub use mapping::to_model_response;
pub use service::GenerationClient;

/// Service for generating content with Gemini models.
///
/// Calls take `&mut self`: an implementation may carry conversation state
/// between calls.
#[async_trait]
pub trait GenerationService: Send {
    /// Sends `request` to `model_alias` with the default timeout.
    async fn generate_content(
        &mut self,
        request: ApiRequest,
        model_alias: &str,
    ) -> GeminiResult<ModelResponse>;

    /// Sends `request` to `model_alias`, giving up after `timeout`.
    async fn generate_content_with_timeout(
        &mut self,
        request: ApiRequest,
        model_alias: &str,
        timeout: Duration,
    ) -> GeminiResult<ModelResponse>;
}
