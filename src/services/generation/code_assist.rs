//! Generation through the Gemini Code Assist backend.
//!
//! Code Assist speaks the same generateContent payload, wrapped in an envelope
//! naming the Cloud project and model, and authenticates with an OAuth bearer
//! token instead of an API key. Only the 2.5 models are served there.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::service::{Backend, GenerationClient};
use crate::auth::BearerAuthManager;
use crate::error::{GeminiError, GeminiResult};
use crate::observability::Logger;
use crate::transport::{endpoints, HttpMethod, HttpRequestBuilder, HttpTransport, ResponseParser};
use crate::types::{ApiRequest, Content, GenerateContentResponse, ModelResponse, ModelVersion, WireName};

/// Request body of the Code Assist generateContent method.
#[derive(Debug, Serialize)]
pub(super) struct CodeAssistRequest<'a> {
    pub(super) project: &'a str,
    pub(super) model: &'a str,
    pub(super) request: &'a ApiRequest,
}

/// Success body of the Code Assist generateContent method.
#[derive(Debug, Deserialize)]
pub(super) struct CodeAssistResponse {
    #[serde(default)]
    pub(super) response: GenerateContentResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserSettingRequest<'a> {
    cloudaicompanion_project: &'a str,
    free_tier_data_collection_optin: bool,
}

/// Conversation client for Gemini Code Assist.
///
/// History behaves exactly as on [`GenerationClient`]: disabled until enabled,
/// bounded by the optional limit, and sent in place of the request contents.
pub struct CodeAssistClient {
    generator: GenerationClient,
    transport: Arc<dyn HttpTransport>,
    request_builder: HttpRequestBuilder,
    logger: Arc<dyn Logger>,
    project_id: String,
}

impl CodeAssistClient {
    /// Creates a client for `project_id` authenticated with `token`.
    ///
    /// `base_url` is normally [`endpoints::CODE_ASSIST_BASE_URL`].
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        logger: Arc<dyn Logger>,
        base_url: Url,
        project_id: &str,
        token: SecretString,
        timeout: Duration,
    ) -> GeminiResult<Self> {
        let project_id = project_id.trim();
        if project_id.is_empty() {
            return Err(GeminiError::invalid_argument(
                "project_id",
                "a Cloud project ID is required",
            ));
        }

        let request_builder = HttpRequestBuilder::new(
            base_url,
            endpoints::CODE_ASSIST_API_VERSION.to_string(),
            Arc::new(BearerAuthManager::token_only(token)),
        );
        let generator = GenerationClient::new(
            Arc::clone(&transport),
            request_builder.clone(),
            Arc::clone(&logger),
            timeout,
        )
        .with_backend(Backend::CodeAssist {
            project_id: project_id.to_string(),
        });

        Ok(Self {
            generator,
            transport,
            request_builder,
            logger,
            project_id: project_id.to_string(),
        })
    }

    /// The Cloud project requests are billed to.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Starts retaining turns, keeping at most `limit` when given.
    pub fn enable_chat_history(&mut self, limit: Option<usize>) {
        self.generator.enable_chat_history(limit);
    }

    /// Stops retaining turns and drops the retained ones.
    pub fn disable_chat_history(&mut self) {
        self.generator.disable_chat_history();
    }

    /// Retained turns, or `None` while history is disabled.
    pub fn history(&self) -> Option<&[Content]> {
        self.generator.history()
    }

    /// Generates content with Gemini 2.5 Flash or Gemini 2.5 Pro.
    ///
    /// Any other model is rejected before a request is made.
    pub async fn generate_content(
        &mut self,
        request: ApiRequest,
        model: ModelVersion,
    ) -> GeminiResult<ModelResponse> {
        if !matches!(model, ModelVersion::Gemini25Flash | ModelVersion::Gemini25Pro) {
            return Err(GeminiError::invalid_argument(
                "model",
                format!(
                    "{} is not served by Code Assist; use gemini-2.5-flash or gemini-2.5-pro",
                    model.wire_name()
                ),
            ));
        }

        let timeout = self.generator.default_timeout();
        self.generator.execute(request, model.wire_name(), timeout).await
    }

    /// Opts the project in or out of free-tier data collection.
    pub async fn set_privacy_setting(&self, enable_data_collection: bool) -> GeminiResult<()> {
        let url = self
            .request_builder
            .build_method_url(endpoints::CODE_ASSIST_USER_SETTING)?;
        let body = UserSettingRequest {
            cloudaicompanion_project: &self.project_id,
            free_tier_data_collection_optin: enable_data_collection,
        };
        let request =
            self.request_builder
                .build_request_for_url(HttpMethod::Post, url, Some(&body), None)?;

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ResponseParser::unexpected_status(&response, "set privacy setting"));
        }

        self.logger.info(
            "Code Assist privacy setting updated",
            json!({
                "project": self.project_id,
                "data_collection": enable_data_collection,
            }),
        );
        Ok(())
    }
}

impl std::fmt::Debug for CodeAssistClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeAssistClient")
            .field("project_id", &self.project_id)
            .finish_non_exhaustive()
    }
}
