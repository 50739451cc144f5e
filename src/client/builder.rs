//! Builder for creating Gemini client instances.

use secrecy::SecretString;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::auth_manager_for;
use crate::config::{AuthMethod, GeminiConfig, GeminiConfigBuilder, LogLevel, UploadConfig};
use crate::error::{GeminiError, NetworkError};
use crate::observability::{Logger, StructuredLogger};
use crate::transport::{HttpRequestBuilder, HttpTransport, ReqwestTransport};

use super::client::GeminiClientImpl;

/// Builder for creating a `GeminiClientImpl` instance.
///
/// # Example
///
/// ```no_run
/// use integrations_gemini_chat::client::GeminiClientBuilder;
/// use secrecy::SecretString;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClientBuilder::new()
///     .api_key(SecretString::new("AIzaSy...".into()))
///     .timeout(Duration::from_secs(60))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct GeminiClientBuilder {
    config: Option<GeminiConfig>,
    config_builder: GeminiConfigBuilder,

    // Injectable dependencies for testing
    transport: Option<Arc<dyn HttpTransport>>,
    logger: Option<Arc<dyn Logger>>,
}

impl GeminiClientBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder from an existing configuration.
    ///
    /// Configuration setters on this builder are ignored afterwards.
    pub fn from_config(config: GeminiConfig) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Sets the API key.
    pub fn api_key(mut self, key: SecretString) -> Self {
        self.config_builder = self.config_builder.api_key(key);
        self
    }

    /// Sets how the API key is sent.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.config_builder = self.config_builder.auth_method(method);
        self
    }

    /// Uses bearer-token authentication with a project header.
    pub fn bearer_token(
        mut self,
        token: SecretString,
        project_header: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        self.config_builder = self
            .config_builder
            .bearer_token(token, project_header, project_id);
        self
    }

    /// Sets the base URL for the API.
    pub fn base_url(mut self, url: &str) -> Result<Self, GeminiError> {
        self.config_builder = self.config_builder.base_url(url)?;
        Ok(self)
    }

    /// Sets the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.config_builder = self.config_builder.api_version(version);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(duration);
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.config_builder = self.config_builder.connect_timeout(duration);
        self
    }

    /// Sets the log level of the default logger.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.config_builder = self.config_builder.log_level(level);
        self
    }

    /// Sets file upload behaviour.
    pub fn upload_config(mut self, config: UploadConfig) -> Self {
        self.config_builder = self.config_builder.upload_config(config);
        self
    }

    /// Sets a custom HTTP transport (for testing).
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets a custom logger (for testing).
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - no credentials were supplied, or the API key is implausible
    /// - configuration values are invalid
    /// - the HTTP transport cannot be created
    pub fn build(self) -> Result<GeminiClientImpl, GeminiError> {
        let config = match self.config {
            Some(config) => config,
            None => self.config_builder.build()?,
        };

        let transport: Arc<dyn HttpTransport> = match self.transport {
            Some(t) => t,
            None => Arc::new(
                ReqwestTransport::new(config.timeout, config.connect_timeout).map_err(|e| {
                    NetworkError::ConnectionFailed {
                        message: format!("Failed to create HTTP transport: {}", e),
                    }
                })?,
            ),
        };

        let request_builder = HttpRequestBuilder::new(
            config.base_url.clone(),
            config.api_version.clone(),
            auth_manager_for(&config.credentials),
        );

        let logger: Arc<dyn Logger> = self.logger.unwrap_or_else(|| {
            Arc::new(StructuredLogger::new("gemini").with_level(config.log_level))
        });

        logger.info(
            "Gemini client initialized",
            serde_json::json!({
                "base_url": config.base_url.as_str(),
                "api_version": config.api_version,
                "timeout_ms": config.timeout.as_millis() as u64,
            }),
        );

        Ok(GeminiClientImpl::from_parts(
            config,
            transport,
            request_builder,
            logger,
        ))
    }
}
