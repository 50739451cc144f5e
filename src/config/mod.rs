//! Configuration types for the Gemini chat client.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

use crate::auth::looks_like_api_key;
use crate::error::{ConfigurationError, GeminiError};

/// Default Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default API version.
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Default request timeout (120 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default connect timeout (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default delay between activation polls.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// Default ceiling on activation polls.
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 20;

/// Files at least this large are polled until active (10 MiB).
pub const DEFAULT_ACTIVATION_THRESHOLD_BYTES: u64 = 10 * 1024 * 1024;

/// Default admission gate size for batch uploads.
pub const DEFAULT_MAX_CONCURRENT_UPLOADS: usize = 4;

/// How an API key is attached to requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthMethod {
    /// Use ?key= query parameter.
    #[default]
    QueryParam,
    /// Use x-goog-api-key header.
    Header,
}

/// Credentials used for every request of a client.
#[derive(Clone, Debug)]
pub enum Credentials {
    /// API key authentication.
    ApiKey {
        /// The API key.
        key: SecretString,
        /// Where the key is sent.
        method: AuthMethod,
    },
    /// OAuth bearer token plus a project header.
    Bearer {
        /// The bearer token.
        token: SecretString,
        /// Name of the project header, e.g. `x-goog-user-project`.
        project_header: String,
        /// Value sent in the project header.
        project_id: String,
    },
}

impl Credentials {
    fn validate(&self) -> Result<(), ConfigurationError> {
        match self {
            Credentials::ApiKey { key, .. } => {
                if looks_like_api_key(key.expose_secret()) {
                    Ok(())
                } else {
                    Err(ConfigurationError::InvalidApiKey)
                }
            }
            Credentials::Bearer {
                token,
                project_header,
                project_id,
            } => {
                let missing = [
                    ("token", token.expose_secret().as_str()),
                    ("project_header", project_header.as_str()),
                    ("project_id", project_id.as_str()),
                ]
                .into_iter()
                .find(|(_, value)| value.trim().is_empty());

                match missing {
                    Some((field, _)) => Err(ConfigurationError::MissingBearerField {
                        field: field.to_string(),
                    }),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Log level for the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LogLevel {
    /// Error level - only errors.
    Error,
    /// Warning level - errors and warnings.
    Warn,
    /// Info level - general information.
    #[default]
    Info,
    /// Debug level - detailed information.
    Debug,
}

/// File upload behaviour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadConfig {
    /// Delay between activation status polls.
    pub poll_interval: Duration,
    /// Polls attempted before giving up with a timeout.
    pub max_poll_attempts: u32,
    /// Uploads of at least this many bytes wait for activation.
    pub activation_threshold_bytes: u64,
    /// Default admission gate size for batch uploads.
    pub max_concurrent_uploads: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            activation_threshold_bytes: DEFAULT_ACTIVATION_THRESHOLD_BYTES,
            max_concurrent_uploads: DEFAULT_MAX_CONCURRENT_UPLOADS,
        }
    }
}

/// Configuration for the Gemini client.
#[derive(Clone, Debug)]
pub struct GeminiConfig {
    /// Credentials (required).
    pub credentials: Credentials,
    /// Base URL for the API.
    pub base_url: Url,
    /// API version.
    pub api_version: String,
    /// Default timeout for requests.
    pub timeout: Duration,
    /// Connect timeout.
    pub connect_timeout: Duration,
    /// Log level.
    pub log_level: LogLevel,
    /// Upload configuration.
    pub upload: UploadConfig,
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }

    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .map_err(|_| ConfigurationError::MissingCredentials)?;

        let base_url = std::env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let api_version = std::env::var("GEMINI_API_VERSION")
            .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        Self::builder()
            .api_key(SecretString::new(api_key))
            .base_url(&base_url)?
            .api_version(&api_version)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
    }
}

/// Builder for GeminiConfig.
#[derive(Default)]
pub struct GeminiConfigBuilder {
    api_key: Option<SecretString>,
    auth_method: Option<AuthMethod>,
    credentials: Option<Credentials>,
    base_url: Option<Url>,
    api_version: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    log_level: Option<LogLevel>,
    upload: Option<UploadConfig>,
}

impl GeminiConfigBuilder {
    /// Set the API key.
    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    /// Set how the API key is sent.
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Use bearer-token authentication instead of an API key.
    pub fn bearer_token(
        mut self,
        token: SecretString,
        project_header: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::Bearer {
            token,
            project_header: project_header.into(),
            project_id: project_id.into(),
        });
        self
    }

    /// Set the base URL.
    pub fn base_url(mut self, base_url: &str) -> Result<Self, GeminiError> {
        let url = Url::parse(base_url).map_err(|_| ConfigurationError::InvalidBaseUrl {
            url: base_url.to_string(),
        })?;
        self.base_url = Some(url);
        Ok(self)
    }

    /// Set the API version.
    pub fn api_version(mut self, version: &str) -> Self {
        self.api_version = Some(version.to_string());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the log level.
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the upload configuration.
    pub fn upload_config(mut self, config: UploadConfig) -> Self {
        self.upload = Some(config);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<GeminiConfig, GeminiError> {
        // Bearer credentials win over a stray API key.
        let credentials = match (self.credentials, self.api_key) {
            (Some(credentials), _) => credentials,
            (None, Some(key)) => Credentials::ApiKey {
                key: SecretString::new(key.expose_secret().trim().to_string()),
                method: self.auth_method.unwrap_or_default(),
            },
            (None, None) => return Err(ConfigurationError::MissingCredentials.into()),
        };
        credentials.validate()?;

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let upload = self.upload.unwrap_or_default();
        if upload.max_concurrent_uploads == 0 || upload.max_poll_attempts == 0 {
            return Err(ConfigurationError::InvalidConfiguration {
                message: "upload concurrency and poll attempts must be at least 1".to_string(),
            }
            .into());
        }

        Ok(GeminiConfig {
            credentials,
            base_url,
            api_version: self
                .api_version
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            connect_timeout: self
                .connect_timeout
                .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            log_level: self.log_level.unwrap_or_default(),
            upload,
        })
    }
}
