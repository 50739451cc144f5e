//! # Gemini Chat Client
//!
//! Rust client for the Google Gemini generateContent and file APIs, focused on
//! conversational use.
//!
//! ## Features
//!
//! - Fluent, validating request assembly (prompt, history, images, uploaded
//!   files, structured output, function calling, search grounding)
//! - Generation client with bounded conversation history and typed results
//!   (text, grounding detail, function calls)
//! - Resumable file upload with activation polling, deduplication by display
//!   name and bounded-concurrency batches
//! - Gemini Code Assist generation and privacy setting over a bearer token
//! - Live API-key validation on top of a local format check
//! - API-key or bearer-token authentication with `SecretString`
//! - Structured, redacting logging on top of `tracing`
//! - Mock transport and JSON fixtures for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use integrations_gemini_chat::{create_client, GeminiConfig, ModelVersion};
//! use integrations_gemini_chat::request::RequestBuilder;
//! use secrecy::SecretString;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = GeminiConfig::builder()
//!         .api_key(SecretString::new("AIzaSy...".into()))
//!         .build()?;
//!     let client = create_client(config)?;
//!
//!     let mut chat = client.generator();
//!     chat.enable_chat_history(Some(10));
//!
//!     let request = RequestBuilder::new()
//!         .with_prompt("Name three Norwegian fjords.")?
//!         .with_default_generation_config()
//!         .build()?;
//!     let reply = chat.generate_with_model(request, ModelVersion::Gemini20Flash).await?;
//!     println!("{}", reply.text);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `client` - Main client interface and factory functions
//! - `config` - Configuration types and builder
//! - `auth` - API key and bearer-token authentication
//! - `transport` - HTTP transport layer
//! - `error` - Error types and taxonomy
//! - `types` - Wire types, enum registry and result models
//! - `request` - Request and tool builders
//! - `services` - Generation and file services

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod observability;
pub mod request;
pub mod services;
pub mod transport;
pub mod types;

// Development/testing modules - always available for integration tests
pub mod fixtures;
pub mod mocks;

// Re-exports for convenience
pub use auth::{ApiKeyAuthManager, AuthManager, BearerAuthManager};
pub use client::{
    create_client, create_client_from_env, is_valid_api_key, GeminiClient, GeminiClientBuilder,
    GeminiClientImpl,
};
pub use config::{
    AuthMethod, Credentials, GeminiConfig, GeminiConfigBuilder, LogLevel, UploadConfig,
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
pub use error::{
    // Main error types
    GeminiError,
    GeminiResult,
    GenerationFailure,
    // Error categories
    ConfigurationError,
    NetworkError,
    ProtocolError,
    ResourceError,
    ResponseError,
    // Failure payloads
    ApiErrorDetail,
    ApiErrorResponse,
};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

// Type re-exports
pub use types::{
    // Content types
    Blob, ChatMessage, Content, FileData, FunctionCall, FunctionResponse, ImageData, Part, Role,
    // Registry
    MimeType, ModelVersion, ResponseMimeType, WireName,
    // Safety types
    HarmBlockThreshold, HarmCategory, SafetySetting,
    // Generation types
    ApiRequest, Candidate, FinishReason, GenerateContentResponse, GenerationConfig,
    GroundingMetadata, ThinkingConfig, UsageMetadata,
    // Tool types
    FunctionCallingMode, FunctionDeclaration, FunctionParameters, Tool, ToolConfig,
    // File types
    File, FileHandle, FileState, ListFilesResponse,
    // Results
    GroundingDetail, GroundingSource, ModelResponse,
};

pub use request::{RequestBuilder, ToolBuilder};

// Service re-exports
pub use services::{
    CodeAssistClient, ConversationHistory, FileService, FileUploader, GenerationClient,
    GenerationService,
};

// Observability re-exports
pub use observability::{DefaultLogger, Logger, StructuredLogger};
