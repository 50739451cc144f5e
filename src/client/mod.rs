//! Client interface and factory for the Gemini chat client.
//!
//! Provides the `GeminiClient` implementation with a builder, a lazily created
//! file service, and per-conversation generation clients.

mod builder;
mod client;
mod traits;

// Re-export public API
pub use builder::GeminiClientBuilder;
pub use client::{create_client, create_client_from_env, is_valid_api_key, GeminiClientImpl};
pub use traits::GeminiClient;
