//! Client trait definitions for the Gemini chat client.

use crate::config::GeminiConfig;
use crate::services::{FileService, GenerationClient};

/// Entry point bundling configuration, transport and authentication.
pub trait GeminiClient: Send + Sync {
    /// Access the file upload service, shared by every caller of this client.
    fn files(&self) -> &dyn FileService;

    /// Creates a generation client with its own, initially disabled, history.
    fn generator(&self) -> GenerationClient;

    /// The configuration the client was built with.
    fn config(&self) -> &GeminiConfig;
}
