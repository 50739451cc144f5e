//! Service implementations for the Gemini API.

pub mod files;
pub mod generation;

pub use files::{FileService, FileUploader};
pub use generation::{CodeAssistClient, ConversationHistory, GenerationClient, GenerationService};
