//! Core types for the Gemini API.
//!
//! Wire types for the generateContent and file endpoints, the enum registry,
//! and the client-facing result models.

pub mod chat;
pub mod content;
pub mod enums;
pub mod files;
pub mod generation;
pub mod model_response;
pub mod safety;
pub mod tools;

pub use chat::{ChatMessage, ImageData};

pub use content::{Blob, Content, FileData, FunctionCall, FunctionResponse, Part, Role};

pub use enums::{MimeType, ModelVersion, ResponseMimeType, WireName};

pub use files::{File, FileEnvelope, FileHandle, FileState, ListFilesResponse};

pub use generation::{
    ApiRequest, Candidate, FinishReason, GenerateContentResponse, GenerationConfig,
    GroundingChunk, GroundingMetadata, GroundingSupport, RetrievalMetadata, SearchEntryPoint,
    Segment, ThinkingConfig, UsageMetadata, WebSource,
};

pub use model_response::{GroundingDetail, GroundingSource, ModelResponse};

pub use safety::{HarmBlockThreshold, HarmCategory, SafetySetting};

pub use tools::{
    FunctionCallingConfig, FunctionCallingMode, FunctionDeclaration, FunctionParameters,
    GoogleSearch, Tool, ToolConfig, UrlContext,
};
