//! Caller-side inputs for the request builder.

use super::content::{Content, Part, Role};
use super::enums::{MimeType, WireName};

/// One prior message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A model message.
    pub fn model(content: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            content: content.into(),
        }
    }
}

impl From<&ChatMessage> for Content {
    fn from(message: &ChatMessage) -> Self {
        Content::text(message.role, message.content.clone())
    }
}

/// An image sent as inline data with an explicit type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Image media type.
    pub mime_type: MimeType,
    /// Base64 payload without any data-URI prefix.
    pub base64_data: String,
}

impl From<&ImageData> for Part {
    fn from(image: &ImageData) -> Self {
        Part::inline_data(image.mime_type.wire_name(), image.base64_data.clone())
    }
}
