//! File-related types for the Gemini API.
//!
//! This module contains types for working with files in Gemini's file service.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// A file as reported by the file service, with every field optional.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct File {
    /// The resource name of the file, `files/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The display name of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// The MIME type of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// The size of the file in bytes, as a decimal string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<String>,
    /// The creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// The expiration time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    /// The URI of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// The state of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<FileState>,
}

/// `{"file": {...}}` wrapper used by upload and status responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEnvelope {
    /// The wrapped file.
    pub file: File,
}

/// The processing state of a file.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    /// File is being processed.
    Processing,
    /// File is active and ready to use.
    Active,
    /// File processing failed.
    Failed,
    /// State not reported, or a state this client does not know.
    #[default]
    #[serde(other)]
    StateUnspecified,
}

/// Server-assigned reference to an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileHandle {
    /// Resource name, `files/{id}`.
    pub name: String,
    /// URI to reference from requests.
    pub uri: String,
    /// The display name.
    pub display_name: Option<String>,
    /// The MIME type.
    pub mime_type: Option<String>,
    /// Size in bytes.
    pub size_bytes: Option<u64>,
    /// Activation state.
    pub state: FileState,
}

impl FileHandle {
    /// Whether the file can be referenced from a request.
    pub fn is_active(&self) -> bool {
        self.state == FileState::Active
    }
}

impl TryFrom<File> for FileHandle {
    type Error = ProtocolError;

    fn try_from(file: File) -> Result<Self, Self::Error> {
        let name = file.name.ok_or_else(|| ProtocolError::MissingField {
            field: "file.name".to_string(),
        })?;
        let uri = file.uri.ok_or_else(|| ProtocolError::MissingField {
            field: "file.uri".to_string(),
        })?;

        Ok(Self {
            name,
            uri,
            display_name: file.display_name,
            mime_type: file.mime_type,
            size_bytes: file.size_bytes.and_then(|s| s.parse().ok()),
            state: file.state.unwrap_or_default(),
        })
    }
}

/// Response from listing files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResponse {
    /// The list of files.
    #[serde(default)]
    pub files: Vec<File>,
    /// Token for the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_handle_from_complete_file() {
        let envelope: FileEnvelope = serde_json::from_value(json!({
            "file": {
                "name": "files/abc123",
                "displayName": "notes.txt",
                "mimeType": "text/plain",
                "sizeBytes": "201",
                "uri": "https://generativelanguage.googleapis.com/v1beta/files/abc123",
                "state": "ACTIVE"
            }
        }))
        .unwrap();

        let handle = FileHandle::try_from(envelope.file).unwrap();
        assert_eq!(handle.name, "files/abc123");
        assert_eq!(handle.size_bytes, Some(201));
        assert!(handle.is_active());
    }

    #[test]
    fn test_handle_requires_uri() {
        let file = File {
            name: Some("files/abc123".to_string()),
            ..File::default()
        };

        assert_eq!(
            FileHandle::try_from(file),
            Err(ProtocolError::MissingField {
                field: "file.uri".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_state_is_unspecified() {
        let file: File = serde_json::from_value(json!({"state": "ARCHIVED"})).unwrap();
        assert_eq!(file.state, Some(FileState::StateUnspecified));
    }
}
