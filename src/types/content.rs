//! Content-related types for the Gemini API.
//!
//! A [`Content`] is one conversational turn; its [`Part`]s carry exactly one
//! kind of payload each.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A part of a content message.
///
/// Each part carries exactly one payload kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
    /// Inline binary data.
    InlineData {
        /// The inline data blob.
        #[serde(rename = "inline_data", alias = "inlineData")]
        inline_data: Blob,
    },
    /// Reference to an uploaded file.
    FileData {
        /// The file data reference.
        #[serde(rename = "file_data", alias = "fileData")]
        file_data: FileData,
    },
    /// A function call.
    FunctionCall {
        /// The function call details.
        #[serde(rename = "functionCall", alias = "function_call")]
        function_call: FunctionCall,
    },
    /// A function response.
    FunctionResponse {
        /// The function response details.
        #[serde(rename = "functionResponse", alias = "function_response")]
        function_response: FunctionResponse,
    },
}

impl Part {
    /// Text part.
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Inline base64 data part.
    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Part::InlineData {
            inline_data: Blob {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    /// File reference part.
    pub fn file_data(mime_type: impl Into<String>, file_uri: impl Into<String>) -> Self {
        Part::FileData {
            file_data: FileData {
                mime_type: Some(mime_type.into()),
                file_uri: file_uri.into(),
            },
        }
    }

    /// Returns the text payload, if this is a text part.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns the function call payload, if any.
    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Part::FunctionCall { function_call } => Some(function_call),
            _ => None,
        }
    }

    /// Returns the function response payload, if any.
    pub fn as_function_response(&self) -> Option<&FunctionResponse> {
        match self {
            Part::FunctionResponse { function_response } => Some(function_response),
            _ => None,
        }
    }
}

impl From<FunctionCall> for Part {
    fn from(function_call: FunctionCall) -> Self {
        Part::FunctionCall { function_call }
    }
}

impl From<FunctionResponse> for Part {
    fn from(function_response: FunctionResponse) -> Self {
        Part::FunctionResponse { function_response }
    }
}

/// Binary data blob with MIME type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blob {
    /// The MIME type of the data.
    #[serde(rename = "mime_type", alias = "mimeType")]
    pub mime_type: String,
    /// Base64-encoded binary data.
    pub data: String,
}

/// Reference to a file stored in Gemini's file service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileData {
    /// The MIME type of the file.
    #[serde(
        rename = "mime_type",
        alias = "mimeType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mime_type: Option<String>,
    /// The URI of the file.
    #[serde(rename = "file_uri", alias = "fileUri")]
    pub file_uri: String,
}

/// A function call requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    /// The name of the function to call.
    pub name: String,
    /// The arguments, as a JSON object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<serde_json::Value>,
}

impl FunctionCall {
    /// Reads one named argument, converting it to `T`.
    ///
    /// Returns `None` when the argument is absent or has an incompatible shape.
    pub fn arg<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let value = self.args.as_ref()?.get(name)?;
        serde_json::from_value(value.clone()).ok()
    }
}

/// A function result sent back to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionResponse {
    /// The name of the function that was called.
    pub name: String,
    /// The response data from the function.
    pub response: serde_json::Value,
}

impl FunctionResponse {
    /// Wraps a textual result as `{"output": ...}`.
    pub fn from_output(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            response: serde_json::json!({ "output": output.into() }),
        }
    }
}

/// A content message with a role and parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Content {
    /// The role of the content author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// The parts of the content.
    #[serde(default, deserialize_with = "deserialize_parts")]
    pub parts: Vec<Part>,
}

impl Content {
    /// A user turn.
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::User),
            parts,
        }
    }

    /// A model turn.
    pub fn model(parts: Vec<Part>) -> Self {
        Self {
            role: Some(Role::Model),
            parts,
        }
    }

    /// A single-text turn with the given role.
    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part::text(text)],
        }
    }

    /// Whether this content has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// The role of a message author.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User role.
    User,
    /// Model role.
    Model,
}

// Part kinds this client does not model (executable code, thoughts without
// text, ...) are dropped instead of failing the whole response.
fn deserialize_parts<'de, D>(deserializer: D) -> Result<Vec<Part>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Part>(value) {
            Ok(part) => Some(part),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unsupported content part");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_part_wire_shapes() {
        assert_eq!(serde_json::to_value(Part::text("hi")).unwrap(), json!({"text": "hi"}));
        assert_eq!(
            serde_json::to_value(Part::inline_data("image/png", "AAAA")).unwrap(),
            json!({"inline_data": {"mime_type": "image/png", "data": "AAAA"}})
        );
        assert_eq!(
            serde_json::to_value(Part::file_data("video/mp4", "https://files/abc")).unwrap(),
            json!({"file_data": {"mime_type": "video/mp4", "file_uri": "https://files/abc"}})
        );
        assert_eq!(
            serde_json::to_value(Part::from(FunctionResponse::from_output("get_weather", "sunny"))).unwrap(),
            json!({"functionResponse": {"name": "get_weather", "response": {"output": "sunny"}}})
        );
    }

    #[test]
    fn test_parse_camel_case_parts() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                {"functionCall": {"name": "lookup", "args": {"city": "Hanoi"}}}
            ]
        }))
        .unwrap();

        assert_eq!(content.role, Some(Role::Model));
        assert_eq!(content.parts[0], Part::inline_data("image/png", "AAAA"));
        assert_eq!(content.parts[1].as_function_call().unwrap().name, "lookup");
    }

    #[test]
    fn test_unknown_parts_are_skipped() {
        let content: Content = serde_json::from_value(json!({
            "role": "model",
            "parts": [
                {"executableCode": {"language": "PYTHON", "code": "print(1)"}},
                {"text": "done"}
            ]
        }))
        .unwrap();

        assert_eq!(content.parts, vec![Part::text("done")]);
    }

    #[test]
    fn test_missing_parts_is_empty() {
        let content: Content = serde_json::from_value(json!({"role": "model"})).unwrap();
        assert!(content.is_empty());
    }

    #[test]
    fn test_function_call_arg_lookup() {
        let call = FunctionCall {
            name: "set_alarm".to_string(),
            args: Some(json!({"hour": 7, "label": "wake up"})),
        };

        assert_eq!(call.arg::<u8>("hour"), Some(7));
        assert_eq!(call.arg::<String>("label").as_deref(), Some("wake up"));
        assert_eq!(call.arg::<u8>("label"), None);
        assert_eq!(call.arg::<u8>("minute"), None);
    }
}
