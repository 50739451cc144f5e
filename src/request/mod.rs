//! Request assembly.
//!
//! [`RequestBuilder`] collects independent contributions (prompt, history,
//! images, an uploaded file, function results, tools, sampling settings) and
//! turns them into one [`ApiRequest`]. Each setter validates its own input
//! immediately; [`RequestBuilder::build`] only checks that the request has
//! something to send.
//!
//! ```
//! use integrations_gemini_chat::request::RequestBuilder;
//!
//! # fn main() -> Result<(), integrations_gemini_chat::GeminiError> {
//! let request = RequestBuilder::new()
//!     .with_prompt("Hello")?
//!     .with_default_generation_config()
//!     .disable_all_safety_settings()
//!     .build()?;
//! assert_eq!(request.contents().len(), 1);
//! # Ok(())
//! # }
//! ```

mod images;
mod tools;

pub use images::{image_from_base64, image_from_path};
pub use tools::ToolBuilder;

use std::path::Path;

use crate::error::{GeminiError, GeminiResult};
use crate::types::{
    ApiRequest, ChatMessage, Content, FileData, FunctionCallingConfig, FunctionCallingMode,
    FunctionDeclaration, FunctionResponse, GenerationConfig, GoogleSearch, ImageData, MimeType,
    Part, ResponseMimeType, SafetySetting, ThinkingConfig, Tool, ToolConfig, WireName,
};

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// Default output token ceiling.
pub const DEFAULT_MAX_OUTPUT_TOKENS: i32 = 65536;

/// Fluent builder for a single generation request.
#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    prompt: Option<String>,
    system_instruction: Option<String>,
    chat_history: Vec<Content>,
    generation_config: Option<GenerationConfig>,
    safety_settings: Option<Vec<SafetySetting>>,
    images: Vec<ImageData>,
    file: Option<FileData>,
    function_declarations: Option<(Vec<FunctionDeclaration>, FunctionCallingMode)>,
    function_responses: Vec<FunctionResponse>,
    grounding: bool,
    extra_tools: Vec<Tool>,
}

impl RequestBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the user prompt, trimmed.
    pub fn with_prompt(mut self, prompt: &str) -> GeminiResult<Self> {
        self.prompt = Some(non_blank("prompt", prompt)?);
        Ok(self)
    }

    /// Sets the system instruction, trimmed.
    pub fn with_system_instruction(mut self, instruction: &str) -> GeminiResult<Self> {
        self.system_instruction = Some(non_blank("system_instruction", instruction)?);
        Ok(self)
    }

    /// Replaces the prior conversation sent ahead of this request's content.
    pub fn with_chat_history(mut self, messages: &[ChatMessage]) -> GeminiResult<Self> {
        if messages.is_empty() {
            return Err(GeminiError::invalid_argument(
                "chat_history",
                "chat history must contain at least one message",
            ));
        }
        self.chat_history = messages.iter().map(Content::from).collect();
        Ok(self)
    }

    /// Replaces the generation configuration after range-checking it.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> GeminiResult<Self> {
        config.validate()?;
        self.generation_config = Some(config);
        Ok(self)
    }

    /// Sets temperature and output ceiling, keeping any schema or thinking settings.
    pub fn with_sampling_config(mut self, temperature: f32, max_output_tokens: i32) -> GeminiResult<Self> {
        GenerationConfig::sampling(temperature, max_output_tokens).validate()?;
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.temperature = Some(temperature);
        config.max_output_tokens = Some(max_output_tokens);
        Ok(self)
    }

    /// Temperature 1.0 and 65536 output tokens.
    pub fn with_default_generation_config(mut self) -> Self {
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.temperature = Some(DEFAULT_TEMPERATURE);
        config.max_output_tokens = Some(DEFAULT_MAX_OUTPUT_TOKENS);
        self
    }

    /// Requests structured JSON output following `schema`.
    pub fn with_response_schema(mut self, schema: serde_json::Value) -> GeminiResult<Self> {
        if !schema.is_object() {
            return Err(GeminiError::invalid_argument(
                "response_schema",
                "schema must be a JSON object",
            ));
        }
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.response_schema = Some(schema);
        config.response_mime_type = Some(ResponseMimeType::Json);
        Ok(self)
    }

    /// Sets the reasoning budget; `-1` lets the model decide, `0` disables thinking.
    pub fn with_thinking_budget(mut self, budget: i32) -> GeminiResult<Self> {
        if budget < -1 {
            return Err(GeminiError::out_of_range(
                "thinking_budget",
                format!("must be -1 or greater, got {budget}"),
            ));
        }
        let config = self.generation_config.get_or_insert_with(GenerationConfig::default);
        config.thinking_config = Some(ThinkingConfig { thinking_budget: budget });
        Ok(self)
    }

    /// Replaces the safety settings.
    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = Some(settings);
        self
    }

    /// Turns off blocking for all five harm categories, overriding earlier settings.
    pub fn disable_all_safety_settings(mut self) -> Self {
        self.safety_settings = Some(SafetySetting::block_none_for_all());
        self
    }

    /// Adds base64 images; a `data:image/...;base64,` prefix decides the type.
    pub fn with_base64_images<S: AsRef<str>>(mut self, images: &[S]) -> GeminiResult<Self> {
        ensure_not_empty("images", images)?;
        for image in images {
            self.images.push(image_from_base64(image.as_ref())?);
        }
        Ok(self)
    }

    /// Adds images read from disk; the extension decides the type.
    pub fn with_images<P: AsRef<Path>>(mut self, paths: &[P]) -> GeminiResult<Self> {
        ensure_not_empty("images", paths)?;
        for path in paths {
            self.images.push(image_from_path(path.as_ref())?);
        }
        Ok(self)
    }

    /// Adds images whose type is already known.
    pub fn with_image_data(mut self, images: Vec<ImageData>) -> GeminiResult<Self> {
        ensure_not_empty("images", &images)?;
        if let Some(image) = images.iter().find(|i| !i.mime_type.is_image()) {
            return Err(GeminiError::invalid_argument(
                "images",
                format!("{} is not an image type", image.mime_type.wire_name()),
            ));
        }
        self.images.extend(images);
        Ok(self)
    }

    /// References a file uploaded through the file service.
    pub fn with_uploaded_file(mut self, file_uri: &str, mime_type: MimeType) -> GeminiResult<Self> {
        let file_uri = non_blank("file_uri", file_uri)?;
        self.file = Some(FileData {
            mime_type: Some(mime_type.wire_name().to_string()),
            file_uri,
        });
        Ok(self)
    }

    /// Declares callable functions and how the model may use them.
    pub fn with_function_declarations(
        mut self,
        declarations: Vec<FunctionDeclaration>,
        mode: FunctionCallingMode,
    ) -> GeminiResult<Self> {
        ensure_not_empty("function_declarations", &declarations)?;
        self.function_declarations = Some((declarations, mode));
        Ok(self)
    }

    /// Sends back the results of earlier function calls.
    pub fn with_function_responses(mut self, responses: Vec<FunctionResponse>) -> GeminiResult<Self> {
        ensure_not_empty("function_responses", &responses)?;
        self.function_responses = responses;
        Ok(self)
    }

    /// Includes the search-grounding tool.
    pub fn enable_grounding(mut self) -> Self {
        self.grounding = true;
        self
    }

    /// Appends tools, typically from a [`ToolBuilder`].
    pub fn with_tools(mut self, tools: Vec<Tool>) -> Self {
        self.extra_tools.extend(tools);
        self
    }

    /// Assembles the request.
    ///
    /// Content order: chat history, images, uploaded file, function responses,
    /// prompt. Tool order: grounding, function declarations, extra tools.
    pub fn build(self) -> GeminiResult<ApiRequest> {
        let has_contribution = self.prompt.is_some()
            || !self.images.is_empty()
            || self.file.is_some()
            || !self.function_responses.is_empty();
        if !has_contribution {
            return Err(GeminiError::InvalidOperation {
                message: "a prompt, image, file or function response is required".to_string(),
            });
        }

        let mut contents = self.chat_history;

        if !self.images.is_empty() {
            contents.push(Content::user(self.images.iter().map(Part::from).collect()));
        }

        if let Some(file_data) = self.file {
            contents.push(Content::user(vec![Part::FileData { file_data }]));
        }

        if !self.function_responses.is_empty() {
            contents.push(Content::user(
                self.function_responses.into_iter().map(Part::from).collect(),
            ));
        }

        if let Some(prompt) = self.prompt {
            contents.push(Content::user(vec![Part::text(prompt)]));
        }

        let system_instruction = self.system_instruction.map(|text| Content {
            role: None,
            parts: vec![Part::text(text)],
        });

        let mut tools = Vec::new();
        if self.grounding {
            tools.push(Tool::GoogleSearch(GoogleSearch {}));
        }
        let tool_config = match self.function_declarations {
            Some((declarations, mode)) => {
                tools.push(Tool::FunctionDeclarations(declarations));
                Some(ToolConfig {
                    function_calling_config: FunctionCallingConfig { mode },
                })
            }
            None => None,
        };
        tools.extend(self.extra_tools);

        Ok(ApiRequest {
            contents,
            system_instruction,
            generation_config: self.generation_config,
            safety_settings: self.safety_settings,
            tools: (!tools.is_empty()).then_some(tools),
            tool_config,
        })
    }
}

fn non_blank(parameter: &str, value: &str) -> GeminiResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GeminiError::invalid_argument(parameter, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn ensure_not_empty<T>(parameter: &str, items: &[T]) -> GeminiResult<()> {
    if items.is_empty() {
        return Err(GeminiError::invalid_argument(parameter, "list must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HarmBlockThreshold, Role};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_blank_inputs_rejected() {
        for blank in ["", "   ", "\n\t"] {
            assert!(matches!(
                RequestBuilder::new().with_prompt(blank),
                Err(GeminiError::InvalidArgument { .. })
            ));
            assert!(matches!(
                RequestBuilder::new().with_system_instruction(blank),
                Err(GeminiError::InvalidArgument { .. })
            ));
        }
        assert!(matches!(
            RequestBuilder::new().with_chat_history(&[]),
            Err(GeminiError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_prompt_is_trimmed() {
        let request = RequestBuilder::new().with_prompt("  Hi there \n").unwrap().build().unwrap();
        assert_eq!(request.contents()[0].parts, vec![Part::text("Hi there")]);
    }

    #[test]
    fn test_empty_request_rejected() {
        let result = RequestBuilder::new()
            .with_system_instruction("Be brief")
            .unwrap()
            .with_chat_history(&[ChatMessage::user("earlier")])
            .unwrap()
            .enable_grounding()
            .build();

        assert!(matches!(result, Err(GeminiError::InvalidOperation { .. })));
    }

    #[test]
    fn test_default_scenario() {
        let request = RequestBuilder::new()
            .with_prompt("Hello")
            .unwrap()
            .with_default_generation_config()
            .disable_all_safety_settings()
            .build()
            .unwrap();

        assert_eq!(request.contents(), &[Content::text(Role::User, "Hello")]);
        let safety = request.safety_settings().unwrap();
        assert_eq!(safety.len(), 5);
        assert!(safety.iter().all(|s| s.threshold == HarmBlockThreshold::BlockNone));
        let config = request.generation_config().unwrap();
        assert_eq!(config.temperature, Some(1.0));
        assert_eq!(config.max_output_tokens, Some(65536));
        assert!(request.tools().is_none());
        assert!(request.tool_config().is_none());
    }

    #[test]
    fn test_content_assembly_order() {
        let request = RequestBuilder::new()
            .with_prompt("Describe all of this")
            .unwrap()
            .with_function_responses(vec![FunctionResponse::from_output("lookup", "42")])
            .unwrap()
            .with_uploaded_file("https://files/abc", MimeType::Pdf)
            .unwrap()
            .with_image_data(vec![ImageData {
                mime_type: MimeType::Png,
                base64_data: "AAAA".to_string(),
            }])
            .unwrap()
            .with_chat_history(&[ChatMessage::user("Hi"), ChatMessage::model("Hello!")])
            .unwrap()
            .build()
            .unwrap();

        let contents = request.contents();
        assert_eq!(contents.len(), 6);
        assert_eq!(contents[0], Content::text(Role::User, "Hi"));
        assert_eq!(contents[1], Content::text(Role::Model, "Hello!"));
        assert_eq!(contents[2].parts, vec![Part::inline_data("image/png", "AAAA")]);
        assert_eq!(contents[3].parts, vec![Part::file_data("application/pdf", "https://files/abc")]);
        assert!(contents[4].parts[0].as_function_response().is_some());
        assert_eq!(contents[5].parts, vec![Part::text("Describe all of this")]);
    }

    #[test]
    fn test_image_only_request_is_valid() {
        let request = RequestBuilder::new()
            .with_image_data(vec![ImageData {
                mime_type: MimeType::Jpeg,
                base64_data: "AAAA".to_string(),
            }])
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.contents().len(), 1);
    }

    #[test]
    fn test_tool_order_and_mode() {
        let request = RequestBuilder::new()
            .with_prompt("What time is it?")
            .unwrap()
            .with_tools(vec![Tool::UrlContext(crate::types::UrlContext {})])
            .with_function_declarations(
                vec![FunctionDeclaration::new("now", "Current time")],
                FunctionCallingMode::Any,
            )
            .unwrap()
            .enable_grounding()
            .build()
            .unwrap();

        let tools = serde_json::to_value(request.tools().unwrap()).unwrap();
        assert_eq!(
            tools,
            json!([
                {"googleSearch": {}},
                {"functionDeclarations": [{"name": "now", "description": "Current time"}]},
                {"urlContext": {}}
            ])
        );
        assert_eq!(
            request.tool_config().unwrap().function_calling_config.mode,
            FunctionCallingMode::Any
        );
    }

    #[test]
    fn test_empty_lists_rejected() {
        assert!(RequestBuilder::new()
            .with_function_declarations(vec![], FunctionCallingMode::Auto)
            .is_err());
        assert!(RequestBuilder::new().with_function_responses(vec![]).is_err());
        assert!(RequestBuilder::new().with_base64_images::<&str>(&[]).is_err());
        assert!(RequestBuilder::new().with_image_data(vec![]).is_err());
    }

    #[test]
    fn test_sampling_out_of_range() {
        assert!(matches!(
            RequestBuilder::new().with_sampling_config(2.5, 100),
            Err(GeminiError::OutOfRange { .. })
        ));
        assert!(matches!(
            RequestBuilder::new().with_sampling_config(0.5, 0),
            Err(GeminiError::OutOfRange { .. })
        ));
        assert!(matches!(
            RequestBuilder::new().with_generation_config(GenerationConfig::sampling(-1.0, 10)),
            Err(GeminiError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_response_schema_forces_json() {
        let request = RequestBuilder::new()
            .with_response_schema(json!({"type": "object", "properties": {"answer": {"type": "string"}}}))
            .unwrap()
            .with_sampling_config(0.2, 512)
            .unwrap()
            .with_thinking_budget(0)
            .unwrap()
            .with_prompt("Answer as JSON")
            .unwrap()
            .build()
            .unwrap();

        let config = request.generation_config().unwrap();
        assert_eq!(config.response_mime_type, Some(ResponseMimeType::Json));
        assert!(config.response_schema.is_some());
        assert_eq!(config.temperature, Some(0.2));
        assert_eq!(config.thinking_config, Some(ThinkingConfig { thinking_budget: 0 }));
    }

    #[test]
    fn test_invalid_schema_and_budget() {
        assert!(RequestBuilder::new().with_response_schema(json!("string")).is_err());
        assert!(matches!(
            RequestBuilder::new().with_thinking_budget(-2),
            Err(GeminiError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_disable_safety_overrides_earlier_settings() {
        let request = RequestBuilder::new()
            .with_safety_settings(vec![])
            .disable_all_safety_settings()
            .with_prompt("hi")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.safety_settings().unwrap().len(), 5);
    }

    #[test]
    fn test_system_instruction_has_no_role() {
        let request = RequestBuilder::new()
            .with_system_instruction(" Be terse ")
            .unwrap()
            .with_prompt("hi")
            .unwrap()
            .build()
            .unwrap();

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["systemInstruction"], json!({"parts": [{"text": "Be terse"}]}));
        assert_eq!(body["contents"], json!([{"role": "user", "parts": [{"text": "hi"}]}]));
    }
}
