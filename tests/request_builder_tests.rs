//! Integration tests for request assembly.

use integrations_gemini_chat::request::{RequestBuilder, ToolBuilder};
use integrations_gemini_chat::types::{
    ChatMessage, FunctionCallingMode, FunctionDeclaration, FunctionParameters, FunctionResponse,
    HarmBlockThreshold, HarmCategory, MimeType, Part, Role, SafetySetting, Tool,
};
use integrations_gemini_chat::GeminiError;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Write;

/// 1x1 transparent PNG.
const PNG_BASE64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

fn weather_declaration() -> FunctionDeclaration {
    FunctionDeclaration::new("get_current_weather", "Current weather for a city").with_parameters(
        FunctionParameters::object(json!({ "location": { "type": "string" } }))
            .with_required(["location"]),
    )
}

#[test]
fn test_hello_with_defaults_and_safety_disabled() {
    // Arrange & Act
    let request = RequestBuilder::new()
        .with_prompt("Hello")
        .unwrap()
        .with_default_generation_config()
        .disable_all_safety_settings()
        .build()
        .unwrap();

    // Assert
    assert_eq!(request.contents().len(), 1);
    assert_eq!(request.contents()[0].role, Some(Role::User));
    assert_eq!(request.contents()[0].parts, vec![Part::text("Hello")]);

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
fn test_prompt_is_trimmed() {
    let request = RequestBuilder::new()
        .with_prompt("  What is Rust?\n")
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(request.contents()[0].parts[0].as_text(), Some("What is Rust?"));
}

#[test]
fn test_blank_inputs_rejected() {
    for input in ["", "   ", "\n\t"] {
        assert!(matches!(
            RequestBuilder::new().with_prompt(input),
            Err(GeminiError::InvalidArgument { .. })
        ));
        assert!(matches!(
            RequestBuilder::new().with_system_instruction(input),
            Err(GeminiError::InvalidArgument { .. })
        ));
    }
}

#[test]
fn test_empty_lists_rejected() {
    let no_images: &[&str] = &[];
    assert!(matches!(
        RequestBuilder::new().with_base64_images(no_images),
        Err(GeminiError::InvalidArgument { .. })
    ));
    assert!(matches!(
        RequestBuilder::new().with_chat_history(&[]),
        Err(GeminiError::InvalidArgument { .. })
    ));
    assert!(matches!(
        RequestBuilder::new().with_function_responses(vec![]),
        Err(GeminiError::InvalidArgument { .. })
    ));
    assert!(matches!(
        RequestBuilder::new().with_function_declarations(vec![], FunctionCallingMode::Auto),
        Err(GeminiError::InvalidArgument { .. })
    ));
}

#[test]
fn test_temperature_out_of_range() {
    for temperature in [-0.1, 2.1] {
        let result = RequestBuilder::new().with_sampling_config(temperature, 1024);
        assert!(matches!(result, Err(GeminiError::OutOfRange { .. })));
    }

    assert!(matches!(
        RequestBuilder::new().with_sampling_config(1.0, 0),
        Err(GeminiError::OutOfRange { .. })
    ));
    assert!(matches!(
        RequestBuilder::new().with_thinking_budget(-2),
        Err(GeminiError::OutOfRange { .. })
    ));
}

#[test]
fn test_temperature_bounds_accepted() {
    assert!(RequestBuilder::new().with_sampling_config(0.0, 1).is_ok());
    assert!(RequestBuilder::new().with_sampling_config(2.0, 1).is_ok());
}

#[test]
fn test_build_without_content_fails() {
    let result = RequestBuilder::new()
        .with_default_generation_config()
        .disable_all_safety_settings()
        .enable_grounding()
        .build();

    assert!(matches!(result, Err(GeminiError::InvalidOperation { .. })));
}

#[test]
fn test_history_alone_is_not_enough() {
    let result = RequestBuilder::new()
        .with_chat_history(&[ChatMessage::user("hi"), ChatMessage::model("hello")])
        .unwrap()
        .build();

    assert!(matches!(result, Err(GeminiError::InvalidOperation { .. })));
}

#[test]
fn test_content_order() {
    // Arrange & Act
    let request = RequestBuilder::new()
        .with_prompt("Describe the picture")
        .unwrap()
        .with_function_responses(vec![FunctionResponse::from_output("lookup", "done")])
        .unwrap()
        .with_uploaded_file("https://example.test/files/abc", MimeType::Pdf)
        .unwrap()
        .with_base64_images(&[PNG_BASE64])
        .unwrap()
        .with_chat_history(&[ChatMessage::user("earlier"), ChatMessage::model("reply")])
        .unwrap()
        .build()
        .unwrap();

    // Assert
    let contents = request.contents();
    assert_eq!(contents.len(), 6);
    assert_eq!(contents[0].parts[0].as_text(), Some("earlier"));
    assert_eq!(contents[1].role, Some(Role::Model));
    assert!(matches!(&contents[2].parts[0], Part::InlineData { .. }));
    assert!(matches!(&contents[3].parts[0], Part::FileData { .. }));
    assert!(contents[4].parts[0].as_function_response().is_some());
    assert_eq!(contents[5].parts[0].as_text(), Some("Describe the picture"));
}

#[test]
fn test_blank_uploaded_file_uri_rejected() {
    for uri in ["", "   "] {
        let error = RequestBuilder::new()
            .with_prompt("Summarize the attachment")
            .unwrap()
            .with_uploaded_file(uri, MimeType::Pdf)
            .unwrap_err();

        assert!(matches!(
            error,
            GeminiError::InvalidArgument { ref parameter, .. } if parameter == "file_uri"
        ));
    }
}

#[test]
fn test_system_instruction_has_no_role() {
    let request = RequestBuilder::new()
        .with_system_instruction("Answer briefly.")
        .unwrap()
        .with_prompt("Hi")
        .unwrap()
        .build()
        .unwrap();

    let instruction = request.system_instruction().unwrap();
    assert_eq!(instruction.role, None);
    assert_eq!(instruction.parts[0].as_text(), Some("Answer briefly."));
}

#[test]
fn test_tool_order_and_config() {
    // Arrange
    let extra = ToolBuilder::new().enable_google_search().build().unwrap();

    // Act
    let request = RequestBuilder::new()
        .with_prompt("Weather?")
        .unwrap()
        .with_tools(extra)
        .with_function_declarations(vec![weather_declaration()], FunctionCallingMode::Any)
        .unwrap()
        .enable_grounding()
        .build()
        .unwrap();

    // Assert
    let tools = request.tools().unwrap();
    assert_eq!(tools.len(), 4);
    assert!(matches!(tools[0], Tool::GoogleSearch(_)));
    assert!(matches!(tools[1], Tool::FunctionDeclarations(_)));
    assert!(matches!(tools[2], Tool::GoogleSearch(_)));
    assert!(matches!(tools[3], Tool::UrlContext(_)));
    assert_eq!(
        request.tool_config().unwrap().function_calling_config.mode,
        FunctionCallingMode::Any
    );
}

#[test]
fn test_tool_builder_skips_duplicate_names() {
    let tools = ToolBuilder::new()
        .add_function_declaration(weather_declaration())
        .add_function_declaration(FunctionDeclaration::new("GET_CURRENT_WEATHER", "dup"))
        .build()
        .unwrap();

    match &tools[0] {
        Tool::FunctionDeclarations(declarations) => assert_eq!(declarations.len(), 1),
        other => panic!("unexpected tool {other:?}"),
    }
}

#[test]
fn test_empty_tool_builder_fails() {
    assert!(matches!(
        ToolBuilder::new().build(),
        Err(GeminiError::InvalidOperation { .. })
    ));
}

#[test]
fn test_response_schema_sets_json_output() {
    let request = RequestBuilder::new()
        .with_prompt("List fjords")
        .unwrap()
        .with_response_schema(json!({ "type": "array", "items": { "type": "string" } }))
        .unwrap()
        .with_sampling_config(0.2, 512)
        .unwrap()
        .build()
        .unwrap();

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(body["generationConfig"]["responseSchema"]["type"], "array");
    assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
}

#[test]
fn test_schema_must_be_object() {
    assert!(matches!(
        RequestBuilder::new().with_response_schema(json!("string")),
        Err(GeminiError::InvalidArgument { .. })
    ));
}

#[test]
fn test_base64_image_types() {
    let request = RequestBuilder::new()
        .with_base64_images(&[
            format!("data:image/webp;base64,{PNG_BASE64}"),
            PNG_BASE64.to_string(),
            "aGVsbG8=".to_string(),
        ])
        .unwrap()
        .build()
        .unwrap();

    let mime_types: Vec<_> = request.contents()[0]
        .parts
        .iter()
        .map(|part| match part {
            Part::InlineData { inline_data } => inline_data.mime_type.clone(),
            other => panic!("unexpected part {other:?}"),
        })
        .collect();
    assert_eq!(mime_types, ["image/webp", "image/png", "image/jpeg"]);
}

#[test]
fn test_non_image_data_uri_rejected() {
    let result = RequestBuilder::new().with_base64_images(&[format!("data:application/pdf;base64,{PNG_BASE64}")]);
    assert!(matches!(result, Err(GeminiError::InvalidArgument { .. })));

    let result = RequestBuilder::new().with_base64_images(&["not base64!"]);
    assert!(matches!(result, Err(GeminiError::InvalidArgument { .. })));
}

#[test]
fn test_images_from_disk() {
    // Arrange
    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"\x89PNG\r\n\x1a\nrest").unwrap();

    // Act
    let request = RequestBuilder::new()
        .with_images(&[file.path()])
        .unwrap()
        .build()
        .unwrap();

    // Assert
    match &request.contents()[0].parts[0] {
        Part::InlineData { inline_data } => assert_eq!(inline_data.mime_type, "image/png"),
        other => panic!("unexpected part {other:?}"),
    }

    let missing = std::env::temp_dir().join("definitely-missing-image.png");
    assert!(matches!(
        RequestBuilder::new().with_images(&[missing]),
        Err(GeminiError::Resource(_))
    ));
    assert!(matches!(
        RequestBuilder::new().with_images(&["notes.txt"]),
        Err(GeminiError::InvalidArgument { .. })
    ));
}

#[test]
fn test_explicit_safety_settings() {
    let request = RequestBuilder::new()
        .with_prompt("Hi")
        .unwrap()
        .with_safety_settings(vec![SafetySetting::new(
            HarmCategory::HateSpeech,
            HarmBlockThreshold::BlockOnlyHigh,
        )])
        .build()
        .unwrap();

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(
        body["safetySettings"],
        json!([{ "category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_ONLY_HIGH" }])
    );
}
