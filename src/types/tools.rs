//! Tool-related types for the Gemini API.
//!
//! This module contains types for defining and configuring tools that the model can use.

use serde::{Deserialize, Serialize};

/// One entry of a request's tool list.
///
/// Serialises as `{"googleSearch": {}}`, `{"urlContext": {}}` or
/// `{"functionDeclarations": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Tool {
    /// Search grounding marker.
    GoogleSearch(GoogleSearch),
    /// URL context marker.
    UrlContext(UrlContext),
    /// Functions the model may call.
    FunctionDeclarations(Vec<FunctionDeclaration>),
}

/// Google search grounding tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct GoogleSearch {}

/// URL context tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UrlContext {}

/// Declaration of a function that the model can call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionDeclaration {
    /// The name of the function.
    pub name: String,
    /// The description of the function.
    pub description: String,
    /// The parameters schema for the function.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<FunctionParameters>,
}

impl FunctionDeclaration {
    /// Creates a declaration without parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
        }
    }

    /// Attaches a parameter schema.
    pub fn with_parameters(mut self, parameters: FunctionParameters) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// JSON-schema-shaped parameter object, passed through unvalidated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionParameters {
    /// Always `"object"` for function parameters.
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Named property schemas.
    pub properties: serde_json::Value,
    /// Names of required properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl FunctionParameters {
    /// An `"object"` schema with the given properties.
    ///
    /// ```
    /// use integrations_gemini_chat::types::FunctionParameters;
    /// use serde_json::json;
    ///
    /// let params = FunctionParameters::object(json!({
    ///     "city": {"type": "string", "description": "City name"}
    /// }))
    /// .with_required(["city"]);
    /// assert_eq!(params.required, Some(vec!["city".to_string()]));
    /// ```
    pub fn object(properties: serde_json::Value) -> Self {
        Self {
            schema_type: "object".to_string(),
            properties,
            required: None,
        }
    }

    /// Marks properties as required.
    pub fn with_required<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Configuration for tool usage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Function calling configuration.
    pub function_calling_config: FunctionCallingConfig,
}

/// Configuration for function calling behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionCallingConfig {
    /// The mode for function calling.
    pub mode: FunctionCallingMode,
}

/// Mode for function calling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionCallingMode {
    /// Automatically decide when to call functions.
    #[default]
    Auto,
    /// Always call a function.
    Any,
    /// Never call functions.
    None,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_tool_wire_shapes() {
        assert_eq!(
            serde_json::to_value(Tool::GoogleSearch(GoogleSearch {})).unwrap(),
            json!({"googleSearch": {}})
        );
        assert_eq!(
            serde_json::to_value(Tool::UrlContext(UrlContext {})).unwrap(),
            json!({"urlContext": {}})
        );

        let declaration = FunctionDeclaration::new("get_time", "Current time")
            .with_parameters(FunctionParameters::object(json!({"tz": {"type": "string"}})));
        assert_eq!(
            serde_json::to_value(Tool::FunctionDeclarations(vec![declaration])).unwrap(),
            json!({"functionDeclarations": [{
                "name": "get_time",
                "description": "Current time",
                "parameters": {"type": "object", "properties": {"tz": {"type": "string"}}}
            }]})
        );
    }

    #[test]
    fn test_tool_config_wire_shape() {
        let config = ToolConfig {
            function_calling_config: FunctionCallingConfig {
                mode: FunctionCallingMode::Any,
            },
        };
        assert_eq!(
            serde_json::to_value(config).unwrap(),
            json!({"functionCallingConfig": {"mode": "ANY"}})
        );
    }
}
