//! Builder for a request's tool list.

use crate::error::{GeminiError, GeminiResult};
use crate::types::{FunctionDeclaration, GoogleSearch, Tool, UrlContext};

/// Composes search grounding and function declarations into a tool list.
///
/// ```
/// use integrations_gemini_chat::request::ToolBuilder;
/// use integrations_gemini_chat::types::FunctionDeclaration;
///
/// let tools = ToolBuilder::new()
///     .enable_google_search()
///     .add_function_declaration(FunctionDeclaration::new("now", "Current time"))
///     .build()
///     .unwrap();
/// assert_eq!(tools.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ToolBuilder {
    google_search: bool,
    function_declarations: Vec<FunctionDeclaration>,
}

impl ToolBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the search-grounding and URL-context tools.
    pub fn enable_google_search(mut self) -> Self {
        self.google_search = true;
        self
    }

    /// Appends declarations as given.
    pub fn add_function_declarations(
        mut self,
        declarations: impl IntoIterator<Item = FunctionDeclaration>,
    ) -> Self {
        self.function_declarations.extend(declarations);
        self
    }

    /// Appends one declaration unless a function with the same name (any case) exists.
    pub fn add_function_declaration(mut self, declaration: FunctionDeclaration) -> Self {
        let exists = self
            .function_declarations
            .iter()
            .any(|d| d.name.eq_ignore_ascii_case(&declaration.name));
        if !exists {
            self.function_declarations.push(declaration);
        }
        self
    }

    /// Produces the tool list; fails when nothing was enabled.
    pub fn build(self) -> GeminiResult<Vec<Tool>> {
        let mut tools = Vec::new();

        if self.google_search {
            tools.push(Tool::GoogleSearch(GoogleSearch {}));
            tools.push(Tool::UrlContext(UrlContext {}));
        }

        if !self.function_declarations.is_empty() {
            tools.push(Tool::FunctionDeclarations(self.function_declarations));
        }

        if tools.is_empty() {
            return Err(GeminiError::InvalidOperation {
                message: "at least one tool must be enabled or added".to_string(),
            });
        }

        Ok(tools)
    }
}
