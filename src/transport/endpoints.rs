//! Endpoint path constants and builder functions for the Gemini API.

/// Base path for models endpoints.
pub const MODELS: &str = "/models";

/// Base path for files endpoints.
pub const FILES: &str = "/files";

/// Prefix placed before the API version for media uploads.
pub const UPLOAD_PREFIX: &str = "upload";

/// Header carrying the resumable session URL in the start response.
pub const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";

/// Default host of the Gemini Code Assist backend.
pub const CODE_ASSIST_BASE_URL: &str = "https://cloudcode-pa.googleapis.com";

/// Version segment of the Code Assist backend.
pub const CODE_ASSIST_API_VERSION: &str = "v1internal";

/// Code Assist method generating content.
pub const CODE_ASSIST_GENERATE: &str = "generateContent";

/// Code Assist method storing the data-collection preference.
pub const CODE_ASSIST_USER_SETTING: &str = "setCodeAssistGlobalUserSetting";

/// Constructs a path for the generateContent endpoint.
///
/// # Example
///
/// ```
/// use integrations_gemini_chat::transport::endpoints;
///
/// let path = endpoints::generate_content("gemini-2.0-flash");
/// assert_eq!(path, "/models/gemini-2.0-flash:generateContent");
/// ```
pub fn generate_content(model: &str) -> String {
    format!("{}/{}:generateContent", MODELS, model)
}

/// Constructs a path for a specific file.
///
/// Accepts both the bare ID and the server-assigned `files/{id}` name.
///
/// ```
/// use integrations_gemini_chat::transport::endpoints;
///
/// assert_eq!(endpoints::file("files/abc123"), "/files/abc123");
/// assert_eq!(endpoints::file("abc123"), "/files/abc123");
/// ```
pub fn file(name: &str) -> String {
    let id = name.strip_prefix("files/").unwrap_or(name);
    format!("{}/{}", FILES, id)
}
