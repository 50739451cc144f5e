//! Validation of local upload sources.

use std::path::Path;

use crate::error::{GeminiError, GeminiResult};
use crate::types::MimeType;

/// Maximum file size for upload (2GB).
pub const MAX_FILE_SIZE: u64 = 2 * 1024 * 1024 * 1024;

/// Maximum display name length.
pub const MAX_DISPLAY_NAME_LENGTH: usize = 256;

/// Resolves the upload MIME type from the file extension.
pub fn mime_type_for_path(path: &Path) -> GeminiResult<MimeType> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(MimeType::from_extension)
        .ok_or_else(|| {
            GeminiError::invalid_argument(
                "path",
                format!("cannot determine a supported MIME type for {}", path.display()),
            )
        })
}

/// Trims a caller-supplied display name, or derives one from the file name.
pub fn resolve_display_name(path: &Path, display_name: Option<&str>) -> GeminiResult<String> {
    let name = match display_name {
        Some(name) => name.trim().to_string(),
        None => path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .unwrap_or_default(),
    };

    if name.is_empty() {
        return Err(GeminiError::invalid_argument(
            "display_name",
            "display name must not be empty",
        ));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(GeminiError::invalid_argument(
            "display_name",
            format!("display name exceeds {MAX_DISPLAY_NAME_LENGTH} characters"),
        ));
    }

    Ok(name)
}

/// Rejects empty or oversized payloads.
pub fn validate_file_size(path: &Path, size: u64) -> GeminiResult<()> {
    if size == 0 {
        return Err(GeminiError::invalid_argument(
            "path",
            format!("{} is empty", path.display()),
        ));
    }
    if size > MAX_FILE_SIZE {
        return Err(GeminiError::invalid_argument(
            "path",
            format!(
                "{} is {size} bytes, above the {MAX_FILE_SIZE} byte limit",
                path.display()
            ),
        ));
    }
    Ok(())
}

/// Rejects blank file resource names.
pub fn validate_file_name(name: &str) -> GeminiResult<()> {
    let id = name.trim().trim_start_matches("files/");
    if id.is_empty() {
        return Err(GeminiError::invalid_argument("name", "file name must not be empty"));
    }
    Ok(())
}
