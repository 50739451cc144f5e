//! Files service for the Gemini API.

mod service;
mod validation;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::error::GeminiResult;
use crate::types::{FileHandle, ListFilesResponse};

pub use service::FileUploader;
pub use validation::{
    mime_type_for_path, resolve_display_name, validate_file_name, MAX_DISPLAY_NAME_LENGTH,
    MAX_FILE_SIZE,
};

/// Service for file upload and lookup.
#[async_trait]
pub trait FileService: Send + Sync {
    /// Uploads one file, or returns the remote file already carrying its display name.
    ///
    /// The display name defaults to the file name.
    async fn upload_file(&self, path: &Path, display_name: Option<&str>) -> GeminiResult<FileHandle>;

    /// Uploads every path with at most `max_concurrent` uploads in flight.
    ///
    /// Handles are returned in input order; any failure fails the batch.
    async fn upload_files(
        &self,
        paths: &[PathBuf],
        max_concurrent: usize,
    ) -> GeminiResult<Vec<FileHandle>>;

    /// Looks up a remote file by display name, ignoring case.
    ///
    /// Lookup failures are logged and reported as `None`.
    async fn find_file_by_display_name(&self, display_name: &str) -> Option<FileHandle>;

    /// Fetches a file's current metadata.
    async fn get_file(&self, name: &str) -> GeminiResult<FileHandle>;

    /// Lists one page of files.
    async fn list_files(&self, page_token: Option<&str>) -> GeminiResult<ListFilesResponse>;
}
