//! Files service implementation for the Gemini API.

use async_trait::async_trait;
use bytes::Bytes;
use futures::future::try_join_all;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

use super::validation::{mime_type_for_path, resolve_display_name, validate_file_name, validate_file_size};
use super::FileService;
use crate::config::UploadConfig;
use crate::error::{GeminiError, GeminiResult, ProtocolError, ResourceError};
use crate::observability::Logger;
use crate::transport::endpoints::{self, UPLOAD_URL_HEADER};
use crate::transport::{HttpMethod, HttpRequestBuilder, HttpResponse, HttpTransport, ResponseParser};
use crate::types::{File, FileHandle, FileState, ListFilesResponse, MimeType, WireName};

const UPLOAD_PROTOCOL_HEADER: &str = "X-Goog-Upload-Protocol";
const UPLOAD_COMMAND_HEADER: &str = "X-Goog-Upload-Command";
const UPLOAD_OFFSET_HEADER: &str = "X-Goog-Upload-Offset";
const UPLOAD_CONTENT_LENGTH_HEADER: &str = "X-Goog-Upload-Header-Content-Length";
const UPLOAD_CONTENT_TYPE_HEADER: &str = "X-Goog-Upload-Header-Content-Type";

/// Uploads local files through the resumable protocol.
///
/// An upload whose display name matches an existing remote file returns that
/// file instead of transferring anything.
pub struct FileUploader {
    transport: Arc<dyn HttpTransport>,
    request_builder: HttpRequestBuilder,
    logger: Arc<dyn Logger>,
    config: UploadConfig,
}

struct UploadSource {
    display_name: String,
    mime_type: MimeType,
    bytes: Bytes,
}

impl FileUploader {
    /// Create a new uploader.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        request_builder: HttpRequestBuilder,
        logger: Arc<dyn Logger>,
        config: UploadConfig,
    ) -> Self {
        Self {
            transport,
            request_builder,
            logger,
            config,
        }
    }

    /// Upload settings in effect.
    pub fn config(&self) -> &UploadConfig {
        &self.config
    }

    /// Like [`FileService::upload_file`], aborting activation polling when
    /// `cancellation` fires.
    pub async fn upload_file_with_cancellation(
        &self,
        path: &Path,
        display_name: Option<&str>,
        cancellation: &CancellationToken,
    ) -> GeminiResult<FileHandle> {
        let mime_type = mime_type_for_path(path)?;
        let display_name = resolve_display_name(path, display_name)?;
        check_source(path).await?;

        if let Some(existing) = self.find_file_by_display_name(&display_name).await {
            self.logger.info(
                "Reusing previously uploaded file",
                json!({ "display_name": display_name, "name": existing.name }),
            );
            return Ok(existing);
        }

        let source = UploadSource {
            display_name,
            mime_type,
            bytes: read_source(path).await?,
        };

        let session_url = self.start_upload(&source).await?;
        let handle = self.transfer(&source, &session_url).await?;

        let size = source.bytes.len() as u64;
        let needs_activation = !handle.is_active()
            && (size >= self.config.activation_threshold_bytes
                || handle.state == FileState::Processing);
        if !needs_activation {
            return Ok(handle);
        }

        self.wait_until_active(handle, cancellation).await
    }

    async fn start_upload(&self, source: &UploadSource) -> GeminiResult<String> {
        let url = self.request_builder.build_upload_url(endpoints::FILES)?;
        let headers = HashMap::from([
            (UPLOAD_PROTOCOL_HEADER.to_string(), "resumable".to_string()),
            (UPLOAD_COMMAND_HEADER.to_string(), "start".to_string()),
            (
                UPLOAD_CONTENT_LENGTH_HEADER.to_string(),
                source.bytes.len().to_string(),
            ),
            (
                UPLOAD_CONTENT_TYPE_HEADER.to_string(),
                source.mime_type.wire_name().to_string(),
            ),
        ]);
        let body = json!({ "file": { "display_name": source.display_name } });

        let request =
            self.request_builder
                .build_request_for_url(HttpMethod::Post, url, Some(&body), Some(headers))?;

        self.logger.debug(
            "Starting resumable upload",
            json!({
                "display_name": source.display_name,
                "mime_type": source.mime_type.wire_name(),
                "size_bytes": source.bytes.len(),
            }),
        );

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ResponseParser::unexpected_status(&response, "upload start"));
        }

        response
            .header(UPLOAD_URL_HEADER)
            .map(str::to_string)
            .ok_or_else(|| {
                ProtocolError::MissingUploadUrl {
                    header: UPLOAD_URL_HEADER.to_string(),
                }
                .into()
            })
    }

    async fn transfer(&self, source: &UploadSource, session_url: &str) -> GeminiResult<FileHandle> {
        let headers = HashMap::from([
            (UPLOAD_COMMAND_HEADER.to_string(), "upload, finalize".to_string()),
            (UPLOAD_OFFSET_HEADER.to_string(), "0".to_string()),
            ("Content-Length".to_string(), source.bytes.len().to_string()),
            (
                "Content-Type".to_string(),
                source.mime_type.wire_name().to_string(),
            ),
        ]);

        let request = self.request_builder.build_raw_request(
            HttpMethod::Post,
            session_url.to_string(),
            Some(source.bytes.clone()),
            headers,
            None,
        );

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ResponseParser::unexpected_status(&response, "upload transfer"));
        }

        let handle = FileHandle::try_from(parse_file(&response, "upload transfer")?)?;

        self.logger.info(
            "File uploaded",
            json!({
                "display_name": source.display_name,
                "name": handle.name,
                "state": handle.state.wire_name(),
            }),
        );

        Ok(handle)
    }

    async fn wait_until_active(
        &self,
        handle: FileHandle,
        cancellation: &CancellationToken,
    ) -> GeminiResult<FileHandle> {
        let attempts = self.config.max_poll_attempts;

        for attempt in 1..=attempts {
            tokio::select! {
                _ = cancellation.cancelled() => {
                    self.logger.warn(
                        "File activation polling cancelled",
                        json!({ "name": handle.name, "attempt": attempt }),
                    );
                    return Err(GeminiError::Cancelled {
                        operation: format!("activation of {}", handle.name),
                    });
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }

            let current = self.get_file(&handle.name).await?;
            self.logger.debug(
                "Polled file state",
                json!({
                    "name": current.name,
                    "attempt": attempt,
                    "state": current.state.wire_name(),
                }),
            );

            match current.state {
                FileState::Active => return Ok(current),
                FileState::Failed => {
                    return Err(ResourceError::FileProcessingFailed {
                        file_name: current.name,
                        message: "server reported state FAILED".to_string(),
                    }
                    .into())
                }
                FileState::Processing | FileState::StateUnspecified => {}
            }
        }

        Err(GeminiError::Timeout {
            operation: format!("activation of {}", handle.name),
            attempts,
        })
    }

    /// [`FileService::upload_files`] gated by `max_concurrent_uploads` from the config.
    pub async fn upload_files_with_default_limit(
        &self,
        paths: &[PathBuf],
    ) -> GeminiResult<Vec<FileHandle>> {
        self.upload_files(paths, self.config.max_concurrent_uploads)
            .await
    }

    async fn upload_gated(&self, path: &Path, gate: &Semaphore) -> GeminiResult<FileHandle> {
        let _permit = gate.acquire().await.map_err(|e| GeminiError::InvalidOperation {
            message: format!("upload gate closed: {e}"),
        })?;
        self.upload_file(path, None).await
    }
}

#[async_trait]
impl FileService for FileUploader {
    async fn upload_file(&self, path: &Path, display_name: Option<&str>) -> GeminiResult<FileHandle> {
        self.upload_file_with_cancellation(path, display_name, &CancellationToken::new())
            .await
    }

    async fn upload_files(
        &self,
        paths: &[PathBuf],
        max_concurrent: usize,
    ) -> GeminiResult<Vec<FileHandle>> {
        if max_concurrent == 0 {
            return Err(GeminiError::invalid_argument(
                "max_concurrent",
                "at least one concurrent upload is required",
            ));
        }

        self.logger.info(
            "Batch upload started",
            json!({ "files": paths.len(), "max_concurrent": max_concurrent }),
        );

        let gate = Semaphore::new(max_concurrent);
        let handles = try_join_all(paths.iter().map(|path| self.upload_gated(path, &gate))).await?;

        self.logger.info("Batch upload completed", json!({ "files": handles.len() }));
        Ok(handles)
    }

    async fn find_file_by_display_name(&self, display_name: &str) -> Option<FileHandle> {
        let mut page_token: Option<String> = None;

        loop {
            let page = match self.list_files(page_token.as_deref()).await {
                Ok(page) => page,
                Err(error) => {
                    self.logger.warn(
                        "File lookup failed; treating as not found",
                        json!({ "display_name": display_name, "error": error.to_string() }),
                    );
                    return None;
                }
            };

            let found = page.files.into_iter().find(|file| {
                file.display_name
                    .as_deref()
                    .is_some_and(|name| name.eq_ignore_ascii_case(display_name))
            });
            if let Some(file) = found {
                match FileHandle::try_from(file) {
                    Ok(handle) => return Some(handle),
                    Err(error) => {
                        self.logger.warn(
                            "Ignoring incomplete file entry",
                            json!({ "display_name": display_name, "error": error.to_string() }),
                        );
                    }
                }
            }

            match page.next_page_token.filter(|token| !token.is_empty()) {
                Some(token) if page_token.as_deref() != Some(token.as_str()) => {
                    page_token = Some(token)
                }
                _ => return None,
            }
        }
    }

    async fn get_file(&self, name: &str) -> GeminiResult<FileHandle> {
        validate_file_name(name)?;

        let request = self.request_builder.build_request::<()>(
            HttpMethod::Get,
            &endpoints::file(name.trim()),
            None,
            None,
        )?;
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(ResponseParser::unexpected_status(&response, "get file"));
        }

        Ok(FileHandle::try_from(parse_file(&response, "file status")?)?)
    }

    async fn list_files(&self, page_token: Option<&str>) -> GeminiResult<ListFilesResponse> {
        let mut url = self.request_builder.build_url(endpoints::FILES)?;
        if let Some(token) = page_token {
            url.query_pairs_mut().append_pair("pageToken", token);
        }

        let request = self
            .request_builder
            .build_request_for_url::<()>(HttpMethod::Get, url, None, None)?;
        let response = self.transport.send(request).await?;

        ResponseParser::parse_response(&response, "list files")
    }
}

/// Ensures `path` is an existing regular file within the size limit.
async fn check_source(path: &Path) -> GeminiResult<()> {
    let not_found = || ResourceError::FileNotFound {
        path: path.display().to_string(),
    };

    let metadata = tokio::fs::metadata(path).await.map_err(|_| not_found())?;
    if !metadata.is_file() {
        return Err(not_found().into());
    }
    validate_file_size(path, metadata.len())
}

async fn read_source(path: &Path) -> GeminiResult<Bytes> {
    check_source(path).await?;

    let bytes = tokio::fs::read(path).await.map_err(|e| ResourceError::FileReadFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Bytes::from(bytes))
}

/// Reads a file object that may or may not be wrapped in `{"file": ...}`.
fn parse_file(response: &HttpResponse, phase: &str) -> GeminiResult<File> {
    let malformed = |message: String| ProtocolError::MalformedResponse {
        phase: phase.to_string(),
        message,
    };

    let mut body: Value =
        serde_json::from_slice(&response.body).map_err(|e| malformed(e.to_string()))?;
    let file = match body.get_mut("file") {
        Some(inner) => inner.take(),
        None => body,
    };

    Ok(serde_json::from_value(file).map_err(|e| malformed(e.to_string()))?)
}
