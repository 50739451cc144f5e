//! Static tables between logical enumerations and their wire strings.

use serde::{Deserialize, Serialize};

use super::content::Role;
use super::files::FileState;
use super::safety::{HarmBlockThreshold, HarmCategory};
use super::tools::FunctionCallingMode;

/// Enumerations with a fixed wire representation.
pub trait WireName {
    /// The string sent to or received from the API.
    fn wire_name(&self) -> &'static str;
}

/// Known model versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelVersion {
    /// Lightweight, fast model.
    #[default]
    Gemini20FlashLite,
    /// Balanced general-purpose model.
    Gemini20Flash,
    /// Thinking-capable flash model.
    Gemini25Flash,
    /// Most capable model.
    Gemini25Pro,
}

impl WireName for ModelVersion {
    fn wire_name(&self) -> &'static str {
        match self {
            ModelVersion::Gemini20FlashLite => "gemini-2.0-flash-lite",
            ModelVersion::Gemini20Flash => "gemini-2.0-flash",
            ModelVersion::Gemini25Flash => "gemini-2.5-flash",
            ModelVersion::Gemini25Pro => "gemini-2.5-pro",
        }
    }
}

/// Media types accepted for inline data and uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MimeType {
    Pdf,
    Txt,
    Html,
    Css,
    Md,
    Csv,
    Xml,
    Rtf,
    Png,
    Jpeg,
    Heif,
    Heic,
    Webp,
    Mp4,
    Mpeg,
    Mov,
    Avi,
    Flv,
    Mpg,
    Webm,
    Wmv,
    ThreeGpp,
    Wav,
    Mp3,
    Aiff,
    Aac,
    Ogg,
    Flac,
}

impl MimeType {
    /// Every registered type.
    pub const ALL: [MimeType; 28] = [
        MimeType::Pdf,
        MimeType::Txt,
        MimeType::Html,
        MimeType::Css,
        MimeType::Md,
        MimeType::Csv,
        MimeType::Xml,
        MimeType::Rtf,
        MimeType::Png,
        MimeType::Jpeg,
        MimeType::Heif,
        MimeType::Heic,
        MimeType::Webp,
        MimeType::Mp4,
        MimeType::Mpeg,
        MimeType::Mov,
        MimeType::Avi,
        MimeType::Flv,
        MimeType::Mpg,
        MimeType::Webm,
        MimeType::Wmv,
        MimeType::ThreeGpp,
        MimeType::Wav,
        MimeType::Mp3,
        MimeType::Aiff,
        MimeType::Aac,
        MimeType::Ogg,
        MimeType::Flac,
    ];

    /// Image types accepted as inline data.
    pub const IMAGES: [MimeType; 5] = [
        MimeType::Png,
        MimeType::Jpeg,
        MimeType::Heic,
        MimeType::Heif,
        MimeType::Webp,
    ];

    /// Resolves a file extension (without dot, any case).
    pub fn from_extension(extension: &str) -> Option<MimeType> {
        let mime = match extension.to_ascii_lowercase().as_str() {
            "pdf" => MimeType::Pdf,
            "txt" => MimeType::Txt,
            "html" | "htm" => MimeType::Html,
            "css" => MimeType::Css,
            "md" => MimeType::Md,
            "csv" => MimeType::Csv,
            "xml" => MimeType::Xml,
            "rtf" => MimeType::Rtf,
            "png" => MimeType::Png,
            "jpeg" | "jpg" => MimeType::Jpeg,
            "heif" => MimeType::Heif,
            "heic" => MimeType::Heic,
            "webp" => MimeType::Webp,
            "mp4" => MimeType::Mp4,
            "mpeg" => MimeType::Mpeg,
            "mov" => MimeType::Mov,
            "avi" => MimeType::Avi,
            "flv" => MimeType::Flv,
            "mpg" => MimeType::Mpg,
            "webm" => MimeType::Webm,
            "wmv" => MimeType::Wmv,
            "3gp" | "3gpp" => MimeType::ThreeGpp,
            "wav" => MimeType::Wav,
            "mp3" => MimeType::Mp3,
            "aiff" => MimeType::Aiff,
            "aac" => MimeType::Aac,
            "ogg" => MimeType::Ogg,
            "flac" => MimeType::Flac,
            _ => return None,
        };
        Some(mime)
    }

    /// Resolves a wire string such as `image/png`.
    pub fn from_wire(value: &str) -> Option<MimeType> {
        Self::ALL
            .iter()
            .copied()
            .find(|mime| mime.wire_name().eq_ignore_ascii_case(value))
    }

    /// Whether this is a `video/*` type.
    pub fn is_video(&self) -> bool {
        self.wire_name().starts_with("video/")
    }

    /// Whether this type can be sent as an inline image.
    pub fn is_image(&self) -> bool {
        Self::IMAGES.contains(self)
    }
}

impl WireName for MimeType {
    fn wire_name(&self) -> &'static str {
        match self {
            MimeType::Pdf => "application/pdf",
            MimeType::Txt => "text/plain",
            MimeType::Html => "text/html",
            MimeType::Css => "text/css",
            MimeType::Md => "text/md",
            MimeType::Csv => "text/csv",
            MimeType::Xml => "text/xml",
            MimeType::Rtf => "text/rtf",
            MimeType::Png => "image/png",
            MimeType::Jpeg => "image/jpeg",
            MimeType::Heif => "image/heif",
            MimeType::Heic => "image/heic",
            MimeType::Webp => "image/webp",
            MimeType::Mp4 => "video/mp4",
            MimeType::Mpeg => "video/mpeg",
            MimeType::Mov => "video/mov",
            MimeType::Avi => "video/avi",
            MimeType::Flv => "video/x-flv",
            MimeType::Mpg => "video/mpg",
            MimeType::Webm => "video/webm",
            MimeType::Wmv => "video/wmv",
            MimeType::ThreeGpp => "video/3gpp",
            MimeType::Wav => "audio/wav",
            MimeType::Mp3 => "audio/mp3",
            MimeType::Aiff => "audio/aiff",
            MimeType::Aac => "audio/aac",
            MimeType::Ogg => "audio/ogg",
            MimeType::Flac => "audio/flac",
        }
    }
}

/// MIME type of a structured response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResponseMimeType {
    /// Structured JSON output.
    #[serde(rename = "application/json")]
    Json,
    /// Plain text output.
    #[serde(rename = "text/plain")]
    Text,
}

impl WireName for ResponseMimeType {
    fn wire_name(&self) -> &'static str {
        match self {
            ResponseMimeType::Json => "application/json",
            ResponseMimeType::Text => "text/plain",
        }
    }
}

impl WireName for Role {
    fn wire_name(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

impl WireName for HarmCategory {
    fn wire_name(&self) -> &'static str {
        match self {
            HarmCategory::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
            HarmCategory::Harassment => "HARM_CATEGORY_HARASSMENT",
            HarmCategory::CivicIntegrity => "HARM_CATEGORY_CIVIC_INTEGRITY",
            HarmCategory::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
            HarmCategory::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        }
    }
}

impl WireName for HarmBlockThreshold {
    fn wire_name(&self) -> &'static str {
        match self {
            HarmBlockThreshold::BlockNone => "BLOCK_NONE",
            HarmBlockThreshold::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
            HarmBlockThreshold::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            HarmBlockThreshold::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
        }
    }
}

impl WireName for FunctionCallingMode {
    fn wire_name(&self) -> &'static str {
        match self {
            FunctionCallingMode::Auto => "AUTO",
            FunctionCallingMode::Any => "ANY",
            FunctionCallingMode::None => "NONE",
        }
    }
}

impl WireName for FileState {
    fn wire_name(&self) -> &'static str {
        match self {
            FileState::StateUnspecified => "STATE_UNSPECIFIED",
            FileState::Processing => "PROCESSING",
            FileState::Active => "ACTIVE",
            FileState::Failed => "FAILED",
        }
    }
}
