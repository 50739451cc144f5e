//! Image decoding and media-type detection for inline image parts.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::Path;

use crate::error::{GeminiError, GeminiResult, ResourceError};
use crate::types::{ImageData, MimeType, WireName};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

/// Parses a base64 image, with or without a `data:image/...;base64,` prefix.
///
/// A data-URI prefix decides the type and must name a supported image type.
/// Without one, the type is sniffed from the decoded bytes, falling back to JPEG.
pub fn image_from_base64(input: &str) -> GeminiResult<ImageData> {
    let input = input.trim();
    if input.is_empty() {
        return Err(GeminiError::invalid_argument("images", "image data is empty"));
    }

    let (declared, payload) = match split_data_uri(input)? {
        Some((mime, payload)) => (Some(mime), payload),
        None => (None, input),
    };

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| GeminiError::invalid_argument("images", format!("invalid base64 image: {e}")))?;

    let mime_type = declared.unwrap_or_else(|| sniff_image_type(&bytes).unwrap_or(MimeType::Jpeg));

    Ok(ImageData {
        mime_type,
        base64_data: payload.to_string(),
    })
}

/// Reads an image file; the extension decides the type.
pub fn image_from_path(path: &Path) -> GeminiResult<ImageData> {
    let display = path.display().to_string();

    let mime_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(MimeType::from_extension)
        .filter(MimeType::is_image)
        .ok_or_else(|| {
            GeminiError::invalid_argument("images", format!("{display} is not a supported image type"))
        })?;

    if !path.is_file() {
        return Err(ResourceError::FileNotFound { path: display }.into());
    }

    let bytes = std::fs::read(path).map_err(|e| ResourceError::FileReadFailed {
        path: display,
        message: e.to_string(),
    })?;

    Ok(ImageData {
        mime_type,
        base64_data: STANDARD.encode(bytes),
    })
}

fn split_data_uri(input: &str) -> GeminiResult<Option<(MimeType, &str)>> {
    let Some(prefix) = input.get(..5) else {
        return Ok(None);
    };
    if !prefix.eq_ignore_ascii_case("data:") {
        return Ok(None);
    }

    let (header, payload) = input
        .split_once(',')
        .ok_or_else(|| GeminiError::invalid_argument("images", "data URI has no payload"))?;

    let media = header[5..].split(';').next().unwrap_or_default();
    let mime_type = MimeType::from_wire(media)
        .filter(MimeType::is_image)
        .ok_or_else(|| {
            GeminiError::invalid_argument(
                "images",
                format!(
                    "unsupported image type `{media}`; expected one of {}",
                    MimeType::IMAGES.map(|m| m.wire_name()).join(", ")
                ),
            )
        })?;

    Ok(Some((mime_type, payload)))
}

fn sniff_image_type(bytes: &[u8]) -> Option<MimeType> {
    if bytes.starts_with(PNG_MAGIC) {
        return Some(MimeType::Png);
    }
    if bytes.starts_with(JPEG_MAGIC) {
        return Some(MimeType::Jpeg);
    }
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some(MimeType::Webp);
    }
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return match &bytes[8..12] {
            b"heic" | b"heix" | b"hevc" | b"hevx" => Some(MimeType::Heic),
            b"mif1" | b"msf1" | b"heif" => Some(MimeType::Heif),
            _ => None,
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn png_bytes() -> Vec<u8> {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.extend_from_slice(b"rest-of-image");
        bytes
    }

    #[test]
    fn test_data_uri_decides_type() {
        let encoded = STANDARD.encode(png_bytes());
        let image = image_from_base64(&format!("data:image/webp;base64,{encoded}")).unwrap();

        assert_eq!(image.mime_type, MimeType::Webp);
        assert_eq!(image.base64_data, encoded);
    }

    #[test]
    fn test_unprefixed_png_is_sniffed() {
        let image = image_from_base64(&STANDARD.encode(png_bytes())).unwrap();
        assert_eq!(image.mime_type, MimeType::Png);
    }

    #[test]
    fn test_unrecognised_bytes_fall_back_to_jpeg() {
        let image = image_from_base64(&STANDARD.encode(b"plain bytes")).unwrap();
        assert_eq!(image.mime_type, MimeType::Jpeg);
    }

    #[test]
    fn test_heic_brand_is_sniffed() {
        let mut bytes = vec![0, 0, 0, 24];
        bytes.extend_from_slice(b"ftypheic");
        bytes.extend_from_slice(&[0; 8]);
        assert_eq!(sniff_image_type(&bytes), Some(MimeType::Heic));
    }

    #[test]
    fn test_unsupported_data_uri_type_rejected() {
        let encoded = STANDARD.encode(b"GIF89a");
        let result = image_from_base64(&format!("data:image/gif;base64,{encoded}"));
        assert!(matches!(result, Err(GeminiError::InvalidArgument { .. })));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(matches!(
            image_from_base64("not*base64!"),
            Err(GeminiError::InvalidArgument { .. })
        ));
        assert!(matches!(
            image_from_base64("   "),
            Err(GeminiError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_image_from_path_uses_extension() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(&png_bytes()).unwrap();

        let image = image_from_path(file.path()).unwrap();
        assert_eq!(image.mime_type, MimeType::Jpeg);
        assert_eq!(STANDARD.decode(image.base64_data).unwrap(), png_bytes());
    }

    #[test]
    fn test_image_from_path_rejects_non_images() {
        let file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        assert!(matches!(
            image_from_path(file.path()),
            Err(GeminiError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_missing_image_file() {
        let result = image_from_path(Path::new("/definitely/not/here.png"));
        assert!(matches!(
            result,
            Err(GeminiError::Resource(ResourceError::FileNotFound { .. }))
        ));
    }
}
