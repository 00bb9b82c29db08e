use crate::error::{DesignError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

const DEFAULT_MIME: &str = "application/octet-stream";

/// `data:<mime>;base64,<payload>` text used to ship uploaded photos and floor plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataUri(String);

impl DataUri {
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        DataUri(format!("data:{};base64,{}", mime, BASE64.encode(bytes)))
    }

    /// Reads the whole file and encodes it, guessing the MIME type from the extension.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DesignError::Io(format!("failed reading {}: {}", path.display(), e)))?;
        let mime = mime_for_path(path).unwrap_or(DEFAULT_MIME);
        log::debug!(
            "Encoded {} ({} bytes, {}) as data URI",
            path.display(),
            bytes.len(),
            mime
        );
        Ok(Self::from_bytes(mime, &bytes))
    }

    /// Like [`DataUri::from_file`], but refuses files that do not map to an `image/*` type
    /// before reading them.
    pub async fn image_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        image_mime_for_path(path)?;
        Self::from_file(path).await
    }

    /// Accepts only well-formed base64 data URIs.
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        split(&value)?;
        Ok(DataUri(value))
    }

    pub fn mime(&self) -> &str {
        split(&self.0).map(|(mime, _)| mime).unwrap_or(DEFAULT_MIME)
    }

    pub fn decode(&self) -> Result<Vec<u8>> {
        let (_, payload) = split(&self.0)?;
        BASE64
            .decode(payload)
            .map_err(|e| DesignError::Serialization(format!("invalid base64 payload: {}", e)))
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(self.mime())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub fn is_data_uri(value: &str) -> bool {
    value.trim_start().to_ascii_lowercase().starts_with("data:")
}

fn split(value: &str) -> Result<(&str, &str)> {
    let rest = value
        .strip_prefix("data:")
        .ok_or_else(|| DesignError::Serialization("data URI must start with 'data:'".into()))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| DesignError::Serialization("data URI has no payload".into()))?;
    let mime = header.strip_suffix(";base64").ok_or_else(|| {
        DesignError::Serialization("only base64 data URIs are supported".into())
    })?;
    Ok((if mime.is_empty() { DEFAULT_MIME } else { mime }, payload))
}

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "avif" => Some("image/avif"),
        "heic" => Some("image/heic"),
        "heif" => Some("image/heif"),
        "ico" => Some("image/x-icon"),
        "pdf" => Some("application/pdf"),
        _ => None,
    }
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// The backend only decodes `data:image/...` uploads and silently ignores anything else.
pub fn image_mime_for_path(path: &Path) -> Result<&'static str> {
    mime_for_path(path)
        .filter(|mime| is_image_mime(mime))
        .ok_or_else(|| DesignError::Invalid(format!("{} is not a supported image file", path.display())))
}

/// File extension to use when writing decoded image bytes back to disk.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/tiff" => "tiff",
        "image/avif" => "avif",
        "image/heic" => "heic",
        "image/heif" => "heif",
        "image/x-icon" => "ico",
        "application/pdf" => "pdf",
        "image/png" => "png",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_bytes_with_mime() {
        let uri = DataUri::from_bytes("image/png", b"hello");
        assert_eq!(uri.as_str(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(uri.mime(), "image/png");
        assert_eq!(uri.decode().unwrap(), b"hello");
    }

    #[test]
    fn parse_rejects_non_base64_uris() {
        assert!(DataUri::parse("https://example.com/a.png").is_err());
        assert!(DataUri::parse("data:image/png,rawbytes").is_err());
        assert!(DataUri::parse("data:image/png;base64").is_err());
        assert!(DataUri::parse("data:image/jpeg;base64,AAAA").is_ok());
    }

    #[test]
    fn mime_from_extension() {
        assert_eq!(mime_for_path(Path::new("plan.PNG")), Some("image/png"));
        assert_eq!(mime_for_path(Path::new("room.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_for_path(Path::new("drawing.dwg")), None);
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert!(is_data_uri("  DATA:image/png;base64,AA"));
    }

    #[tokio::test]
    async fn reads_files_into_data_uris() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("living-room.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let uri = DataUri::from_file(&path).await.unwrap();
        assert_eq!(uri.mime(), "image/jpeg");
        assert_eq!(uri.decode().unwrap(), vec![0xFF, 0xD8, 0xFF]);

        let unknown = dir.path().join("plan.dwg");
        std::fs::write(&unknown, b"cad").unwrap();
        let uri = DataUri::from_file(&unknown).await.unwrap();
        assert_eq!(uri.mime(), "application/octet-stream");
    }

    #[test]
    fn less_common_photo_formats_are_images() {
        for (name, mime) in [
            ("living-room.bmp", "image/bmp"),
            ("scan.TIF", "image/tiff"),
            ("scan.tiff", "image/tiff"),
            ("phone.heic", "image/heic"),
            ("phone.heif", "image/heif"),
            ("web.avif", "image/avif"),
            ("favicon.ico", "image/x-icon"),
        ] {
            assert_eq!(image_mime_for_path(Path::new(name)).unwrap(), mime);
        }
        assert!(matches!(
            image_mime_for_path(Path::new("plan.pdf")),
            Err(DesignError::Invalid(_))
        ));
        assert!(image_mime_for_path(Path::new("plan.dwg")).is_err());
        assert!(image_mime_for_path(Path::new("no-extension")).is_err());
    }

    #[tokio::test]
    async fn image_reader_refuses_non_images_without_reading() {
        let dir = tempfile::tempdir().unwrap();
        let bmp = dir.path().join("living-room.bmp");
        std::fs::write(&bmp, b"BM").unwrap();
        let uri = DataUri::image_from_file(&bmp).await.unwrap();
        assert!(uri.as_str().starts_with("data:image/bmp;base64,"));
        assert!(uri.is_image());

        let err = DataUri::image_from_file(dir.path().join("missing.dwg"))
            .await
            .unwrap_err();
        assert!(matches!(err, DesignError::Invalid(_)));
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataUri::from_file(dir.path().join("nope.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, DesignError::Io(_)));
    }
}
