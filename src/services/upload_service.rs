//! src/services/upload_service.rs
//!
//! UploadService — validates uploaded images and turns them into references
//! the store can hold. There is no remote object storage behind it: the
//! payload is returned inline as a `data:` URL, which callers must treat as an
//! opaque reference like any other image URL.

use base64::{Engine as _, engine::general_purpose};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_MAX_IMAGE_BYTES: usize = 8 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];
const MAX_OBJECT_KEY_LEN: usize = 1024;
const KIB: usize = 1024;
const MIB: usize = 1024 * KIB;

#[derive(Debug, Error, PartialEq)]
pub enum UploadError {
    #[error("File is too large. Maximum size is {limit}.")]
    TooLarge { size: usize, limit: String },
    #[error("Unsupported file type. Please use JPG, PNG, or WebP.")]
    UnsupportedType(Option<String>),
    #[error("File is empty.")]
    Empty,
    #[error("invalid file name `{0}`")]
    InvalidFileName(String),
}

pub type UploadResult<T> = Result<T, UploadError>;

/// Result of a successful upload.
#[derive(Serialize, Debug, Clone)]
pub struct UploadedImage {
    /// Directly usable as an event background or photo url.
    pub url: String,
    pub content_type: String,
    pub size_bytes: usize,
    /// MD5 of the payload.
    pub etag: String,
}

#[derive(Clone, Debug)]
pub struct UploadService {
    max_bytes: usize,
}

impl Default for UploadService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_IMAGE_BYTES)
    }
}

impl UploadService {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate size and type, then encode the image as a `data:` URL.
    ///
    /// When the client sends no content type it is guessed from the file
    /// name's extension.
    pub fn upload_image(
        &self,
        file_name: Option<&str>,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> UploadResult<UploadedImage> {
        if bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: bytes.len(),
                limit: format_limit(self.max_bytes),
            });
        }
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }

        let content_type = resolve_content_type(file_name, content_type)?;
        let etag = format!("{:x}", md5::compute(bytes));
        let url = format!(
            "data:{};base64,{}",
            content_type,
            general_purpose::STANDARD.encode(bytes)
        );
        debug!(
            "accepted {} upload of {} bytes ({})",
            content_type,
            bytes.len(),
            etag
        );

        Ok(UploadedImage {
            url,
            content_type,
            size_bytes: bytes.len(),
            etag,
        })
    }
}

/// Human-readable upload limit, rounded up so it never understates the cap:
/// whole megabytes, tenths of a megabyte, or kilobytes below one megabyte.
fn format_limit(bytes: usize) -> String {
    if bytes >= MIB && bytes % MIB == 0 {
        return format!("{} MB", bytes / MIB);
    }
    if bytes >= MIB {
        let tenths = (bytes * 10).div_ceil(MIB);
        return if tenths % 10 == 0 {
            format!("{} MB", tenths / 10)
        } else {
            format!("{}.{} MB", tenths / 10, tenths % 10)
        };
    }
    format!("{} KB", bytes.div_ceil(KIB))
}

/// Storage key for a gallery photo: `events/{event_id}/{file_name}`.
pub fn photo_object_key(event_id: Uuid, file_name: &str) -> UploadResult<String> {
    ensure_file_name_safe(file_name)?;
    let key = format!("events/{}/{}", event_id, file_name);
    if key.len() > MAX_OBJECT_KEY_LEN {
        return Err(UploadError::InvalidFileName(file_name.to_string()));
    }
    Ok(key)
}

/// Reject names that could escape the event's key prefix.
fn ensure_file_name_safe(file_name: &str) -> UploadResult<()> {
    let invalid = || UploadError::InvalidFileName(file_name.to_string());
    if file_name.trim().is_empty() {
        return Err(invalid());
    }
    if file_name.contains('/') || file_name.contains("..") {
        return Err(invalid());
    }
    if file_name
        .bytes()
        .any(|b| b.is_ascii_control() || b == b'\\' || b == b'\0')
    {
        return Err(invalid());
    }
    Ok(())
}

fn resolve_content_type(file_name: Option<&str>, declared: Option<&str>) -> UploadResult<String> {
    let declared = declared
        .and_then(|value| value.split(';').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty() && value != "application/octet-stream");

    let content_type = declared.or_else(|| {
        file_name
            .and_then(|name| mime_guess::from_path(name).first())
            .map(|mime| mime.essence_str().to_string())
    });

    match content_type {
        Some(ct) if ALLOWED_IMAGE_TYPES.contains(&ct.as_str()) => Ok(ct),
        other => Err(UploadError::UnsupportedType(other)),
    }
}
