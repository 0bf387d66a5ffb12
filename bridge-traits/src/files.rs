//! Cover-file picking contract.
//!
//! Creating a playlist may involve choosing a cover image through the OS
//! picker. The picker hands the core a fully read file (name, MIME type,
//! bytes); uploading it and recording the resulting object key is the
//! core's job, not the picker's.

use crate::error::Result;
use bytes::Bytes;

/// A cover image chosen by the user, read into memory by the host.
#[derive(Debug, Clone)]
pub struct PickedCover {
    /// File name including extension, e.g. `sunset.jpg`.
    pub file_name: String,
    /// MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    /// Raw file contents.
    pub data: Bytes,
}

impl PickedCover {
    /// Build a picked cover from a platform file URI and its contents,
    /// inferring name and MIME type from the URI.
    pub fn from_uri(uri: &str, data: Bytes) -> Self {
        Self {
            file_name: infer_file_name(uri),
            content_type: infer_content_type(uri).to_string(),
            data,
        }
    }
}

/// OS image-picker capability.
#[async_trait::async_trait]
pub trait CoverPicker: Send + Sync {
    /// Open the platform picker and return the chosen image, or `Ok(None)`
    /// if the user cancelled.
    async fn pick_cover(&self) -> Result<Option<PickedCover>>;
}

/// Derive a usable file name from a local file URI.
///
/// Falls back to a `.jpg` extension when the last path segment has none,
/// since pickers on some platforms hand out extension-less content URIs.
pub fn infer_file_name(uri: &str) -> String {
    let last = uri
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("cover");
    if last.contains('.') {
        last.to_string()
    } else {
        format!("{last}.jpg")
    }
}

/// Guess the MIME type from a file URI's extension, defaulting to JPEG.
pub fn infer_content_type(uri: &str) -> &'static str {
    let ext = uri
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "image/jpeg",
    }
}
