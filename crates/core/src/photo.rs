//! Photo gallery moderation statuses and upload checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum caption length (characters).
pub const MAX_CAPTION_LENGTH: usize = 280;

/// File extensions accepted by the upload proxy.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "heic"];

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Moderation state of a submitted photo.
///
/// New submissions start as `pending`; only `approved` photos are shown in
/// the public gallery. Admins may move a photo between any two states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoStatus {
    Pending,
    Approved,
    Rejected,
}

impl PhotoStatus {
    pub const ALL: [PhotoStatus; 3] = [Self::Pending, Self::Approved, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_public(self) -> bool {
        self == Self::Approved
    }
}

impl fmt::Display for PhotoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Upload validation
// ---------------------------------------------------------------------------

/// Validate an uploaded image and return its lowercased extension.
pub fn validate_image_upload(
    filename: &str,
    size_bytes: usize,
    max_bytes: usize,
) -> Result<String, CoreError> {
    if size_bytes == 0 {
        return Err(CoreError::Validation("Uploaded file is empty".into()));
    }
    if size_bytes > max_bytes {
        return Err(CoreError::Validation(format!(
            "Uploaded file is {size_bytes} bytes; the limit is {max_bytes} bytes"
        )));
    }

    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported image format '.{ext}'. Supported: {ALLOWED_IMAGE_EXTENSIONS:?}"
        )));
    }

    Ok(ext)
}

/// MIME type for an accepted image extension.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "heic" => "image/heic",
        _ => "application/octet-stream",
    }
}
