//! Gallery photo records and DTOs.

use cafe_core::photo::{PhotoStatus, MAX_CAPTION_LENGTH};
use cafe_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_web_url;

/// `validator` length bounds are `u64`.
const CAPTION_LIMIT: u64 = MAX_CAPTION_LENGTH as u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: RecordId,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader_name: Option<String>,
    pub status: PhotoStatus,
    #[serde(default)]
    pub likes: u32,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<Timestamp>,
}

/// Body of `POST /photos`. New photos wait for moderation.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePhoto {
    #[validate(custom(function = "validate_web_url"))]
    pub url: String,
    #[validate(length(max = CAPTION_LIMIT, message = "caption is too long"))]
    pub caption: Option<String>,
    #[validate(length(max = 80, message = "must be at most 80 characters"))]
    pub uploader_name: Option<String>,
}

/// Body of `PUT /admin/photos/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdatePhotoStatus {
    pub status: PhotoStatus,
}

/// Query parameters for the admin photo list.
#[derive(Debug, Default, Deserialize)]
pub struct PhotoListParams {
    pub status: Option<PhotoStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
