//! Image upload proxy. The browser posts the file here and gets back the
//! hosted URL, which it then submits to `POST /photos`.

use axum::extract::{Multipart, State};
use axum::Json;
use cafe_core::photo::{mime_for_extension, validate_image_upload};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::image_host::ImageHostError;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
}

/// POST /api/v1/uploads
///
/// Accepts a multipart form with a required `file` field.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<DataResponse<UploadedImage>>> {
    let client = state
        .image_host
        .clone()
        .ok_or(AppError::ImageHost(ImageHostError::NotConfigured))?;

    let mut file_data: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file_data = Some((filename, data.to_vec()));
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let ext = validate_image_upload(&filename, data.len(), state.config.max_upload_bytes)?;
    let size = data.len();
    let url = client
        .upload(&filename, mime_for_extension(&ext), data)
        .await?;

    tracing::info!(filename = %filename, size, "Image uploaded");
    Ok(Json(DataResponse {
        data: UploadedImage { url },
    }))
}
