use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cafe_core::error::CoreError;
use cafe_db::{RepoError, StoreError};
use serde::Serialize;
use serde_json::json;
use validator::ValidationErrors;

use crate::image_host::ImageHostError;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses:
///
/// ```json
/// { "error": "...", "code": "NOT_REGISTERED" }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cafe_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A blob store or document error.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Request body failed schema validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Uploading to the image host failed.
    #[error("Image host error: {0}")]
    ImageHost(#[from] ImageHostError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Store(e) => Self::Store(e),
            RepoError::Core(e) => Self::Core(e),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// One entry of the `details` list on a validation error.
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Flatten validator output into a stable, field-sorted list.
fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut details: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                code: e.code.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid")),
            })
        })
        .collect();
    details.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    details
}

fn internal(err: &dyn std::fmt::Display, context: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "{context}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::NotRegistered(identifier) => (
                    StatusCode::FORBIDDEN,
                    "NOT_REGISTERED",
                    format!("'{identifier}' is not on the attendee list"),
                ),
                CoreError::AlreadyClaimed(email) => (
                    StatusCode::CONFLICT,
                    "ALREADY_CLAIMED",
                    format!("A meal has already been claimed for {email}"),
                ),
                CoreError::Internal(msg) => internal(msg, "Internal core error"),
            },

            // --- Schema validation ---
            AppError::Validation(errors) => {
                details = Some(field_errors(errors));
                (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    "Request validation failed".to_string(),
                )
            }

            // --- Infrastructure errors ---
            AppError::Store(err) => internal(err, "Storage error"),
            AppError::ImageHost(err) => internal(err, "Image host error"),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => internal(msg, "Internal error"),
        };

        let body = match details {
            Some(details) => json!({
                "error": message,
                "code": code,
                "details": details,
            }),
            None => json!({
                "error": message,
                "code": code,
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use validator::Validate;

    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 3, message = "too short"))]
        name: String,
        #[validate(range(min = 1))]
        count: u32,
    }

    #[tokio::test]
    async fn domain_errors_map_to_distinct_codes() {
        let response = AppError::Core(CoreError::NotRegistered("x@example.com".into())).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["code"], "NOT_REGISTERED");

        let response = AppError::Core(CoreError::AlreadyClaimed("x@example.com".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["code"], "ALREADY_CLAIMED");
    }

    #[tokio::test]
    async fn internal_errors_are_sanitized() {
        let err = AppError::Store(StoreError::InvalidKey("secret/path".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["error"], INTERNAL_MESSAGE);
        assert!(!json.to_string().contains("secret/path"));
    }

    #[tokio::test]
    async fn validation_errors_list_fields() {
        let errors = Sample {
            name: "ab".into(),
            count: 0,
        }
        .validate()
        .unwrap_err();

        let response = AppError::from(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        let details = json["details"].as_array().unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0]["field"], "count");
        assert_eq!(details[0]["code"], "range");
        assert_eq!(details[1]["field"], "name");
        assert_eq!(details[1]["message"], "too short");
    }
}
