//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Result of a like or upvote.
#[derive(Debug, Serialize)]
pub struct LikeResponse<T: Serialize> {
    /// The record after the request.
    pub item: T,
    /// `false` when this browser had already liked the record and the count
    /// was left alone.
    pub counted: bool,
}
