pub mod admin;
pub mod attendees;
pub mod auth;
pub mod claims;
pub mod event;
pub mod menu;
pub mod orders;
pub mod photos;
pub mod projects;
pub mod questions;
pub mod uploads;

use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cafe_core::types::RecordId;
use serde::Serialize;

use crate::cookies::{liked_set, set_cookie};
use crate::error::AppResult;
use crate::response::{DataResponse, LikeResponse};

/// Shared like/upvote flow for the public boards.
///
/// When the browser's cookie already lists `id`, `current` supplies the
/// record unchanged. Otherwise `increment` bumps the count and the cookie is
/// reissued with `id` added.
pub(crate) async fn cookie_deduped_like<T, Inc, IncFut, Cur, CurFut>(
    headers: &HeaderMap,
    cookie_name: &str,
    secure: bool,
    id: RecordId,
    increment: Inc,
    current: Cur,
) -> AppResult<Response>
where
    T: Serialize,
    Inc: FnOnce() -> IncFut,
    IncFut: std::future::Future<Output = AppResult<T>>,
    Cur: FnOnce() -> CurFut,
    CurFut: std::future::Future<Output = AppResult<T>>,
{
    let mut liked = liked_set(headers, cookie_name);
    let key = id.to_string();

    if liked.contains(&key) {
        let item = current().await?;
        let body = DataResponse {
            data: LikeResponse {
                item,
                counted: false,
            },
        };
        return Ok(Json(body).into_response());
    }

    let item = increment().await?;
    liked.insert(&key);
    let cookie = set_cookie(cookie_name, &liked, secure)?;

    let body = DataResponse {
        data: LikeResponse {
            item,
            counted: true,
        },
    };
    Ok(([(SET_COOKIE, cookie)], Json(body)).into_response())
}
