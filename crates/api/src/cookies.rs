//! Like/upvote dedup cookies.
//!
//! Each board keeps its own cookie holding the ids this browser has already
//! liked (see [`LikedSet`]). The cookie is a convenience guard, not an
//! identity: clearing cookies allows liking again.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use cafe_core::likes::LikedSet;

use crate::error::AppError;

pub const PHOTO_LIKES_COOKIE: &str = "cc_liked_photos";
pub const PROJECT_LIKES_COOKIE: &str = "cc_liked_projects";
pub const QUESTION_UPVOTES_COOKIE: &str = "cc_upvoted_questions";

/// Cookie lifetime: 30 days.
const MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// Value of the named cookie from any `Cookie` header.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
}

/// The ids this browser has liked on one board.
pub fn liked_set(headers: &HeaderMap, name: &str) -> LikedSet {
    read_cookie(headers, name)
        .map(|value| LikedSet::parse(&value))
        .unwrap_or_default()
}

/// `Set-Cookie` value storing `liked` under `name`.
pub fn set_cookie(name: &str, liked: &LikedSet, secure: bool) -> Result<HeaderValue, AppError> {
    let mut cookie = format!(
        "{name}={}; Path=/; Max-Age={MAX_AGE_SECS}; HttpOnly; SameSite=Lax",
        liked.render()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid cookie header: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cookies: &[&str]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for c in cookies {
            map.append(COOKIE, HeaderValue::from_str(c).unwrap());
        }
        map
    }

    #[test]
    fn reads_named_cookie_among_others() {
        let map = headers(&["theme=dark; cc_liked_photos=a1.b2", "other=1"]);
        assert_eq!(read_cookie(&map, PHOTO_LIKES_COOKIE), Some("a1.b2".into()));
        assert_eq!(read_cookie(&map, PROJECT_LIKES_COOKIE), None);
        assert_eq!(liked_set(&map, PHOTO_LIKES_COOKIE).len(), 2);
    }

    #[test]
    fn missing_cookie_is_empty_set() {
        assert!(liked_set(&HeaderMap::new(), QUESTION_UPVOTES_COOKIE).is_empty());
    }

    #[test]
    fn set_cookie_attributes() {
        let liked = LikedSet::parse("x1.y2");
        let value = set_cookie(PHOTO_LIKES_COOKIE, &liked, true).unwrap();
        let value = value.to_str().unwrap();
        assert!(value.starts_with("cc_liked_photos=x1.y2;"));
        assert!(value.contains("HttpOnly"));
        assert!(value.ends_with("; Secure"));

        let plain = set_cookie(PHOTO_LIKES_COOKIE, &liked, false).unwrap();
        assert!(!plain.to_str().unwrap().contains("Secure"));
    }
}
