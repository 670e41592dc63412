pub mod admin;
pub mod attendees;
pub mod auth;
pub mod claims;
pub mod event;
pub mod health;
pub mod orders;
pub mod photos;
pub mod projects;
pub mod questions;
pub mod uploads;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /event                                 event info + countdown (public)
/// /menu                                  meal menu (public)
///
/// /auth/login                            staff login (public)
///
/// /attendees/verify                      roster check (public)
///
/// /claims/verify                         claim eligibility (public)
/// /claims                                confirm a claim (POST, public)
/// /claims/token/{token}                  meal token lookup (public)
///
/// /orders                                kitchen queue, walk-in (staff)
/// /orders/{id}                           get (staff)
/// /orders/{id}/status                    transition (PUT, staff)
///
/// /photos                                gallery, submit (public)
/// /photos/{id}/like                      like (POST, public)
/// /uploads                               image upload proxy (POST, public)
///
/// /projects                              list, share (public)
/// /projects/{id}                         get (public)
/// /projects/{id}/like                    like (POST, public)
///
/// /questions                             list, ask (public)
/// /questions/{id}/upvote                 upvote (POST, public)
///
/// /admin/stats                           dashboard counts (admin)
/// /admin/attendees                       roster (admin)
/// /admin/attendees/import                CSV import (POST, admin)
/// /admin/claims/{email}                  revoke (DELETE, admin)
/// /admin/photos                          moderation queue (admin)
/// /admin/photos/{id}                     delete (admin)
/// /admin/photos/{id}/status              approve / reject (PUT, admin)
/// /admin/projects/{id}                   delete (admin)
/// /admin/questions                       all questions (admin)
/// /admin/questions/{id}                  answer / hide, delete (admin)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        // Landing page.
        .merge(event::router())
        // Staff login.
        .nest("/auth", auth::router())
        // Roster check and meal claims.
        .nest("/attendees", attendees::router())
        .nest("/claims", claims::router())
        // Kitchen queue.
        .nest("/orders", orders::router())
        // Gallery and the upload proxy.
        .nest("/photos", photos::router())
        .nest("/uploads", uploads::router(config.max_upload_bytes))
        // Community boards.
        .nest("/projects", projects::router())
        .nest("/questions", questions::router())
        // Admin console.
        .nest("/admin", admin::router())
}
