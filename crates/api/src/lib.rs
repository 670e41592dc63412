//! Cafe Cursor Colombo API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes,
//! router) so integration tests, the server binary and the admin CLIs can
//! all reach them.

pub mod auth;
pub mod config;
pub mod cookies;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod image_host;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
