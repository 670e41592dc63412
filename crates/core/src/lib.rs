//! Domain rules for the Cafe Cursor event companion.
//!
//! Everything in this crate is pure: no I/O, no async. The `db` crate
//! persists records shaped by these rules and the `api` crate exposes them.

pub mod claim;
pub mod countdown;
pub mod email;
pub mod error;
pub mod likes;
pub mod menu;
pub mod order;
pub mod photo;
pub mod question;
pub mod roles;
pub mod roster;
pub mod search;
pub mod types;
