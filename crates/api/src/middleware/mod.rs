//! Authentication and authorization extractors.
//!
//! - [`auth::StaffUser`] -- Extracts the staff role from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireStaff`] -- Requires `kitchen` or `admin`.

pub mod auth;
pub mod rbac;
