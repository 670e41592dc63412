//! Stored records and request DTOs.
//!
//! Each submodule contains:
//! - A `Serialize + Deserialize` record struct as kept in the store
//! - `Deserialize + Validate` DTOs for request bodies
//! - `Deserialize` list params for query strings

pub mod attendee;
pub mod claim;
pub mod order;
pub mod photo;
pub mod project;
pub mod question;

use std::borrow::Cow;

use cafe_core::email::is_valid_email;
use validator::{ValidateUrl, ValidationError};

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Reject empty and whitespace-only strings.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("blank", "must not be blank"));
    }
    Ok(())
}

/// Accept absolute `http` / `https` URLs with a host.
pub fn validate_web_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let lower = value.to_ascii_lowercase();
    let web_scheme = ["https://", "http://"].iter().any(|scheme| {
        lower
            .strip_prefix(scheme)
            .is_some_and(|rest| !rest.is_empty() && !rest.starts_with('/'))
    });
    if web_scheme && value.validate_url() {
        Ok(())
    } else {
        Err(validation_error("url", "must be an http(s) URL"))
    }
}

pub fn validate_email_input(value: &str) -> Result<(), ValidationError> {
    if !is_valid_email(value) {
        return Err(validation_error("email", "must be a valid email address"));
    }
    Ok(())
}

/// Trim an optional free-text field, folding blank input to `None`.
pub fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
