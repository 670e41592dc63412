//! Email normalization and shape checks.
//!
//! Emails are the claim key, so every lookup goes through
//! [`normalize_email`] first.

use std::sync::LazyLock;

use regex::Regex;

/// RFC 5321 path limit.
pub const MAX_EMAIL_LENGTH: usize = 254;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("email pattern is a valid regex")
});

/// Trim surrounding whitespace and lowercase.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Loose `local@domain.tld` shape check on the trimmed input.
pub fn is_valid_email(raw: &str) -> bool {
    let trimmed = raw.trim();
    !trimmed.is_empty() && trimmed.len() <= MAX_EMAIL_LENGTH && EMAIL_RE.is_match(trimmed)
}

/// The part before `@`, or the whole input when there is none.
pub fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(normalize_email("  Alice@Example.COM \n"), "alice@example.com");
    }

    #[test]
    fn accepts_common_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.example.lk"));
        assert!(is_valid_email("  padded@example.com  "));
    }

    #[test]
    fn rejects_malformed() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("space in@example.com"));
        assert!(!is_valid_email("nodot@example"));
        assert!(!is_valid_email("trailing@example."));
    }

    #[test]
    fn rejects_overlong() {
        let long = format!("{}@example.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert!(!is_valid_email(&long));
    }

    #[test]
    fn local_part_splits_on_at() {
        assert_eq!(local_part("kasun@example.com"), "kasun");
        assert_eq!(local_part("plain"), "plain");
    }
}
