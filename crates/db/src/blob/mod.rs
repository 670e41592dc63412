//! Key-value blob storage.
//!
//! Keys are `/`-separated paths such as `collections/orders.json` or
//! `claims/nimali@example.com.json`. Backends must make
//! [`BlobStore::put_if_absent`] atomic: it is the primitive that keeps an
//! email from claiming twice.

mod local;
mod memory;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

pub use local::LocalBlobStore;
pub use memory::MemoryBlobStore;

use crate::error::StoreError;

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read a blob; `None` when the key does not exist.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Create or replace a blob. Readers see either the old or the new bytes.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError>;

    /// Create a blob only if the key is free. Returns `false` (and writes
    /// nothing) when the key already exists.
    async fn put_if_absent(&self, key: &str, bytes: Vec<u8>) -> Result<bool, StoreError>;

    /// Remove a blob; returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Keys directly under `prefix` (which must end in `/`), sorted.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError>;

    /// Cheap reachability check.
    async fn ping(&self) -> Result<(), StoreError>;
}

fn is_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '%' | '@' | '+')
}

/// Reject keys that could escape the store root or hide as dotfiles.
pub fn validate_key(key: &str) -> Result<(), StoreError> {
    let invalid = || StoreError::InvalidKey(key.to_string());

    if key.is_empty() || key.starts_with('/') || key.ends_with('/') {
        return Err(invalid());
    }
    for segment in key.split('/') {
        if segment.is_empty() || segment.starts_with('.') || !segment.chars().all(is_key_char) {
            return Err(invalid());
        }
    }
    Ok(())
}

/// Validate a listing prefix: a valid key followed by `/`.
pub fn validate_prefix(prefix: &str) -> Result<(), StoreError> {
    match prefix.strip_suffix('/') {
        Some(dir) => validate_key(dir),
        None => Err(StoreError::InvalidKey(prefix.to_string())),
    }
}

/// Percent-encode a user-derived value for use as one key segment.
///
/// Lowercase ASCII letters, digits, `.`, `_`, `-`, `@` and `+` pass through;
/// everything else becomes `%XX`. A leading `.` is encoded too.
pub fn encode_key_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for (i, byte) in raw.bytes().enumerate() {
        let passthrough = matches!(byte, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'@' | b'+')
            || (byte == b'.' && i > 0);
        if passthrough {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Longest encoded segment kept verbatim. Leaves room for a `.json`
/// suffix and the local backend's temp-file name within a 255-byte
/// filename.
pub const MAX_ENCODED_SEGMENT: usize = 160;

/// Key segment for a user-derived value, bounded in length.
///
/// Short values are [`encode_key_segment`]ed and stay readable. Longer ones
/// become `h-` plus the SHA-256 hex digest of the raw value.
pub fn bounded_key_segment(raw: &str) -> String {
    let encoded = encode_key_segment(raw);
    if encoded.len() <= MAX_ENCODED_SEGMENT {
        return encoded;
    }
    let hash = Sha256::digest(raw.as_bytes());
    format!("h-{hash:x}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_nested_keys() {
        assert!(validate_key("collections/orders.json").is_ok());
        assert!(validate_key("claims/a%40b.json").is_ok());
    }

    #[test]
    fn rejects_traversal_and_odd_keys() {
        for key in ["", "/abs", "dir/", "a//b", "../x", "a/../b", "a/.hidden", "sp ace"] {
            assert_matches!(validate_key(key), Err(StoreError::InvalidKey(_)), "{key}");
        }
    }

    #[test]
    fn prefix_must_end_with_slash() {
        assert!(validate_prefix("claims/").is_ok());
        assert!(validate_prefix("claims").is_err());
        assert!(validate_prefix("/").is_err());
    }

    #[test]
    fn encoding_keeps_emails_readable() {
        assert_eq!(encode_key_segment("nimali@example.com"), "nimali@example.com");
        assert_eq!(encode_key_segment("a/b"), "a%2Fb");
        assert_eq!(encode_key_segment("..x"), "%2E.x");
        assert_eq!(encode_key_segment("UP"), "%55%50");
    }

    #[test]
    fn long_segments_fall_back_to_digest() {
        let short = "nimali@example.com";
        assert_eq!(bounded_key_segment(short), short);

        let long = format!("{}@example.lk", "a".repeat(240));
        let segment = bounded_key_segment(&long);
        assert!(segment.starts_with("h-"));
        assert_eq!(segment.len(), 66);
        assert_eq!(segment, bounded_key_segment(&long));
        assert_ne!(segment, bounded_key_segment(&format!("b{long}")));

        let wide = format!("{}@x.lk", "ü".repeat(60));
        assert!(encode_key_segment(&wide).len() > MAX_ENCODED_SEGMENT);
        assert!(validate_key(&format!("claims/{}.json", bounded_key_segment(&wide))).is_ok());
    }

    #[test]
    fn encoded_segments_are_valid_keys() {
        for raw in ["weird/../email@x.com", ".hidden", "tab\there", "ünï@x.lk"] {
            let key = format!("claims/{}", encode_key_segment(raw));
            assert!(validate_key(&key).is_ok(), "{key}");
        }
    }
}
