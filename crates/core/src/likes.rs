//! Per-browser like/upvote dedup.
//!
//! The ids a browser has already liked travel in a cookie as a `.`-joined
//! list. Commas are not legal in cookie values, dots never appear in ids.

/// Oldest ids are dropped beyond this many to keep the cookie small.
pub const MAX_TRACKED_IDS: usize = 100;

const SEPARATOR: char = '.';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikedSet {
    ids: Vec<String>,
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-'
}

impl LikedSet {
    /// Parse a cookie value, ignoring malformed and repeated entries.
    pub fn parse(value: &str) -> Self {
        let mut set = Self::default();
        for id in value.split(SEPARATOR) {
            if !id.is_empty() && id.chars().all(is_id_char) {
                set.insert(id);
            }
        }
        set
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Record `id`; returns `false` when it was already present.
    pub fn insert(&mut self, id: &str) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id.to_string());
        if self.ids.len() > MAX_TRACKED_IDS {
            let excess = self.ids.len() - MAX_TRACKED_IDS;
            self.ids.drain(..excess);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Cookie value form.
    pub fn render(&self) -> String {
        self.ids.join(&SEPARATOR.to_string())
    }
}
