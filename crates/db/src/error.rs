use cafe_core::error::CoreError;

/// Errors from the blob store and document (de)serialization.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt document '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode document '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid blob key '{0}'")]
    InvalidKey(String),

    #[error("Could not allocate a unique key after {0} attempts")]
    KeyExhausted(usize),
}

/// Repository error: either the store failed or a domain rule rejected the
/// change (checked while the collection lock is held).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Core(#[from] CoreError),
}
