#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The email or ticket code is not on the attendee roster.
    #[error("Not registered: {0}")]
    NotRegistered(String),

    /// A meal has already been claimed for this email.
    #[error("Already claimed: {0}")]
    AlreadyClaimed(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
