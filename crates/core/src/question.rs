//! Q&A board statuses and ordering.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Maximum question length (characters).
pub const MAX_QUESTION_LENGTH: usize = 500;

/// Maximum answer length (characters).
pub const MAX_ANSWER_LENGTH: usize = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Open,
    Answered,
    /// Hidden by an admin; not shown on the board.
    Hidden,
}

impl QuestionStatus {
    pub const ALL: [QuestionStatus; 3] = [Self::Open, Self::Answered, Self::Hidden];

    pub fn is_visible(self) -> bool {
        self != Self::Hidden
    }
}

/// Work out the status after an admin edit.
///
/// An explicit status wins. Otherwise posting a non-blank answer to an open
/// question marks it answered.
pub fn next_status(
    current: QuestionStatus,
    requested: Option<QuestionStatus>,
    answer: Option<&str>,
) -> QuestionStatus {
    if let Some(status) = requested {
        return status;
    }
    match answer {
        Some(text) if !text.trim().is_empty() && current == QuestionStatus::Open => {
            QuestionStatus::Answered
        }
        _ => current,
    }
}

/// Board order: most upvoted first, ties broken by oldest first.
pub fn board_ordering(
    a_upvotes: u32,
    a_created: &Timestamp,
    b_upvotes: u32,
    b_created: &Timestamp,
) -> Ordering {
    b_upvotes
        .cmp(&a_upvotes)
        .then_with(|| a_created.cmp(b_created))
}
