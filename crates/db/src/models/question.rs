//! Q&A board records and DTOs.

use cafe_core::question::{QuestionStatus, MAX_ANSWER_LENGTH, MAX_QUESTION_LENGTH};
use cafe_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::validate_not_blank;

/// `validator` length bounds are `u64`.
const QUESTION_LIMIT: u64 = MAX_QUESTION_LENGTH as u64;
const ANSWER_LIMIT: u64 = MAX_ANSWER_LENGTH as u64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: RecordId,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asker_name: Option<String>,
    pub status: QuestionStatus,
    #[serde(default)]
    pub upvotes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestion {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = QUESTION_LIMIT, message = "question is too long")
    )]
    pub body: String,
    #[validate(length(max = 80, message = "must be at most 80 characters"))]
    pub asker_name: Option<String>,
}

/// Body of `PUT /admin/questions/{id}`; both fields optional.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateQuestion {
    pub status: Option<QuestionStatus>,
    #[validate(length(max = ANSWER_LIMIT, message = "answer is too long"))]
    pub answer: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuestionListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
