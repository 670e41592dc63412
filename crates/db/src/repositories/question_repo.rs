//! Repository for the Q&A board.

use std::collections::BTreeMap;

use cafe_core::question::{board_ordering, next_status, QuestionStatus};
use cafe_core::search::paginate;
use cafe_core::types::{new_record_id, RecordId};
use chrono::Utc;

use super::not_found;
use crate::error::{RepoError, StoreError};
use crate::models::clean_optional;
use crate::models::question::{CreateQuestion, Question, UpdateQuestion};
use crate::store::{collections, Store};

/// Provides CRUD operations for questions.
pub struct QuestionRepo;

impl QuestionRepo {
    pub async fn create(store: &Store, input: &CreateQuestion) -> Result<Question, RepoError> {
        let question = Question {
            id: new_record_id(),
            body: input.body.trim().to_string(),
            asker_name: clean_optional(input.asker_name.as_deref()),
            status: QuestionStatus::Open,
            upvotes: 0,
            answer: None,
            created_at: Utc::now(),
            answered_at: None,
        };

        let created = question.clone();
        store
            .mutate(collections::QUESTIONS, move |questions: &mut Vec<Question>| {
                questions.push(question);
                Ok::<_, RepoError>(())
            })
            .await?;

        tracing::info!(question_id = %created.id, "Question asked");
        Ok(created)
    }

    pub async fn find_by_id(store: &Store, id: RecordId) -> Result<Option<Question>, StoreError> {
        let questions: Vec<Question> = store.read_all(collections::QUESTIONS).await?;
        Ok(questions.into_iter().find(|q| q.id == id))
    }

    /// Questions in board order. Hidden ones are left out unless asked for.
    pub async fn list(
        store: &Store,
        include_hidden: bool,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Question>, StoreError> {
        let mut questions: Vec<Question> = store.read_all(collections::QUESTIONS).await?;
        if !include_hidden {
            questions.retain(|q| q.status.is_visible());
        }
        questions.sort_by(|a, b| board_ordering(a.upvotes, &a.created_at, b.upvotes, &b.created_at));
        Ok(paginate(questions, limit, offset))
    }

    /// Add one upvote to a visible question.
    pub async fn upvote(store: &Store, id: RecordId) -> Result<Question, RepoError> {
        store
            .mutate(collections::QUESTIONS, |questions: &mut Vec<Question>| {
                let question = questions
                    .iter_mut()
                    .find(|q| q.id == id && q.status.is_visible())
                    .ok_or_else(|| not_found("Question", id))?;
                question.upvotes = question.upvotes.saturating_add(1);
                Ok(question.clone())
            })
            .await
    }

    /// Apply an admin edit: status change and/or answer.
    ///
    /// A blank answer clears the stored answer.
    pub async fn update(
        store: &Store,
        id: RecordId,
        input: &UpdateQuestion,
    ) -> Result<Question, RepoError> {
        let question = store
            .mutate(collections::QUESTIONS, |questions: &mut Vec<Question>| {
                let question = questions
                    .iter_mut()
                    .find(|q| q.id == id)
                    .ok_or_else(|| not_found("Question", id))?;

                let status = next_status(question.status, input.status, input.answer.as_deref());
                if input.answer.is_some() {
                    question.answer = clean_optional(input.answer.as_deref());
                }
                if status == QuestionStatus::Answered && question.status != QuestionStatus::Answered {
                    question.answered_at = Some(Utc::now());
                }
                question.status = status;
                Ok::<_, RepoError>(question.clone())
            })
            .await?;

        tracing::info!(question_id = %id, "Question updated");
        Ok(question)
    }

    pub async fn delete(store: &Store, id: RecordId) -> Result<bool, RepoError> {
        let removed = store
            .mutate(collections::QUESTIONS, |questions: &mut Vec<Question>| {
                let before = questions.len();
                questions.retain(|q| q.id != id);
                Ok::<_, RepoError>(questions.len() != before)
            })
            .await?;
        if removed {
            tracing::info!(question_id = %id, "Question deleted");
        }
        Ok(removed)
    }

    /// Question count for every status, including zeroes.
    pub async fn count_by_status(
        store: &Store,
    ) -> Result<BTreeMap<QuestionStatus, usize>, StoreError> {
        let questions: Vec<Question> = store.read_all(collections::QUESTIONS).await?;
        let mut counts: BTreeMap<QuestionStatus, usize> =
            QuestionStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for question in &questions {
            *counts.entry(question.status).or_default() += 1;
        }
        Ok(counts)
    }
}
