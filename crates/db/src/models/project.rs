//! Project board records and DTOs.

use cafe_core::types::{RecordId, Timestamp};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{validate_not_blank, validate_web_url};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    pub author_name: String,
    #[serde(default)]
    pub likes: u32,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub title: String,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 1000, message = "must be at most 1000 characters")
    )]
    pub description: String,
    #[validate(custom(function = "validate_web_url"))]
    pub project_url: Option<String>,
    #[validate(custom(function = "validate_web_url"))]
    pub repo_url: Option<String>,
    #[validate(
        custom(function = "validate_not_blank"),
        length(max = 80, message = "must be at most 80 characters")
    )]
    pub author_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSort {
    /// Newest first.
    #[default]
    Recent,
    /// Most liked first, newest first among ties.
    Popular,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListParams {
    pub sort: Option<ProjectSort>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
