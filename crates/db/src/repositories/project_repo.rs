//! Repository for the project board.

use cafe_core::search::paginate;
use cafe_core::types::{new_record_id, RecordId};
use chrono::Utc;

use super::not_found;
use crate::error::{RepoError, StoreError};
use crate::models::clean_optional;
use crate::models::project::{CreateProject, Project, ProjectSort};
use crate::store::{collections, Store};

/// Provides CRUD operations for shared projects.
pub struct ProjectRepo;

impl ProjectRepo {
    pub async fn create(store: &Store, input: &CreateProject) -> Result<Project, RepoError> {
        let project = Project {
            id: new_record_id(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            project_url: clean_optional(input.project_url.as_deref()),
            repo_url: clean_optional(input.repo_url.as_deref()),
            author_name: input.author_name.trim().to_string(),
            likes: 0,
            created_at: Utc::now(),
        };

        let created = project.clone();
        store
            .mutate(collections::PROJECTS, move |projects: &mut Vec<Project>| {
                projects.push(project);
                Ok::<_, RepoError>(())
            })
            .await?;

        tracing::info!(project_id = %created.id, "Project shared");
        Ok(created)
    }

    pub async fn find_by_id(store: &Store, id: RecordId) -> Result<Option<Project>, StoreError> {
        let projects: Vec<Project> = store.read_all(collections::PROJECTS).await?;
        Ok(projects.into_iter().find(|p| p.id == id))
    }

    pub async fn list(
        store: &Store,
        sort: ProjectSort,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<Project> = store.read_all(collections::PROJECTS).await?;
        match sort {
            ProjectSort::Recent => projects.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProjectSort::Popular => projects.sort_by(|a, b| {
                b.likes
                    .cmp(&a.likes)
                    .then_with(|| b.created_at.cmp(&a.created_at))
            }),
        }
        Ok(paginate(projects, limit, offset))
    }

    pub async fn like(store: &Store, id: RecordId) -> Result<Project, RepoError> {
        store
            .mutate(collections::PROJECTS, |projects: &mut Vec<Project>| {
                let project = projects
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| not_found("Project", id))?;
                project.likes = project.likes.saturating_add(1);
                Ok(project.clone())
            })
            .await
    }

    pub async fn delete(store: &Store, id: RecordId) -> Result<bool, RepoError> {
        let removed = store
            .mutate(collections::PROJECTS, |projects: &mut Vec<Project>| {
                let before = projects.len();
                projects.retain(|p| p.id != id);
                Ok::<_, RepoError>(projects.len() != before)
            })
            .await?;
        if removed {
            tracing::info!(project_id = %id, "Project deleted");
        }
        Ok(removed)
    }

    pub async fn count(store: &Store) -> Result<usize, StoreError> {
        let projects: Vec<Project> = store.read_all(collections::PROJECTS).await?;
        Ok(projects.len())
    }
}
