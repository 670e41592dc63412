//! Repository for gallery photos.

use std::collections::BTreeMap;

use cafe_core::photo::PhotoStatus;
use cafe_core::search::paginate;
use cafe_core::types::{new_record_id, RecordId};
use chrono::Utc;

use super::not_found;
use crate::error::{RepoError, StoreError};
use crate::models::clean_optional;
use crate::models::photo::{CreatePhoto, Photo};
use crate::store::{collections, Store};

/// Provides CRUD operations for photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a photo awaiting moderation.
    pub async fn create(store: &Store, input: &CreatePhoto) -> Result<Photo, RepoError> {
        let photo = Photo {
            id: new_record_id(),
            url: input.url.trim().to_string(),
            caption: clean_optional(input.caption.as_deref()),
            uploader_name: clean_optional(input.uploader_name.as_deref()),
            status: PhotoStatus::Pending,
            likes: 0,
            created_at: Utc::now(),
            reviewed_at: None,
        };

        let created = photo.clone();
        store
            .mutate(collections::PHOTOS, move |photos: &mut Vec<Photo>| {
                photos.push(photo);
                Ok::<_, RepoError>(())
            })
            .await?;

        tracing::info!(photo_id = %created.id, "Photo submitted for review");
        Ok(created)
    }

    pub async fn find_by_id(store: &Store, id: RecordId) -> Result<Option<Photo>, StoreError> {
        let photos: Vec<Photo> = store.read_all(collections::PHOTOS).await?;
        Ok(photos.into_iter().find(|p| p.id == id))
    }

    /// Photos newest first, optionally filtered by status.
    pub async fn list(
        store: &Store,
        status: Option<PhotoStatus>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Photo>, StoreError> {
        let mut photos: Vec<Photo> = store.read_all(collections::PHOTOS).await?;
        if let Some(status) = status {
            photos.retain(|p| p.status == status);
        }
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(photos, limit, offset))
    }

    /// Record a moderation decision.
    pub async fn set_status(
        store: &Store,
        id: RecordId,
        status: PhotoStatus,
    ) -> Result<Photo, RepoError> {
        let photo = store
            .mutate(collections::PHOTOS, |photos: &mut Vec<Photo>| {
                let photo = photos
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| not_found("Photo", id))?;
                photo.status = status;
                photo.reviewed_at = Some(Utc::now());
                Ok::<_, RepoError>(photo.clone())
            })
            .await?;

        tracing::info!(photo_id = %id, status = %status, "Photo reviewed");
        Ok(photo)
    }

    /// Add one like. Only approved photos can be liked; others look missing.
    pub async fn like(store: &Store, id: RecordId) -> Result<Photo, RepoError> {
        store
            .mutate(collections::PHOTOS, |photos: &mut Vec<Photo>| {
                let photo = photos
                    .iter_mut()
                    .find(|p| p.id == id && p.status.is_public())
                    .ok_or_else(|| not_found("Photo", id))?;
                photo.likes = photo.likes.saturating_add(1);
                Ok(photo.clone())
            })
            .await
    }

    pub async fn delete(store: &Store, id: RecordId) -> Result<bool, RepoError> {
        let removed = store
            .mutate(collections::PHOTOS, |photos: &mut Vec<Photo>| {
                let before = photos.len();
                photos.retain(|p| p.id != id);
                Ok::<_, RepoError>(photos.len() != before)
            })
            .await?;
        if removed {
            tracing::info!(photo_id = %id, "Photo deleted");
        }
        Ok(removed)
    }

    /// Photo count for every status, including zeroes.
    pub async fn count_by_status(store: &Store) -> Result<BTreeMap<PhotoStatus, usize>, StoreError> {
        let photos: Vec<Photo> = store.read_all(collections::PHOTOS).await?;
        let mut counts: BTreeMap<PhotoStatus, usize> =
            PhotoStatus::ALL.iter().map(|s| (*s, 0)).collect();
        for photo in &photos {
            *counts.entry(photo.status).or_default() += 1;
        }
        Ok(counts)
    }
}
