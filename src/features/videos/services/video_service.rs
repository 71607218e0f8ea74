use std::sync::Arc;

use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::videos::dtos::{VideoChangesDto, VideoDetailsDto, VideoResponseDto};
use crate::features::videos::models::{NewVideo, Video, VideoUpdate};
use crate::features::videos::repositories::VideoRepository;
use crate::modules::storage::{EntityKind, ObjectRelocator, UploadPayload};
use crate::shared::types::resolve_limit;

/// Service for video metadata and the objects behind it.
///
/// Storage calls always run before the metadata write they feed. When the
/// write fails, objects created for it are discarded again.
pub struct VideoService {
    videos: Arc<dyn VideoRepository>,
    relocator: Arc<ObjectRelocator>,
}

impl VideoService {
    pub fn new(videos: Arc<dyn VideoRepository>, relocator: Arc<ObjectRelocator>) -> Self {
        Self { videos, relocator }
    }

    /// Upload the video (and optional thumbnail), then record it
    pub async fn upload(
        &self,
        caller: &AuthenticatedUser,
        details: VideoDetailsDto,
        video: UploadPayload,
        thumbnail: Option<UploadPayload>,
    ) -> Result<VideoResponseDto> {
        details
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let video_url = self
            .relocator
            .upload(video, Some(&details.category), EntityKind::Video)
            .await?;

        let thumbnail_url = match thumbnail {
            Some(payload) => {
                match self
                    .relocator
                    .upload(payload, None, EntityKind::Thumbnail)
                    .await
                {
                    Ok(url) => Some(url),
                    Err(e) => {
                        self.relocator
                            .discard(&video_url, "upload: thumbnail upload failed")
                            .await;
                        return Err(e);
                    }
                }
            }
            None => None,
        };

        let created = self
            .videos
            .create(NewVideo {
                user_id: caller.id,
                title: details.title,
                category: details.category,
                description: details.description,
                video_url: video_url.clone(),
                thumbnail_url: thumbnail_url.clone(),
                tags: details.tags,
            })
            .await;

        match created {
            Ok(video) => {
                tracing::info!("User {} uploaded video {}", caller.id, video.id);
                Ok(video.into())
            }
            Err(e) => {
                self.relocator
                    .discard(&video_url, "upload: metadata insert failed")
                    .await;
                if let Some(url) = &thumbnail_url {
                    self.relocator
                        .discard(url, "upload: metadata insert failed")
                        .await;
                }
                Err(e)
            }
        }
    }

    /// Fetch a video, counting the view
    pub async fn get(&self, id: Uuid) -> Result<VideoResponseDto> {
        self.videos
            .increment_views(id)
            .await?
            .map(VideoResponseDto::from)
            .ok_or_else(|| AppError::NotFound("Video not found!".to_string()))
    }

    pub async fn list_by_category(
        &self,
        category: &str,
        limit: Option<i64>,
    ) -> Result<Vec<VideoResponseDto>> {
        let videos = self
            .videos
            .find_by_category(category, resolve_limit(limit))
            .await?;

        non_empty(videos)
    }

    pub async fn search(
        &self,
        query: &str,
        category: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<VideoResponseDto>> {
        let videos = self
            .videos
            .search(query.trim(), category, resolve_limit(limit))
            .await?;

        non_empty(videos)
    }

    /// Owner-only edit of text fields, thumbnail and category.
    ///
    /// A new thumbnail is uploaded first; a category change moves the video
    /// object. Both happen before the row is written, and are undone if the
    /// write fails. The superseded thumbnail is discarded only after the write.
    pub async fn edit(
        &self,
        caller: &AuthenticatedUser,
        id: Uuid,
        changes: VideoChangesDto,
        thumbnail: Option<UploadPayload>,
    ) -> Result<VideoResponseDto> {
        changes
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let current = self.find_owned(caller, id).await?;
        let mut update = VideoUpdate::from_video(&current);

        if let Some(title) = changes.title {
            update.title = title;
        }
        if let Some(description) = changes.description {
            update.description = description;
        }
        if let Some(tags) = changes.tags {
            update.tags = tags;
        }

        let new_thumbnail = match thumbnail {
            Some(payload) => Some(
                self.relocator
                    .upload_replacing(
                        payload,
                        None,
                        EntityKind::Thumbnail,
                        current.thumbnail_url.as_deref(),
                    )
                    .await?,
            ),
            None => None,
        };
        if let Some(url) = &new_thumbnail {
            update.thumbnail_url = Some(url.clone());
        }

        let category_changed = changes
            .category
            .as_ref()
            .is_some_and(|category| *category != current.category);

        if let Some(category) = changes.category.filter(|_| category_changed) {
            match self
                .relocator
                .relocate(&current.video_url, &category, EntityKind::Video)
                .await
            {
                Ok(url) => {
                    update.video_url = url;
                    update.category = category;
                }
                Err(e) => {
                    self.discard_new_thumbnail(&current, new_thumbnail.as_deref())
                        .await;
                    return Err(e);
                }
            }
        }

        let updated = match self.videos.update(id, update.clone()).await {
            Ok(Some(video)) => video,
            result => {
                self.rollback_edit(&current, &update, new_thumbnail.as_deref())
                    .await;
                return match result {
                    Err(e) => Err(e),
                    _ => Err(AppError::NotFound("Video not found!".to_string())),
                };
            }
        };

        if let (Some(old), Some(new)) = (&current.thumbnail_url, &new_thumbnail) {
            if !self.relocator.same_object(old, new) {
                self.relocator.discard(old, "edit: thumbnail replaced").await;
            }
        }

        tracing::info!("User {} edited video {}", caller.id, id);
        Ok(updated.into())
    }

    /// Idempotently add the caller to the like set
    pub async fn like(&self, caller: &AuthenticatedUser, id: Uuid) -> Result<VideoResponseDto> {
        self.videos
            .add_like(id, caller.id)
            .await?
            .map(VideoResponseDto::from)
            .ok_or_else(|| AppError::NotFound("Video not found!".to_string()))
    }

    pub async fn unlike(&self, caller: &AuthenticatedUser, id: Uuid) -> Result<VideoResponseDto> {
        self.videos
            .remove_like(id, caller.id)
            .await?
            .map(VideoResponseDto::from)
            .ok_or_else(|| AppError::NotFound("Video not found!".to_string()))
    }

    async fn find_owned(&self, caller: &AuthenticatedUser, id: Uuid) -> Result<Video> {
        let video = self
            .videos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found!".to_string()))?;

        if video.user_id != caller.id {
            return Err(AppError::Forbidden(
                "Only the uploader can edit this video".to_string(),
            ));
        }

        Ok(video)
    }

    async fn discard_new_thumbnail(&self, current: &Video, new_thumbnail: Option<&str>) {
        if let Some(url) = new_thumbnail {
            // Same key means the upload overwrote the current thumbnail in place
            let overwrote_current = current
                .thumbnail_url
                .as_deref()
                .is_some_and(|old| self.relocator.same_object(old, url));
            if !overwrote_current {
                self.relocator.discard(url, "edit: aborted").await;
            }
        }
    }

    /// Undo storage side effects of an edit whose row write failed
    async fn rollback_edit(&self, current: &Video, update: &VideoUpdate, new_thumbnail: Option<&str>) {
        self.discard_new_thumbnail(current, new_thumbnail).await;

        if update.video_url != current.video_url {
            if let Err(e) = self
                .relocator
                .relocate(&update.video_url, &current.category, EntityKind::Video)
                .await
            {
                tracing::error!(
                    "Video {} row still points at '{}' but its object could not be moved back from '{}': {}",
                    current.id,
                    current.video_url,
                    update.video_url,
                    e
                );
            }
        }
    }
}

fn non_empty(videos: Vec<Video>) -> Result<Vec<VideoResponseDto>> {
    if videos.is_empty() {
        return Err(AppError::NotFound("No videos found!".to_string()));
    }
    Ok(videos.into_iter().map(VideoResponseDto::from).collect())
}
