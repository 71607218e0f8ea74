use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::videos::dtos::CommentResponseDto;
use crate::features::videos::models::{Comment, NewComment};
use crate::features::videos::repositories::{CommentRepository, VideoRepository};

/// Service for comments and their membership in a video's comment list.
///
/// Comment rows and the video's id list live in separate writes; each
/// operation compensates the first write when the second fails.
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    videos: Arc<dyn VideoRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, videos: Arc<dyn VideoRepository>) -> Self {
        Self { comments, videos }
    }

    pub async fn add(
        &self,
        caller: &AuthenticatedUser,
        video_id: Uuid,
        body: String,
    ) -> Result<CommentResponseDto> {
        if self.videos.find_by_id(video_id).await?.is_none() {
            return Err(AppError::NotFound("Video not found!".to_string()));
        }

        let comment = self
            .comments
            .create(NewComment {
                video_id,
                user_id: caller.id,
                body,
            })
            .await?;

        let linked = self.videos.push_comment(video_id, comment.id).await;
        match linked {
            Ok(true) => {
                tracing::debug!("Comment {} added to video {}", comment.id, video_id);
                Ok(comment.into())
            }
            other => {
                if let Err(e) = self.comments.delete(comment.id).await {
                    tracing::error!(
                        "Comment {} is not listed by video {} and could not be removed: {}",
                        comment.id,
                        video_id,
                        e
                    );
                }
                match other {
                    Err(e) => Err(e),
                    _ => Err(AppError::NotFound("Video not found!".to_string())),
                }
            }
        }
    }

    /// Author-only text replacement
    pub async fn edit(
        &self,
        caller: &AuthenticatedUser,
        comment_id: Uuid,
        body: &str,
    ) -> Result<CommentResponseDto> {
        let comment = self.find(comment_id).await?;

        if comment.user_id != caller.id {
            return Err(AppError::Forbidden(
                "Only the author can edit this comment".to_string(),
            ));
        }

        self.comments
            .update_body(comment_id, body)
            .await?
            .map(CommentResponseDto::from)
            .ok_or_else(|| AppError::NotFound("Comment not found!".to_string()))
    }

    /// Remove a comment (author or video owner).
    ///
    /// `expected_video` lets clients pin the video they think the comment
    /// belongs to; a mismatch is rejected before anything is deleted.
    pub async fn delete(
        &self,
        caller: &AuthenticatedUser,
        comment_id: Uuid,
        expected_video: Option<Uuid>,
    ) -> Result<CommentResponseDto> {
        let comment = self.find(comment_id).await?;

        if expected_video.is_some_and(|id| id != comment.video_id) {
            return Err(AppError::BadRequest(
                "Comment does not belong to this video".to_string(),
            ));
        }

        let video_owner = self
            .videos
            .find_by_id(comment.video_id)
            .await?
            .map(|v| v.user_id);
        if comment.user_id != caller.id && video_owner != Some(caller.id) {
            return Err(AppError::Forbidden(
                "Only the author or the video owner can delete this comment".to_string(),
            ));
        }

        let deleted = self
            .comments
            .delete(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found!".to_string()))?;

        if let Err(e) = self.videos.pull_comment(deleted.video_id, deleted.id).await {
            self.restore(&deleted).await;
            return Err(e);
        }

        tracing::debug!("Comment {} removed from video {}", deleted.id, deleted.video_id);
        Ok(deleted.into())
    }

    async fn find(&self, comment_id: Uuid) -> Result<Comment> {
        self.comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found!".to_string()))
    }

    async fn restore(&self, comment: &Comment) {
        match self.comments.restore(comment).await {
            Ok(()) => tracing::warn!(
                "Restored comment {} after failing to unlist it from video {}",
                comment.id,
                comment.video_id
            ),
            Err(e) => tracing::error!(
                "Integrity violation: video {} lists deleted comment {} and restoring it failed: {}",
                comment.video_id,
                comment.id,
                e
            ),
        }
    }
}
