use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::videos::models::{Comment, NewComment, NewVideo, Video, VideoUpdate};
use crate::features::videos::repositories::{CommentRepository, VideoRepository};

fn injected(op: &str) -> AppError {
    AppError::Internal(format!("injected {} failure", op))
}

#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: Mutex<HashMap<Uuid, Video>>,
    fail_create: AtomicBool,
    fail_update: AtomicBool,
    fail_push: AtomicBool,
    fail_pull: AtomicBool,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn fail_pushes(&self, fail: bool) {
        self.fail_push.store(fail, Ordering::SeqCst);
    }

    pub fn fail_pulls(&self, fail: bool) {
        self.fail_pull.store(fail, Ordering::SeqCst);
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.videos.lock().unwrap().get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.videos.lock().unwrap().len()
    }

    fn newest_first(&self, filter: impl Fn(&Video) -> bool, limit: i64) -> Vec<Video> {
        let mut videos: Vec<Video> = self
            .videos
            .lock()
            .unwrap()
            .values()
            .filter(|v| filter(v))
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        videos.truncate(limit.max(0) as usize);
        videos
    }

    fn modify(&self, id: Uuid, apply: impl FnOnce(&mut Video)) -> Option<Video> {
        let mut videos = self.videos.lock().unwrap();
        let video = videos.get_mut(&id)?;
        apply(video);
        Some(video.clone())
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create(&self, video: NewVideo) -> Result<Video> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(injected("create"));
        }

        let mut videos = self.videos.lock().unwrap();
        let now = Utc::now();
        // Distinct upload dates keep newest-first ordering deterministic
        let upload_date = now + Duration::milliseconds(videos.len() as i64);
        let record = Video {
            id: Uuid::new_v4(),
            user_id: video.user_id,
            title: video.title,
            category: video.category,
            description: video.description,
            video_url: video.video_url,
            thumbnail_url: video.thumbnail_url,
            views: 0,
            tags: video.tags,
            likes: Vec::new(),
            comment_ids: Vec::new(),
            upload_date,
            created_at: now,
            updated_at: now,
        };
        videos.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        Ok(self.get(id))
    }

    async fn find_by_category(&self, category: &str, limit: i64) -> Result<Vec<Video>> {
        Ok(self.newest_first(|v| v.category == category, limit))
    }

    async fn search(
        &self,
        query: &str,
        category: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Video>> {
        let needle = query.to_lowercase();
        Ok(self.newest_first(
            |v| {
                v.title.to_lowercase().contains(&needle)
                    && category.map_or(true, |c| v.category == c)
            },
            limit,
        ))
    }

    async fn update(&self, id: Uuid, update: VideoUpdate) -> Result<Option<Video>> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(injected("update"));
        }

        Ok(self.modify(id, |v| {
            v.title = update.title;
            v.category = update.category;
            v.description = update.description;
            v.tags = update.tags;
            v.video_url = update.video_url;
            v.thumbnail_url = update.thumbnail_url;
            v.updated_at = Utc::now();
        }))
    }

    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Video>> {
        Ok(self.modify(id, |v| {
            if !v.likes.contains(&user_id) {
                v.likes.push(user_id);
            }
        }))
    }

    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Video>> {
        Ok(self.modify(id, |v| v.likes.retain(|u| *u != user_id)))
    }

    async fn push_comment(&self, id: Uuid, comment_id: Uuid) -> Result<bool> {
        if self.fail_push.load(Ordering::SeqCst) {
            return Err(injected("push"));
        }

        Ok(self
            .modify(id, |v| {
                if !v.comment_ids.contains(&comment_id) {
                    v.comment_ids.push(comment_id);
                }
            })
            .is_some())
    }

    async fn pull_comment(&self, id: Uuid, comment_id: Uuid) -> Result<bool> {
        if self.fail_pull.load(Ordering::SeqCst) {
            return Err(injected("pull"));
        }

        Ok(self
            .modify(id, |v| v.comment_ids.retain(|c| *c != comment_id))
            .is_some())
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Video>> {
        Ok(self.modify(id, |v| v.views += 1))
    }
}

#[derive(Default)]
pub struct InMemoryCommentRepository {
    comments: Mutex<HashMap<Uuid, Comment>>,
    fail_restore: AtomicBool,
}

impl InMemoryCommentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_restores(&self, fail: bool) {
        self.fail_restore.store(fail, Ordering::SeqCst);
    }

    pub fn get(&self, id: Uuid) -> Option<Comment> {
        self.comments.lock().unwrap().get(&id).cloned()
    }

    pub fn count(&self) -> usize {
        self.comments.lock().unwrap().len()
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment> {
        let now = Utc::now();
        let record = Comment {
            id: Uuid::new_v4(),
            video_id: comment.video_id,
            user_id: comment.user_id,
            body: comment.body,
            created_at: now,
            updated_at: now,
        };
        self.comments
            .lock()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>> {
        Ok(self.get(id))
    }

    async fn update_body(&self, id: Uuid, body: &str) -> Result<Option<Comment>> {
        let mut comments = self.comments.lock().unwrap();
        Ok(comments.get_mut(&id).map(|c| {
            c.body = body.to_string();
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Comment>> {
        Ok(self.comments.lock().unwrap().remove(&id))
    }

    async fn restore(&self, comment: &Comment) -> Result<()> {
        if self.fail_restore.load(Ordering::SeqCst) {
            return Err(injected("restore"));
        }

        self.comments
            .lock()
            .unwrap()
            .entry(comment.id)
            .or_insert_with(|| comment.clone());
        Ok(())
    }
}
