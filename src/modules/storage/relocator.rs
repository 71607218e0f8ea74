//! Bucket key layout and object moves.
//!
//! Video objects live under `Videos/{category}_videos/{file}` and thumbnails
//! under `Thumbnails/{file}`. A category change cannot be a rename in S3, so a
//! move is copy, verify, then delete. When the delete half fails the new URL is
//! still returned and the old key goes to the orphan ledger, which the startup
//! sweep drains.
//!
//! Keys are never shared: writing onto a live object is a conflict, while
//! writing onto an orphaned key takes it back out of the ledger first.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use url::Url;

use crate::core::error::{AppError, Result};
use crate::modules::storage::{ObjectStore, OrphanLedger};
use crate::shared::constants::{CATEGORY_FOLDER_SUFFIX, THUMBNAILS_PREFIX, VIDEOS_PREFIX};

/// Classification of an uploaded object; decides its key pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Video,
    Thumbnail,
}

impl EntityKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Video => VIDEOS_PREFIX,
            EntityKind::Thumbnail => THUMBNAILS_PREFIX,
        }
    }
}

/// A file received from a client
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

pub struct ObjectRelocator {
    store: Arc<dyn ObjectStore>,
    orphans: Arc<dyn OrphanLedger>,
    public_base_url: String,
}

impl ObjectRelocator {
    pub fn new(
        store: Arc<dyn ObjectStore>,
        orphans: Arc<dyn OrphanLedger>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            orphans,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the bucket key for an object.
    ///
    /// Videos require a category; other kinds ignore it.
    pub fn object_key(kind: EntityKind, category: Option<&str>, file_name: &str) -> Result<String> {
        let file_name = sanitize_file_name(file_name)?;

        match kind {
            EntityKind::Video => {
                let category = category
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation("Video uploads require a category".to_string())
                    })?;
                Ok(format!(
                    "{}/{}{}/{}",
                    kind.prefix(),
                    category,
                    CATEGORY_FOLDER_SUFFIX,
                    file_name
                ))
            }
            EntityKind::Thumbnail => Ok(format!("{}/{}", kind.prefix(), file_name)),
        }
    }

    /// Public URL for a key; each path segment is percent-encoded
    pub fn public_url(&self, key: &str) -> String {
        let encoded: Vec<String> = key
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}/{}", self.public_base_url, encoded.join("/"))
    }

    /// Map a public URL back to its bucket key.
    ///
    /// The URL must point at the configured public base; everything after it in
    /// the path is the (percent-decoded) key.
    pub fn key_from_url(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url)
            .map_err(|e| AppError::InvalidReference(format!("'{}' is not a URL: {}", url, e)))?;
        let base = Url::parse(&self.public_base_url).map_err(|e| {
            AppError::Internal(format!(
                "Configured public base URL '{}' is invalid: {}",
                self.public_base_url, e
            ))
        })?;

        let same_origin = parsed.scheme() == base.scheme()
            && parsed.host_str() == base.host_str()
            && parsed.port_or_known_default() == base.port_or_known_default();
        if !same_origin {
            return Err(AppError::InvalidReference(format!(
                "'{}' does not belong to bucket at {}",
                url, self.public_base_url
            )));
        }

        let base_path = base.path().trim_end_matches('/');
        let encoded_key = parsed
            .path()
            .strip_prefix(base_path)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(|| {
                AppError::InvalidReference(format!("'{}' is outside the bucket path", url))
            })?;

        let key = urlencoding::decode(encoded_key)
            .map_err(|e| AppError::InvalidReference(format!("'{}' has a bad key: {}", url, e)))?
            .into_owned();

        if key.is_empty() || key.ends_with('/') {
            return Err(AppError::InvalidReference(format!(
                "'{}' does not name an object",
                url
            )));
        }

        Ok(key)
    }

    /// Whether two URLs name the same bucket object
    pub fn same_object(&self, a: &str, b: &str) -> bool {
        match (self.key_from_url(a), self.key_from_url(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => a == b,
        }
    }

    /// Upload a payload and return its public URL.
    ///
    /// A key already holding a live object is a conflict.
    pub async fn upload(
        &self,
        payload: UploadPayload,
        category: Option<&str>,
        kind: EntityKind,
    ) -> Result<String> {
        self.upload_replacing(payload, category, kind, None).await
    }

    /// Upload a payload that may overwrite the object behind `replacing`
    pub async fn upload_replacing(
        &self,
        payload: UploadPayload,
        category: Option<&str>,
        kind: EntityKind,
        replacing: Option<&str>,
    ) -> Result<String> {
        let key = Self::object_key(kind, category, &payload.file_name)?;
        let size = payload.data.len();
        let owned = replacing
            .and_then(|url| self.key_from_url(url).ok())
            .as_deref()
            == Some(key.as_str());

        let reclaimed = self.claim_key(&key, owned).await?;

        if let Err(e) = self
            .store
            .put(&key, payload.data, &payload.content_type)
            .await
        {
            if reclaimed {
                self.record_orphan(&key, "upload: write over orphaned key failed")
                    .await;
            }
            return Err(e);
        }

        info!("Uploaded object '{}' ({} bytes)", key, size);
        Ok(self.public_url(&key))
    }

    /// Move an object under a new category prefix and return the new URL.
    ///
    /// A failed copy leaves the original untouched. A failed delete after a
    /// successful copy is recorded in the orphan ledger and does not fail the call.
    /// A target key holding another live object is a conflict.
    pub async fn relocate(
        &self,
        existing_url: &str,
        new_category: &str,
        kind: EntityKind,
    ) -> Result<String> {
        let old_key = self.key_from_url(existing_url)?;
        let file_name = old_key.rsplit('/').next().unwrap_or(old_key.as_str());
        let new_key = Self::object_key(kind, Some(new_category), file_name)?;

        if new_key == old_key {
            debug!("Object '{}' already under category '{}'", old_key, new_category);
            return Ok(existing_url.to_string());
        }

        let reclaimed = self.claim_key(&new_key, false).await?;

        if let Err(e) = self.copy_verified(&old_key, &new_key).await {
            if reclaimed {
                self.record_orphan(&new_key, "relocation: copy over orphaned key failed")
                    .await;
            }
            return Err(e);
        }

        if let Err(e) = self.store.delete(&old_key).await {
            warn!(
                "Relocated '{}' to '{}' but failed to delete the original: {}",
                old_key, new_key, e
            );
            self.record_orphan(&old_key, "relocation: delete after copy failed")
                .await;
        }

        info!("Relocated object '{}' to '{}'", old_key, new_key);
        Ok(self.public_url(&new_key))
    }

    /// Delete the object behind a URL
    pub async fn delete(&self, url: &str) -> Result<()> {
        let key = self.key_from_url(url)?;
        self.store.delete(&key).await?;

        info!("Deleted object '{}'", key);
        Ok(())
    }

    /// Best-effort delete for superseded objects and compensation.
    ///
    /// Failures never propagate; the key is handed to the orphan ledger instead.
    pub async fn discard(&self, url: &str, reason: &str) {
        let key = match self.key_from_url(url) {
            Ok(key) => key,
            Err(e) => {
                warn!("Cannot discard '{}' ({}): {}", url, reason, e);
                return;
            }
        };

        if let Err(e) = self.store.delete(&key).await {
            warn!("Failed to discard '{}' ({}): {}", key, reason, e);
            self.record_orphan(&key, reason).await;
        }
    }

    /// Retry deletion of recorded orphans; returns how many were cleared
    pub async fn sweep_orphans(&self, limit: i64) -> Result<usize> {
        let pending = self.orphans.pending(limit).await?;
        let mut swept = 0;

        for orphan in pending {
            match self.store.delete(&orphan.object_key).await {
                Ok(()) => {
                    self.orphans.resolve(orphan.id).await?;
                    swept += 1;
                }
                Err(e) => {
                    warn!(
                        "Orphan '{}' still not deletable after {} attempts: {}",
                        orphan.object_key,
                        orphan.attempts + 1,
                        e
                    );
                    self.orphans.mark_failed(orphan.id).await?;
                }
            }
        }

        Ok(swept)
    }

    /// Make `key` writable and report whether it was taken back from the ledger.
    ///
    /// Free keys pass. Orphaned keys are released so the sweep leaves the new
    /// object alone. Any other live object is a conflict unless `owned`.
    async fn claim_key(&self, key: &str, owned: bool) -> Result<bool> {
        let occupied = self.store.exists(key).await?;
        let reclaimed = self.orphans.release(key).await?;

        if occupied && !reclaimed && !owned {
            return Err(AppError::Conflict(format!(
                "Object '{}' already exists",
                key
            )));
        }

        if reclaimed {
            debug!("Reclaimed orphaned key '{}'", key);
        }
        Ok(reclaimed)
    }

    async fn copy_verified(&self, from_key: &str, to_key: &str) -> Result<()> {
        self.store.copy(from_key, to_key).await?;

        if !self.store.exists(to_key).await? {
            return Err(AppError::Storage(format!(
                "Copy of '{}' to '{}' is not visible",
                from_key, to_key
            )));
        }
        Ok(())
    }

    async fn record_orphan(&self, key: &str, reason: &str) {
        if let Err(e) = self.orphans.record(key, reason).await {
            error!(
                "Leaked storage object '{}' ({}); recording it failed: {}",
                key, reason, e
            );
        }
    }
}

/// Reduce a client-supplied name to its final path component
fn sanitize_file_name(file_name: &str) -> Result<&str> {
    let name = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::Validation(format!(
            "Invalid file name '{}'",
            file_name
        )));
    }

    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::storage::memory::{InMemoryObjectStore, InMemoryOrphanLedger};

    const BASE: &str = "https://videoappstorage.s3.us-east-1.amazonaws.com";

    fn relocator() -> (
        ObjectRelocator,
        Arc<InMemoryObjectStore>,
        Arc<InMemoryOrphanLedger>,
    ) {
        let store = Arc::new(InMemoryObjectStore::new());
        let orphans = Arc::new(InMemoryOrphanLedger::new());
        let relocator = ObjectRelocator::new(store.clone(), orphans.clone(), BASE);
        (relocator, store, orphans)
    }

    fn video(name: &str) -> UploadPayload {
        UploadPayload {
            file_name: name.to_string(),
            content_type: "video/mp4".to_string(),
            data: vec![1, 2, 3],
        }
    }

    #[test]
    fn test_object_key_layout() {
        assert_eq!(
            ObjectRelocator::object_key(EntityKind::Video, Some("music"), "clip.mp4").unwrap(),
            "Videos/music_videos/clip.mp4"
        );
        assert_eq!(
            ObjectRelocator::object_key(EntityKind::Thumbnail, Some("music"), "thumb.png")
                .unwrap(),
            "Thumbnails/thumb.png"
        );
        assert_eq!(
            ObjectRelocator::object_key(EntityKind::Thumbnail, None, "thumb.png").unwrap(),
            "Thumbnails/thumb.png"
        );
    }

    #[test]
    fn test_object_key_requires_category_for_videos() {
        assert!(matches!(
            ObjectRelocator::object_key(EntityKind::Video, None, "clip.mp4"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_object_key_strips_directories_from_file_name() {
        assert_eq!(
            ObjectRelocator::object_key(EntityKind::Thumbnail, None, "../../etc/passwd").unwrap(),
            "Thumbnails/passwd"
        );
        assert_eq!(
            ObjectRelocator::object_key(EntityKind::Thumbnail, None, "C:\\tmp\\a.png").unwrap(),
            "Thumbnails/a.png"
        );
        assert!(ObjectRelocator::object_key(EntityKind::Thumbnail, None, "dir/").is_err());
        assert!(ObjectRelocator::object_key(EntityKind::Thumbnail, None, "..").is_err());
    }

    #[test]
    fn test_url_round_trip_with_spaces() {
        let (relocator, _, _) = relocator();
        let url = relocator.public_url("Videos/music_videos/my clip.mp4");
        assert_eq!(
            url,
            format!("{}/Videos/music_videos/my%20clip.mp4", BASE)
        );
        assert_eq!(
            relocator.key_from_url(&url).unwrap(),
            "Videos/music_videos/my clip.mp4"
        );
    }

    #[test]
    fn test_key_from_url_rejects_foreign_and_malformed_urls() {
        let (relocator, _, _) = relocator();
        assert!(matches!(
            relocator.key_from_url("not a url"),
            Err(AppError::InvalidReference(_))
        ));
        assert!(matches!(
            relocator.key_from_url("https://elsewhere.example.com/Videos/a.mp4"),
            Err(AppError::InvalidReference(_))
        ));
        assert!(matches!(
            relocator.key_from_url(&format!("{}/", BASE)),
            Err(AppError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_key_from_url_with_path_style_base() {
        let store = Arc::new(InMemoryObjectStore::new());
        let orphans = Arc::new(InMemoryOrphanLedger::new());
        let relocator =
            ObjectRelocator::new(store, orphans, "http://localhost:9000/videoappstorage/");

        assert_eq!(
            relocator
                .key_from_url("http://localhost:9000/videoappstorage/Thumbnails/t.png")
                .unwrap(),
            "Thumbnails/t.png"
        );
        assert!(relocator
            .key_from_url("http://localhost:9000/otherbucket/Thumbnails/t.png")
            .is_err());
    }

    #[test]
    fn test_same_object_compares_keys() {
        let (relocator, _, _) = relocator();
        let encoded = format!("{}/Thumbnails/my%20thumb.png", BASE);
        let plain = format!("{}/Thumbnails/my thumb.png", BASE);

        assert!(relocator.same_object(&encoded, &plain));
        assert!(!relocator.same_object(&encoded, &format!("{}/Thumbnails/other.png", BASE)));
    }

    #[tokio::test]
    async fn test_upload_stores_under_category_folder() {
        let (relocator, store, _) = relocator();

        let url = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();

        assert_eq!(url, format!("{}/Videos/music_videos/clip.mp4", BASE));
        assert!(store.contains("Videos/music_videos/clip.mp4"));
    }

    #[tokio::test]
    async fn test_upload_failure_is_storage_error() {
        let (relocator, store, _) = relocator();
        store.fail_puts(true);

        let result = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_relocate_moves_object_to_new_category() {
        let (relocator, store, orphans) = relocator();
        let url = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();

        let new_url = relocator
            .relocate(&url, "sports", EntityKind::Video)
            .await
            .unwrap();

        assert_eq!(new_url, format!("{}/Videos/sports_videos/clip.mp4", BASE));
        assert!(store.contains("Videos/sports_videos/clip.mp4"));
        assert!(!store.contains("Videos/music_videos/clip.mp4"));
        assert!(orphans.keys().is_empty());
    }

    #[tokio::test]
    async fn test_relocate_to_same_category_is_noop() {
        let (relocator, store, _) = relocator();
        let url = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();

        let same = relocator
            .relocate(&url, "music", EntityKind::Video)
            .await
            .unwrap();

        assert_eq!(same, url);
        assert_eq!(store.keys(), vec!["Videos/music_videos/clip.mp4".to_string()]);
    }

    #[tokio::test]
    async fn test_relocate_copy_failure_leaves_original() {
        let (relocator, store, _) = relocator();
        let url = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();
        store.fail_copies(true);

        let result = relocator.relocate(&url, "sports", EntityKind::Video).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(store.contains("Videos/music_videos/clip.mp4"));
        assert!(!store.contains("Videos/sports_videos/clip.mp4"));
    }

    #[tokio::test]
    async fn test_relocate_delete_failure_records_orphan_then_sweep_clears_it() {
        let (relocator, store, orphans) = relocator();
        let url = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();
        store.fail_deletes(true);

        let new_url = relocator
            .relocate(&url, "sports", EntityKind::Video)
            .await
            .unwrap();

        assert!(new_url.contains("sports_videos"));
        // Both copies exist until the sweep runs
        assert!(store.contains("Videos/music_videos/clip.mp4"));
        assert!(store.contains("Videos/sports_videos/clip.mp4"));
        assert_eq!(orphans.keys(), vec!["Videos/music_videos/clip.mp4".to_string()]);

        // Sweep while storage is still failing leaves the entry in place
        assert_eq!(relocator.sweep_orphans(10).await.unwrap(), 0);
        assert_eq!(orphans.keys().len(), 1);

        store.fail_deletes(false);
        assert_eq!(relocator.sweep_orphans(10).await.unwrap(), 1);
        assert!(orphans.keys().is_empty());
        assert!(!store.contains("Videos/music_videos/clip.mp4"));
    }

    #[tokio::test]
    async fn test_upload_over_orphaned_key_survives_sweep() {
        let (relocator, store, orphans) = relocator();
        let url = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();
        store.fail_deletes(true);
        relocator
            .relocate(&url, "sports", EntityKind::Video)
            .await
            .unwrap();
        store.fail_deletes(false);

        let reuploaded = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();

        assert_eq!(reuploaded, url);
        assert!(orphans.keys().is_empty());
        assert_eq!(relocator.sweep_orphans(10).await.unwrap(), 0);
        assert!(store.contains("Videos/music_videos/clip.mp4"));
        assert!(store.contains("Videos/sports_videos/clip.mp4"));
    }

    #[tokio::test]
    async fn test_relocate_back_over_orphaned_key_survives_sweep() {
        let (relocator, store, orphans) = relocator();
        let url = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();
        store.fail_deletes(true);
        let sports_url = relocator
            .relocate(&url, "sports", EntityKind::Video)
            .await
            .unwrap();
        store.fail_deletes(false);

        let back = relocator
            .relocate(&sports_url, "music", EntityKind::Video)
            .await
            .unwrap();

        assert_eq!(back, url);
        assert!(orphans.keys().is_empty());
        assert_eq!(relocator.sweep_orphans(10).await.unwrap(), 0);
        assert_eq!(store.keys(), vec!["Videos/music_videos/clip.mp4".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_write_over_orphaned_key_records_it_again() {
        let (relocator, store, orphans) = relocator();
        let url = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();
        store.fail_deletes(true);
        relocator
            .relocate(&url, "sports", EntityKind::Video)
            .await
            .unwrap();
        store.fail_deletes(false);
        store.fail_puts(true);

        let result = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert_eq!(orphans.keys(), vec!["Videos/music_videos/clip.mp4".to_string()]);
    }

    #[tokio::test]
    async fn test_upload_over_live_key_is_conflict() {
        let (relocator, store, _) = relocator();
        relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();

        let second = UploadPayload {
            data: vec![9, 9],
            ..video("clip.mp4")
        };
        let result = relocator
            .upload(second, Some("music"), EntityKind::Video)
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.keys(), vec!["Videos/music_videos/clip.mp4".to_string()]);

        // The same name under another category is a different key
        relocator
            .upload(video("clip.mp4"), Some("sports"), EntityKind::Video)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_replacing_own_object_overwrites() {
        let (relocator, store, orphans) = relocator();
        let url = relocator
            .upload(video("thumb.png"), None, EntityKind::Thumbnail)
            .await
            .unwrap();

        let replaced = relocator
            .upload_replacing(video("thumb.png"), None, EntityKind::Thumbnail, Some(&url))
            .await
            .unwrap();
        assert_eq!(replaced, url);

        let other = relocator
            .upload(video("other.png"), None, EntityKind::Thumbnail)
            .await
            .unwrap();
        let result = relocator
            .upload_replacing(video("thumb.png"), None, EntityKind::Thumbnail, Some(&other))
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.keys().len(), 2);
        assert!(orphans.keys().is_empty());
    }

    #[tokio::test]
    async fn test_relocate_onto_live_key_is_conflict() {
        let (relocator, store, orphans) = relocator();
        let music = relocator
            .upload(video("clip.mp4"), Some("music"), EntityKind::Video)
            .await
            .unwrap();
        relocator
            .upload(video("clip.mp4"), Some("sports"), EntityKind::Video)
            .await
            .unwrap();

        let result = relocator.relocate(&music, "sports", EntityKind::Video).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(
            store.keys(),
            vec![
                "Videos/music_videos/clip.mp4".to_string(),
                "Videos/sports_videos/clip.mp4".to_string(),
            ]
        );
        assert!(orphans.keys().is_empty());
    }

    #[tokio::test]
    async fn test_sweep_moves_past_undeletable_orphan() {
        let (relocator, store, orphans) = relocator();
        for name in ["stuck.png", "a.png", "b.png"] {
            relocator
                .upload(video(name), None, EntityKind::Thumbnail)
                .await
                .unwrap();
        }
        store.fail_deletes(true);
        for name in ["stuck.png", "a.png", "b.png"] {
            relocator
                .discard(&format!("{}/Thumbnails/{}", BASE, name), "test")
                .await;
        }
        store.fail_deletes(false);
        store.fail_deletes_of("Thumbnails/stuck.png", true);

        assert_eq!(relocator.sweep_orphans(1).await.unwrap(), 0);
        assert_eq!(relocator.sweep_orphans(1).await.unwrap(), 1);
        assert_eq!(relocator.sweep_orphans(1).await.unwrap(), 1);
        assert_eq!(orphans.keys(), vec!["Thumbnails/stuck.png".to_string()]);
        assert_eq!(store.keys(), vec!["Thumbnails/stuck.png".to_string()]);

        store.fail_deletes_of("Thumbnails/stuck.png", false);
        assert_eq!(relocator.sweep_orphans(1).await.unwrap(), 1);
        assert!(orphans.keys().is_empty());
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_relocate_malformed_url_is_invalid_reference() {
        let (relocator, store, _) = relocator();

        let result = relocator
            .relocate("::not-a-url::", "sports", EntityKind::Video)
            .await;

        assert!(matches!(result, Err(AppError::InvalidReference(_))));
        assert!(store.keys().is_empty());
    }

    #[tokio::test]
    async fn test_discard_records_orphan_on_failure() {
        let (relocator, store, orphans) = relocator();
        let url = relocator
            .upload(video("thumb.png"), None, EntityKind::Thumbnail)
            .await
            .unwrap();
        store.fail_deletes(true);

        relocator.discard(&url, "thumbnail replaced").await;

        assert_eq!(orphans.keys(), vec!["Thumbnails/thumb.png".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_removes_object() {
        let (relocator, store, _) = relocator();
        let url = relocator
            .upload(video("thumb.png"), None, EntityKind::Thumbnail)
            .await
            .unwrap();

        relocator.delete(&url).await.unwrap();

        assert!(!store.contains("Thumbnails/thumb.png"));
    }
}
