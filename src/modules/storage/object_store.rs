use async_trait::async_trait;

use crate::core::error::Result;

/// Minimal bucket operations the relocator needs.
///
/// Keys are bucket-relative (`Videos/music_videos/clip.mp4`). Implementations
/// report failures as `AppError::Storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload an object, replacing any existing object under the key
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<()>;

    /// Server-side copy within the bucket
    async fn copy(&self, from_key: &str, to_key: &str) -> Result<()>;

    /// Delete an object; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Check whether an object exists
    async fn exists(&self, key: &str) -> Result<bool>;
}
