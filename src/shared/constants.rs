/// Rejection message for requests that reach a protected route without a token
pub const MISSING_TOKEN_MESSAGE: &str = "Access denied. No token provided.";

/// Default number of videos returned by list endpoints
pub const DEFAULT_VIDEO_LIMIT: i64 = 20;

/// Maximum number of videos a single list request may return
pub const MAX_VIDEO_LIMIT: i64 = 100;

// =============================================================================
// STORAGE LAYOUT
// =============================================================================

/// Top-level prefix for video objects
pub const VIDEOS_PREFIX: &str = "Videos";

/// Top-level prefix for thumbnail objects
pub const THUMBNAILS_PREFIX: &str = "Thumbnails";

/// Suffix appended to the category to form the video folder (`music_videos`)
pub const CATEGORY_FOLDER_SUFFIX: &str = "_videos";

/// Orphaned keys retried per sweep
pub const ORPHAN_SWEEP_BATCH: i64 = 100;
