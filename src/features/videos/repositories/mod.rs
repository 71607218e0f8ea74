mod comment_repository;
mod video_repository;

#[cfg(test)]
pub mod memory;

pub use comment_repository::{CommentRepository, PgCommentRepository};
pub use video_repository::{PgVideoRepository, VideoRepository};
