mod comment_service;
mod video_service;

pub use comment_service::CommentService;
pub use video_service::VideoService;
