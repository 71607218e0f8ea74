mod comment_dto;
mod video_dto;

pub use comment_dto::*;
pub use video_dto::*;
