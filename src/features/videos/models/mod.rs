mod comment;
mod video;

pub use comment::{Comment, NewComment};
pub use video::{NewVideo, Video, VideoUpdate};
