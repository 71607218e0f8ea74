use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for video categories
    /// Categories become part of storage keys, so only lowercase slugs are accepted
    /// - Valid: "music", "sports", "how-to", "top10"
    /// - Invalid: "-music", "music-", "Music", "music/rock", "music videos"
    pub static ref CATEGORY_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}
