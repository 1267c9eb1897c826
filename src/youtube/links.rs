use once_cell::sync::Lazy;
use regex::Regex;

/// `youtube.com/watch?v=ID` and `youtu.be/ID`, capturing the video id.
static VIDEO_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://(?:www\.)?(?:youtube\.com/watch\?v=|youtu\.be/)([a-zA-Z0-9_-]+)").unwrap()
});

pub fn canonical_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

/// Every video link in `text`, in order of appearance, as canonical URLs.
///
/// Repeated links are returned once per occurrence.
pub fn extract_video_urls(text: &str) -> Vec<String> {
    VIDEO_LINK
        .captures_iter(text)
        .map(|caps| canonical_url(&caps[1]))
        .collect()
}
