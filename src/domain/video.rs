/// Metadata of a single video, as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoMetadata {
    pub title: String,
    pub uploader_name: String,
    pub source_url: String,
}
