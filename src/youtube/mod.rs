//! YouTube links and video metadata.

use crate::domain::video::VideoMetadata;

pub mod error;
pub mod links;
pub mod ytdlp;

pub use error::ExtractionError;

/// Source of video metadata for a link.
pub trait MetadataExtractor: Send + Sync {
    fn extract(&self, url: &str) -> Result<VideoMetadata, ExtractionError>;
}
