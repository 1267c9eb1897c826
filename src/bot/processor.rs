use std::sync::Arc;

use log::{debug, error, info};

use crate::{
    domain::track::TrackMatch,
    matching::{matcher::TrackMatcher, title},
    slack::Notifier,
    spotify::{CatalogError, PlaylistAppend},
    youtube::MetadataExtractor,
};

/// How a link-processing run ended. Each outcome is reported once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ExtractFailed { url: String },
    NoMatch { title: String },
    AppendFailed { track: TrackMatch },
    Done { track: TrackMatch },
}

impl Outcome {
    /// Chat message announcing this outcome
    pub fn message(&self) -> String {
        match self {
            Outcome::ExtractFailed { url } => {
                format!("❌ Could not extract song info from: {url}")
            }
            Outcome::NoMatch { title } => format!("❌ Could not find '{title}' on Spotify"),
            Outcome::AppendFailed { track } => {
                format!("❌ Failed to add '{}' to playlist", track.name)
            }
            Outcome::Done { track } => {
                format!("✅ Added to playlist: *{} - {}*", track.artists(), track.name)
            }
        }
    }
}

/// Takes one video link all the way to the playlist.
pub struct LinkProcessor {
    extractor: Arc<dyn MetadataExtractor>,
    matcher: TrackMatcher,
    playlist: Arc<dyn PlaylistAppend>,
    playlist_id: Option<String>,
    notifier: Arc<dyn Notifier>,
}

impl LinkProcessor {
    pub fn new(
        extractor: Arc<dyn MetadataExtractor>,
        matcher: TrackMatcher,
        playlist: Arc<dyn PlaylistAppend>,
        playlist_id: Option<String>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            extractor,
            matcher,
            playlist,
            playlist_id,
            notifier,
        }
    }

    /// Runs the link through extraction, matching and appending, then posts
    /// the outcome to `channel`. Never fails; every error ends up in the
    /// returned outcome and the chat message.
    pub fn process(&self, url: &str, channel: &str) -> Outcome {
        info!("Processing YouTube URL: {url}");

        let outcome = self.run(url);

        if let Err(e) = self.notifier.post_message(channel, &outcome.message()) {
            error!("Error sending message to {channel}: {e}");
        }

        outcome
    }

    fn run(&self, url: &str) -> Outcome {
        let video = match self.extractor.extract(url) {
            Ok(video) => video,
            Err(e) => {
                error!("Error extracting info from {url}: {e}");
                return Outcome::ExtractFailed {
                    url: url.to_string(),
                };
            }
        };

        debug!(
            "Extracted '{}' uploaded by '{}' from {}",
            video.title, video.uploader_name, video.source_url
        );

        let candidate = title::parse(&video.title);
        if candidate.has_artist() {
            info!("Parsed artist '{}', song '{}'", candidate.artist, candidate.song);
        } else {
            info!("No artist in '{}', searching by title", video.title);
        }

        let track = match self
            .matcher
            .find(&candidate.artist, &candidate.song, &video.title)
        {
            Ok(Some(track)) => track,
            Ok(None) => return Outcome::NoMatch { title: video.title },
            Err(e) => {
                error!("Error searching Spotify: {e}");
                return Outcome::NoMatch { title: video.title };
            }
        };

        match self.append(&track) {
            Ok(()) => Outcome::Done { track },
            Err(e) => {
                error!("Error adding track {} to playlist: {e}", track.id);
                Outcome::AppendFailed { track }
            }
        }
    }

    fn append(&self, track: &TrackMatch) -> Result<(), CatalogError> {
        let playlist_id = self
            .playlist_id
            .as_deref()
            .ok_or(CatalogError::PlaylistNotConfigured)?;

        self.playlist.add_track(playlist_id, track)
    }
}
