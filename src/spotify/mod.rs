//! Spotify Web API: catalog search, playlist edits and the OAuth flow.

use crate::domain::track::TrackMatch;

pub mod auth;
pub mod client;
pub mod error;
pub mod token;

pub use error::CatalogError;

/// Number of results requested per search query.
pub const SEARCH_LIMIT: usize = 5;

/// Track search against the music catalog.
///
/// Results are ordered by the catalog's own relevance ranking.
pub trait CatalogSearch: Send + Sync {
    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<TrackMatch>, CatalogError>;
}

/// Appending tracks to a playlist.
pub trait PlaylistAppend: Send + Sync {
    fn add_track(&self, playlist_id: &str, track: &TrackMatch) -> Result<(), CatalogError>;
}
