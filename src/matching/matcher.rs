use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    domain::track::TrackMatch,
    spotify::{CatalogError, CatalogSearch, SEARCH_LIMIT},
};

/// Finds the catalog track for a parsed title.
///
/// Queries go from most to least specific; the first query with any result
/// wins and its top hit is returned.
pub struct TrackMatcher {
    search: Arc<dyn CatalogSearch>,
}

impl TrackMatcher {
    pub fn new(search: Arc<dyn CatalogSearch>) -> Self {
        Self { search }
    }

    /// Candidate queries in the order they are tried.
    pub fn queries(artist: &str, song: &str, original_title: &str) -> Vec<String> {
        let mut queries = Vec::with_capacity(5);

        if !artist.is_empty() && !song.is_empty() {
            queries.push(format!(r#"artist:"{artist}" track:"{song}""#));
            queries.push(format!(r#""{artist}" "{song}""#));
            queries.push(format!("{artist} {song}"));
        }

        queries.push(format!(r#""{original_title}""#));
        queries.push(original_title.to_string());

        queries
    }

    /// Returns `Ok(None)` when every query came back empty.
    ///
    /// A failing search request stops the walk; the remaining queries would
    /// hit the same backend.
    pub fn find(
        &self,
        artist: &str,
        song: &str,
        original_title: &str,
    ) -> Result<Option<TrackMatch>, CatalogError> {
        for query in Self::queries(artist, song, original_title) {
            info!("Searching Spotify with query: {query}");

            let results = self.search.search_tracks(&query, SEARCH_LIMIT)?;
            debug!("{} results for {query}", results.len());

            if let Some(track) = results.into_iter().next() {
                info!("Found track: {} - {}", track.artists(), track.name);
                return Ok(Some(track));
            }
        }

        warn!("No Spotify track found for: {original_title}");
        Ok(None)
    }
}
