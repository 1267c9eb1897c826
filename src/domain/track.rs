/// Artist and song guessed from a free-text video title.
///
/// `artist` is empty when the title had no recognizable structure,
/// in which case `song` holds the whole title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCandidate {
    pub artist: String,
    pub song: String,
}

impl ParsedCandidate {
    pub fn has_artist(&self) -> bool {
        !self.artist.is_empty()
    }
}

/// Best catalog hit for a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMatch {
    pub id: String,
    pub name: String,
    pub artist_names: Vec<String>,
}

impl TrackMatch {
    /// Artist names joined for display, e.g. `"Daft Punk, Romanthony"`.
    pub fn artists(&self) -> String {
        self.artist_names.join(", ")
    }

    /// Catalog URI accepted by the playlist endpoint.
    pub fn uri(&self) -> String {
        format!("spotify:track:{}", self.id)
    }
}
