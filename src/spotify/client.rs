use std::sync::Arc;

use log::info;
use serde::Deserialize;
use serde_json::json;

use crate::domain::track::TrackMatch;

use super::{CatalogError, CatalogSearch, PlaylistAppend, auth::SpotifyAuth};

const API_BASE: &str = "https://api.spotify.com/v1";

/// Web API client; every call goes through [`SpotifyAuth`] for its token.
pub struct SpotifyClient {
    http: ureq::Agent,
    auth: Arc<SpotifyAuth>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Paging<TrackObject>,
}

#[derive(Debug, Deserialize)]
struct Paging<T> {
    items: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    id: String,
    name: String,
    artists: Vec<ArtistObject>,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
    name: String,
}

impl From<TrackObject> for TrackMatch {
    fn from(track: TrackObject) -> Self {
        Self {
            id: track.id,
            name: track.name,
            artist_names: track.artists.into_iter().map(|a| a.name).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
}

impl SpotifyClient {
    pub fn new(http: ureq::Agent, auth: Arc<SpotifyAuth>) -> Self {
        Self { http, auth }
    }

    fn get(&self, path: &str) -> Result<ureq::Request, CatalogError> {
        Ok(self
            .http
            .get(&format!("{API_BASE}{path}"))
            .set("Authorization", &self.bearer()?))
    }

    fn bearer(&self) -> Result<String, CatalogError> {
        Ok(format!("Bearer {}", self.auth.access_token()?))
    }

    pub fn current_user(&self) -> Result<UserProfile, CatalogError> {
        self.get("/me")?
            .call()?
            .into_json()
            .map_err(CatalogError::Decode)
    }

    pub fn current_user_playlists(&self, limit: usize) -> Result<Vec<PlaylistSummary>, CatalogError> {
        let page: Paging<PlaylistSummary> = self
            .get("/me/playlists")?
            .query("limit", &limit.to_string())
            .call()?
            .into_json()
            .map_err(CatalogError::Decode)?;

        Ok(page.items)
    }
}

impl CatalogSearch for SpotifyClient {
    fn search_tracks(&self, query: &str, limit: usize) -> Result<Vec<TrackMatch>, CatalogError> {
        let response: SearchResponse = self
            .get("/search")?
            .query("q", query)
            .query("type", "track")
            .query("limit", &limit.to_string())
            .call()?
            .into_json()
            .map_err(CatalogError::Decode)?;

        Ok(response.tracks.items.into_iter().map(TrackMatch::from).collect())
    }
}

impl PlaylistAppend for SpotifyClient {
    fn add_track(&self, playlist_id: &str, track: &TrackMatch) -> Result<(), CatalogError> {
        self.http
            .post(&format!("{API_BASE}/playlists/{playlist_id}/tracks"))
            .set("Authorization", &self.bearer()?)
            .send_json(json!({ "uris": [track.uri()] }))?;

        info!("Added track {} to playlist", track.id);
        Ok(())
    }
}
