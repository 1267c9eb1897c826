use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::config::SpotifyConfig;

use super::{
    CatalogError,
    token::{Token, TokenCache, TokenResponse},
};

const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Permissions needed to add tracks to public and private playlists.
pub const SCOPE: &str = "playlist-modify-public playlist-modify-private";

/// Authorization-code flow state: app credentials plus the current token.
///
/// The token is shared by every request and replaced in place when it is
/// refreshed or when a new authorization code comes in through the callback.
pub struct SpotifyAuth {
    config: SpotifyConfig,
    http: ureq::Agent,
    cache: TokenCache,
    token: Mutex<Option<Token>>,
}

impl SpotifyAuth {
    /// Loads the cached token if there is one. A broken cache file is
    /// ignored and treated as "not authorized yet".
    pub fn new(config: SpotifyConfig, http: ureq::Agent) -> Self {
        let cache = TokenCache::new(&config.token_cache);
        let token = match cache.load() {
            Ok(Some(token)) => {
                info!("Loaded cached Spotify token from {}", cache.path().display());
                Some(token)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Ignoring Spotify token cache: {e:#}");
                None
            }
        };

        Self {
            config,
            http,
            cache,
            token: Mutex::new(token),
        }
    }

    pub fn authorize_url(&self) -> String {
        format!(
            "{AUTHORIZE_URL}?client_id={}&response_type=code&redirect_uri={}&scope={}",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(SCOPE),
        )
    }

    pub fn has_token(&self) -> bool {
        self.lock().is_some()
    }

    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        self.lock().as_ref().map(|t| t.expires_at)
    }

    /// Trades the code from the OAuth redirect for a token and caches it.
    pub fn exchange_code(&self, code: &str) -> Result<Token, CatalogError> {
        let response = self.request_token(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ])?;
        let token = Token::from_response(response, Utc::now(), None);

        self.persist(&token);
        *self.lock() = Some(token.clone());
        info!("Spotify authentication successful");

        Ok(token)
    }

    /// A valid access token, refreshed first if the cached one has expired.
    ///
    /// The token lock is held across the refresh request, so concurrent
    /// callers wait for one refresh instead of each sending their own.
    pub fn access_token(&self) -> Result<String, CatalogError> {
        let mut guard = self.lock();
        let current = guard
            .as_ref()
            .ok_or(CatalogError::AuthenticationUnavailable)?;

        if !current.is_expired(Utc::now()) {
            return Ok(current.access_token.clone());
        }

        let refresh_token = current
            .refresh_token
            .clone()
            .ok_or(CatalogError::AuthenticationUnavailable)?;

        info!("Refreshing Spotify access token");
        let response = self.request_token(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token.as_str()),
        ])?;
        let token = Token::from_response(response, Utc::now(), Some(refresh_token));
        self.persist(&token);

        let access_token = token.access_token.clone();
        *guard = Some(token);
        Ok(access_token)
    }

    fn request_token(&self, params: &[(&str, &str)]) -> Result<TokenResponse, CatalogError> {
        let mut form = params.to_vec();
        form.push(("client_id", self.config.client_id.as_str()));
        form.push(("client_secret", self.config.client_secret.as_str()));

        self.http
            .post(TOKEN_URL)
            .send_form(&form)?
            .into_json()
            .map_err(CatalogError::Decode)
    }

    fn persist(&self, token: &Token) {
        if let Err(e) = self.cache.save(token) {
            warn!("Could not cache Spotify token: {e:#}");
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Token>> {
        self.token.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
