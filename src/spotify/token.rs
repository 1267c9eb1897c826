use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Tokens are refreshed this long before they actually expire.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// OAuth token as kept in the cache file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Body of the accounts service token endpoint
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

impl Token {
    /// Builds a token from an endpoint response received at `now`.
    ///
    /// Refresh responses may omit the refresh token, in which case the
    /// previous one stays valid.
    pub fn from_response(
        response: TokenResponse,
        now: DateTime<Utc>,
        previous_refresh: Option<String>,
    ) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token.or(previous_refresh),
            expires_at: now + Duration::seconds(response.expires_in),
            scope: response.scope,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

/// JSON file holding the last token obtained.
#[derive(Debug, Clone)]
pub struct TokenCache {
    path: PathBuf,
}

impl TokenCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when no token has been cached yet.
    pub fn load(&self) -> anyhow::Result<Option<Token>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read token cache {}", self.path.display()))?;
        let token = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse token cache {}", self.path.display()))?;

        Ok(Some(token))
    }

    pub fn save(&self, token: &Token) -> anyhow::Result<()> {
        let contents = serde_json::to_string_pretty(token).context("failed to serialize token")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("failed to write token cache {}", self.path.display()))
    }
}
