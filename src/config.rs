use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: u32,
    pub http: HttpConfig,
    pub slack: SlackConfig,
    pub spotify: SpotifyConfig,
    #[serde(default)]
    pub youtube: YoutubeConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Config> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Failed to parse config TOML")
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub bind_addr: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SlackConfig {
    pub bot_token: String,
    /// Messages from this user are the bot's own and never processed.
    pub bot_user_id: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub playlist_id: Option<String>,
    #[serde(default = "default_token_cache")]
    pub token_cache: PathBuf,
}

fn default_token_cache() -> PathBuf {
    PathBuf::from(".spotify_token.json")
}

#[derive(Debug, Deserialize, Clone)]
pub struct YoutubeConfig {
    #[serde(default = "default_ytdlp")]
    pub executable: PathBuf,
}

fn default_ytdlp() -> PathBuf {
    PathBuf::from("yt-dlp")
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            executable: default_ytdlp(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DispatchConfig {
    /// Upper bound on links processed at once; unbounded when absent.
    pub max_concurrent_links: Option<usize>,
}
