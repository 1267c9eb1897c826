use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use log::warn;
use std::{path::PathBuf, sync::Arc};

use crate::{
    bot::{dispatcher::MessageDispatcher, processor::LinkProcessor, spawn},
    config::Config,
    http::{client::build_agent, server::HttpServer},
    matching::{matcher::TrackMatcher, title},
    slack::client::SlackClient,
    spotify::{auth::SpotifyAuth, client::SpotifyClient},
    youtube::ytdlp::YtDlp,
};

#[derive(Parser)]
#[command(name = "tubelist")]
#[command(version = "0.1")]
#[command(about = "Adds songs linked in Slack to a Spotify playlist")]
pub struct Cli {
    /// Path to the config TOML file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Slack webhook server
    Serve,
    /// Check Spotify authorization and list playlists
    Setup,
    /// Show how a video title is split into artist and song
    Parse {
        /// Video title, quoted
        title: String,
    },
}

/// Entrypoint for CLI
pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve => serve(Config::load(&cli.config)?),
        Commands::Setup => setup(Config::load(&cli.config)?),
        Commands::Parse { title: video_title } => {
            let parsed = title::parse(video_title);
            println!("artist: {}", parsed.artist);
            println!("song:   {}", parsed.song);
            println!("queries:");
            for query in TrackMatcher::queries(&parsed.artist, &parsed.song, video_title) {
                println!("    - {query}");
            }
            Ok(())
        }
    }
}

fn serve(cfg: Config) -> anyhow::Result<()> {
    println!("Starting HTTP server...");

    let http = build_agent();
    let auth = Arc::new(SpotifyAuth::new(cfg.spotify.clone(), http.clone()));
    if !auth.has_token() {
        warn!("No cached Spotify token found, links will fail until the app is authorized.");
        warn!("Visit this URL to authorize: {}", auth.authorize_url());
    }
    if cfg.spotify.playlist_id.is_none() {
        warn!("spotify.playlist_id is not set, matched tracks cannot be added");
    }

    let spotify = Arc::new(SpotifyClient::new(http.clone(), Arc::clone(&auth)));
    let processor = LinkProcessor::new(
        Arc::new(YtDlp::new(cfg.youtube.executable)),
        TrackMatcher::new(spotify.clone()),
        spotify,
        cfg.spotify.playlist_id,
        Arc::new(SlackClient::new(http, cfg.slack.bot_token)),
    );
    let spawner = spawn::spawner(cfg.dispatch.max_concurrent_links)?;
    let dispatcher =
        MessageDispatcher::new(Arc::new(processor), Arc::from(spawner), cfg.slack.bot_user_id);

    let http_server = HttpServer::new(Arc::new(dispatcher), auth, cfg.http);

    println!(
        "HTTP server running at http://{}:{}",
        http_server.config.bind_addr, http_server.config.port
    );
    http_server.run();

    Ok(())
}

fn setup(cfg: Config) -> anyhow::Result<()> {
    println!("Slack to Spotify setup");
    println!("{}", "=".repeat(40));

    let http = build_agent();
    let auth = Arc::new(SpotifyAuth::new(cfg.spotify, http.clone()));

    let Some(expires_at) = auth.token_expiry() else {
        let url = auth.authorize_url();
        println!("No cached Spotify token. Visit this URL to authorize:");
        println!("  {url}");

        if let Err(e) = webbrowser::open(&url) {
            println!("Could not open browser automatically: {e}");
        }

        println!();
        println!("After authorizing you are redirected to the callback URL.");
        println!("Keep `serve` running so it can store the token, then run setup again.");
        return Ok(());
    };

    println!(
        "Found cached Spotify token, expires {}",
        expires_at.with_timezone(&Local)
    );

    let client = SpotifyClient::new(http, auth);
    let user = client
        .current_user()
        .context("Error testing Spotify connection")?;
    println!(
        "Authenticated as: {} ({})",
        user.display_name.as_deref().unwrap_or(&user.id),
        user.id
    );

    let playlists = client
        .current_user_playlists(10)
        .context("Failed to list playlists")?;
    println!();
    println!("Your playlists:");
    for (i, playlist) in playlists.iter().enumerate() {
        println!("  {}. {} (ID: {})", i + 1, playlist.name, playlist.id);
    }

    println!();
    println!("To use a playlist, add it to your config file:");
    println!("  [spotify]");
    println!("  playlist_id = \"<playlist_id>\"");

    Ok(())
}
