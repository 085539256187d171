//! Configuration management for the dataset collector.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files and turns them into an explicit [`Config`] value that is
//! handed to the catalog client and the pipeline at construction time.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Command-line flags (applied by the CLI on top of [`Config`])
//! 2. Environment variables
//! 3. `.env` file in the local data directory, then in the working directory
//! 4. Application defaults

use std::{env, path::PathBuf};

use crate::{
    Res,
    error::Error,
    types::{AlbumGroups, MatchPolicy},
    utils,
};

pub const ENV_CLIENT_ID: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const ENV_API_URL: &str = "SPOTIFY_API_URL";
pub const ENV_TOKEN_URL: &str = "SPOTIFY_API_TOKEN_URL";
pub const ENV_ARTISTS: &str = "SPORLDATA_ARTISTS";
pub const ENV_OUTPUT: &str = "SPORLDATA_OUTPUT";
pub const ENV_REQUEST_PACE_MS: &str = "SPORLDATA_REQUEST_PACE_MS";
pub const ENV_ARTIST_MATCH: &str = "SPORLDATA_ARTIST_MATCH";
pub const ENV_ALBUM_GROUPS: &str = "SPORLDATA_ALBUM_GROUPS";
pub const ENV_NORMALIZE: &str = "SPORLDATA_NORMALIZE";

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_OUTPUT: &str = "Dataset.csv";
pub const DEFAULT_REQUEST_PACE_MS: u64 = 500;

/// Artists collected when nothing else is configured.
pub const DEFAULT_ARTISTS: [&str; 14] = [
    "Coldplay",
    "Green Day",
    "JP Cooper",
    "The Beatles",
    "Europe",
    "Firehouse",
    "The Outfield",
    "Scorpions",
    "Oasis",
    "Megadeth",
    "Metallica",
    "Iron Maiden",
    "Lynyrd Skynyrd",
    "Kansas",
];

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the platform-specific local data directory under
/// `sporldata/.env`, then for one in the current working directory. Variables
/// that are already set in the environment are never overwritten, so the
/// process environment always wins over either file. Missing files are not
/// an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sporldata/.env`
/// - macOS: `~/Library/Application Support/sporldata/.env`
/// - Windows: `%LOCALAPPDATA%/sporldata/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or if a `.env`
/// file exists but cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_file_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    for candidate in [path, PathBuf::from(".env")] {
        if !candidate.is_file() {
            continue;
        }
        dotenv::from_path(&candidate).map_err(|e| {
            Error::Config(format!("cannot load {}: {}", candidate.display(), e))
        })?;
    }

    Ok(())
}

/// Location of the user-level `.env` file.
pub fn env_file_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporldata/.env");
    path
}

/// Client credentials for the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Everything a collection run needs to know.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub artist_names: Vec<String>,
    pub output_path: PathBuf,
    pub request_pace_ms: u64,
    pub match_policy: MatchPolicy,
    pub album_groups: AlbumGroups,
    pub normalize_text: bool,
    pub api_url: String,
    pub token_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            client_id: String::new(),
            client_secret: String::new(),
            artist_names: DEFAULT_ARTISTS.iter().map(|a| a.to_string()).collect(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            request_pace_ms: DEFAULT_REQUEST_PACE_MS,
            match_policy: MatchPolicy::default(),
            album_groups: AlbumGroups::default(),
            normalize_text: false,
            api_url: DEFAULT_API_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Unset or blank values fall back to the defaults. Values that are set
    /// but cannot be parsed are reported as [`Error::Config`].
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Config::default();

        if let Some(id) = get(ENV_CLIENT_ID) {
            config.client_id = id;
        }
        if let Some(secret) = get(ENV_CLIENT_SECRET) {
            config.client_secret = secret;
        }
        if let Some(url) = get(ENV_API_URL) {
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(url) = get(ENV_TOKEN_URL) {
            config.token_url = url;
        }
        if let Some(artists) = get(ENV_ARTISTS) {
            config.artist_names = utils::parse_artist_list(&artists);
        }
        if let Some(output) = get(ENV_OUTPUT) {
            config.output_path = PathBuf::from(output);
        }
        if let Some(pace) = get(ENV_REQUEST_PACE_MS) {
            config.request_pace_ms = pace.parse::<u64>().map_err(|_| {
                Error::Config(format!(
                    "{} must be a number of milliseconds, got {:?}",
                    ENV_REQUEST_PACE_MS, pace
                ))
            })?;
        }
        if let Some(policy) = get(ENV_ARTIST_MATCH) {
            config.match_policy = utils::parse_match_policy(&policy)
                .map_err(|e| Error::Config(format!("{}: {}", ENV_ARTIST_MATCH, e)))?;
        }
        if let Some(groups) = get(ENV_ALBUM_GROUPS) {
            config.album_groups = utils::parse_album_groups(&groups)
                .map_err(|e| Error::Config(format!("{}: {}", ENV_ALBUM_GROUPS, e)))?;
        }
        if let Some(flag) = get(ENV_NORMALIZE) {
            config.normalize_text = utils::parse_bool(&flag)
                .map_err(|e| Error::Config(format!("{}: {}", ENV_NORMALIZE, e)))?;
        }

        Ok(config)
    }

    /// Returns the client credentials.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::Auth`] when either value is empty, so a run stops
    /// before any request is sent or any output is written.
    pub fn credentials(&self) -> Res<Credentials> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(Error::Auth(format!(
                "client credentials are missing, set {} and {}",
                ENV_CLIENT_ID, ENV_CLIENT_SECRET
            )));
        }

        Ok(Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        })
    }
}
