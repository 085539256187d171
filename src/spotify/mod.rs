//! # Spotify Integration Module
//!
//! This module is the integration layer between the dataset pipeline and the
//! Spotify Web API. It handles authentication, HTTP communication, pagination,
//! status mapping and the short waits the API asks for when it throttles.
//!
//! ## Architecture
//!
//! ```text
//! Pipeline (artist → albums → tracks → rows)
//!          ↓
//! CatalogApi trait
//!          ↓
//! SpotifyClient
//!     ├── Authentication (client credentials, TokenManager)
//!     ├── Artist Operations (search, album listing)
//!     ├── Album Operations (track listing)
//!     └── Track Operations (metadata, audio features)
//!          ↓
//! HTTP Layer (reqwest, serde_json)
//!          ↓
//! Spotify Web API
//! ```
//!
//! The pipeline only talks to the [`CatalogApi`] trait. [`SpotifyClient`] is
//! the production implementation, tests provide in-memory catalogs.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - client credentials grant
//! - `GET /search?type=artist` - artist lookup by name
//! - `GET /artists/{id}/albums` - paginated discography, filtered by album group
//! - `GET /albums/{id}/tracks` - paginated track listing
//! - `GET /tracks/{id}` - track metadata
//! - `GET /audio-features/{id}` - audio features
//!
//! ## Status Handling
//!
//! | Status | Result |
//! |---|---|
//! | 2xx | body decoded as JSON |
//! | 401 | token re-requested once, then [`Error::Auth`] |
//! | 404 | [`Error::NotFound`] |
//! | 429 | one wait of `Retry-After` seconds (1 when absent, at most 120), then [`Error::RateLimited`] |
//! | 502 | one wait of 10 seconds, then [`Error::Http`] |
//! | other | [`Error::Http`] |

pub mod albums;
pub mod artists;
pub mod auth;
pub mod paging;
pub mod tracks;

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::{
    Res,
    config::Config,
    error::Error,
    management::{Clock, SystemClock, TokenManager},
    types::{AlbumGroups, AlbumRecord, ArtistRecord, MatchPolicy, TrackFeatures, TrackMetadata},
    utils, warning,
};

use paging::{AlbumTracks, ArtistAlbums, Page, Pages};

/// Longest `Retry-After` the client is willing to sit out.
pub const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Wait after a 429 answer that carries no `Retry-After` header.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Wait before repeating a request that failed with 502 Bad Gateway.
pub const BAD_GATEWAY_WAIT: Duration = Duration::from_secs(10);

/// Read operations the dataset pipeline needs from a music catalog.
///
/// Implementors provide the single-page primitives; full listings and the
/// artist match are provided on top of them.
#[allow(async_fn_in_trait)]
pub trait CatalogApi: Sized {
    /// Artists returned by a name search, best ranked first.
    async fn search_artists(&mut self, query: &str) -> Res<Vec<ArtistRecord>>;

    async fn artist_albums_page(
        &mut self,
        artist_uri: &str,
        groups: &AlbumGroups,
        cursor: Option<String>,
    ) -> Res<Page<AlbumRecord>>;

    async fn album_tracks_page(
        &mut self,
        album_id: &str,
        cursor: Option<String>,
    ) -> Res<Page<String>>;

    async fn track_metadata(&mut self, track_id: &str) -> Res<TrackMetadata>;

    async fn track_features(&mut self, track_id: &str) -> Res<TrackFeatures>;

    /// Resolves an artist name to a single catalog artist.
    ///
    /// Fails with [`Error::NotFound`] when the search has no results.
    async fn search_artist(&mut self, name: &str, policy: MatchPolicy) -> Res<ArtistRecord> {
        let candidates = self.search_artists(name).await?;
        utils::choose_artist(name, candidates, policy)
            .ok_or_else(|| Error::NotFound(format!("no artist matches {:?}", name)))
    }

    /// Every album of the artist, following pagination to the last page.
    async fn list_artist_albums(
        &mut self,
        artist_uri: &str,
        groups: &AlbumGroups,
    ) -> Res<Vec<AlbumRecord>> {
        Pages::new(self, ArtistAlbums { artist_uri, groups })
            .collect_all()
            .await
    }

    /// Every track id of the album, following pagination to the last page.
    async fn list_album_tracks(&mut self, album_id: &str) -> Res<Vec<String>> {
        Pages::new(self, AlbumTracks { album_id })
            .collect_all()
            .await
    }
}

impl<T: CatalogApi> CatalogApi for &mut T {
    async fn search_artists(&mut self, query: &str) -> Res<Vec<ArtistRecord>> {
        (**self).search_artists(query).await
    }

    async fn artist_albums_page(
        &mut self,
        artist_uri: &str,
        groups: &AlbumGroups,
        cursor: Option<String>,
    ) -> Res<Page<AlbumRecord>> {
        (**self).artist_albums_page(artist_uri, groups, cursor).await
    }

    async fn album_tracks_page(
        &mut self,
        album_id: &str,
        cursor: Option<String>,
    ) -> Res<Page<String>> {
        (**self).album_tracks_page(album_id, cursor).await
    }

    async fn track_metadata(&mut self, track_id: &str) -> Res<TrackMetadata> {
        (**self).track_metadata(track_id).await
    }

    async fn track_features(&mut self, track_id: &str) -> Res<TrackFeatures> {
        (**self).track_features(track_id).await
    }
}

/// Spotify Web API client authenticated with the client credentials grant.
///
/// The clock only drives the waits after 429 and 502 answers.
pub struct SpotifyClient<C = SystemClock> {
    http: Client,
    api_url: String,
    tokens: TokenManager,
    clock: C,
}

impl SpotifyClient<SystemClock> {
    /// Creates a client and obtains the first access token.
    ///
    /// # Errors
    ///
    /// [`Error::Auth`] when the credentials are missing or rejected. Nothing
    /// else has happened at that point, so the run can stop cleanly.
    pub async fn connect(config: &Config) -> Res<Self> {
        SpotifyClient::connect_with_clock(config, SystemClock).await
    }
}

impl<C: Clock> SpotifyClient<C> {
    pub async fn connect_with_clock(config: &Config, clock: C) -> Res<Self> {
        let credentials = config.credentials()?;
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let mut tokens = TokenManager::new(http.clone(), config.token_url.clone(), credentials);
        tokens.get_valid_token().await?;

        Ok(SpotifyClient {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            tokens,
            clock,
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Sends an authenticated GET and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &mut self,
        url: &str,
        query: &[(&str, String)],
    ) -> Res<T> {
        let mut reauthenticated = false;
        let mut waited = false;

        loop {
            let token = self.tokens.get_valid_token().await?;
            let response = self
                .http
                .get(url)
                .query(query)
                .bearer_auth(token)
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                let body = response.text().await?;
                return Ok(serde_json::from_str(&body)?);
            }

            match status {
                StatusCode::UNAUTHORIZED if !reauthenticated => {
                    self.tokens.invalidate();
                    reauthenticated = true;
                    continue;
                }
                StatusCode::UNAUTHORIZED => {
                    return Err(Error::Auth(format!("access token rejected for {}", url)));
                }
                StatusCode::NOT_FOUND => {
                    return Err(Error::NotFound(url.to_string()));
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    let retry_after = retry_after(&response);
                    let wait = retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    if wait > MAX_RETRY_AFTER_SECS {
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds. Try your best tomorrow again.",
                            wait
                        );
                    } else if !waited {
                        waited = true;
                        self.clock.sleep(Duration::from_secs(wait)).await;
                        continue;
                    }
                    return Err(Error::RateLimited { retry_after });
                }
                StatusCode::BAD_GATEWAY if !waited => {
                    waited = true;
                    self.clock.sleep(BAD_GATEWAY_WAIT).await;
                    continue;
                }
                _ => {}
            }

            // redirects are followed by reqwest, so this is an error status
            return Err(response
                .error_for_status()
                .err()
                .map(Error::from)
                .unwrap_or_else(|| Error::NotFound(format!("{} answered {}", url, status))));
        }
    }
}

fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

impl<C: Clock> CatalogApi for SpotifyClient<C> {
    async fn search_artists(&mut self, query: &str) -> Res<Vec<ArtistRecord>> {
        self.search_artist_candidates(query).await
    }

    async fn artist_albums_page(
        &mut self,
        artist_uri: &str,
        groups: &AlbumGroups,
        cursor: Option<String>,
    ) -> Res<Page<AlbumRecord>> {
        self.get_artist_albums_page(artist_uri, groups, cursor).await
    }

    async fn album_tracks_page(
        &mut self,
        album_id: &str,
        cursor: Option<String>,
    ) -> Res<Page<String>> {
        self.get_album_tracks_page(album_id, cursor).await
    }

    async fn track_metadata(&mut self, track_id: &str) -> Res<TrackMetadata> {
        self.get_track(track_id).await
    }

    async fn track_features(&mut self, track_id: &str) -> Res<TrackFeatures> {
        self.get_audio_features(track_id).await
    }
}
