#![allow(dead_code)]

use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

use sporldata::{
    Error, Res,
    management::Clock,
    spotify::{CatalogApi, paging::Page},
    types::{AlbumGroups, AlbumRecord, ArtistRecord, TrackFeatures, TrackMetadata},
};
use tokio::time::Instant;

/// Clock whose time only moves when advanced or slept on. Sleeps return
/// immediately and are recorded.
#[derive(Clone)]
pub struct ManualClock {
    now: Rc<RefCell<Instant>>,
    sleeps: Rc<RefCell<Vec<Duration>>>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Rc::new(RefCell::new(Instant::now())),
            sleeps: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn advance(&self, d: Duration) {
        *self.now.borrow_mut() += d;
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.borrow().clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.borrow()
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.borrow_mut().push(duration);
        self.advance(duration);
    }
}

/// In-memory catalog. Listings are stored as pages; cursors are `page:<n>`.
#[derive(Default)]
pub struct FakeCatalog {
    pub search_results: HashMap<String, Vec<ArtistRecord>>,
    pub album_pages: HashMap<String, Vec<Vec<AlbumRecord>>>,
    pub track_pages: HashMap<String, Vec<Vec<String>>>,
    pub metadata: HashMap<String, TrackMetadata>,
    pub features: HashMap<String, TrackFeatures>,
    pub reject_token_on: Option<String>,
    pub repeat_cursor: bool,
    pub clock: Option<ManualClock>,
    pub latency: Duration,
    pub page_requests: Vec<Option<String>>,
    pub metadata_requests: Vec<(String, Option<Instant>)>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_artist(mut self, query: &str, name: &str, id: &str) -> Self {
        self.search_results
            .entry(query.to_string())
            .or_default()
            .push(artist(name, id));
        self
    }

    pub fn with_albums(mut self, artist_id: &str, pages: Vec<Vec<AlbumRecord>>) -> Self {
        self.album_pages.insert(uri(artist_id), pages);
        self
    }

    /// Adds an album with the given tracks, all credited to `artist_name`.
    pub fn with_tracks(mut self, album: &AlbumRecord, artist_name: &str, track_ids: &[&str]) -> Self {
        let ids: Vec<String> = track_ids.iter().map(|t| t.to_string()).collect();
        for id in &ids {
            self.metadata.insert(
                id.clone(),
                metadata(id, &format!("Track {}", id), album, artist_name),
            );
            self.features.insert(id.clone(), features());
        }
        self.track_pages.insert(album.id.clone(), vec![ids]);
        self
    }

    fn page<T: Clone>(&mut self, pages: Option<&Vec<Vec<T>>>, cursor: Option<String>) -> Res<Page<T>> {
        self.page_requests.push(cursor.clone());

        let pages = match pages {
            Some(p) => p.clone(),
            None => return Ok(Page::last(Vec::new())),
        };
        let index = match &cursor {
            Some(c) => c
                .trim_start_matches("page:")
                .parse::<usize>()
                .map_err(|_| Error::NotFound(c.clone()))?,
            None => 0,
        };
        let items = pages
            .get(index)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("page {}", index)))?;

        let next = if self.repeat_cursor {
            Some("page:1".to_string())
        } else if index + 1 < pages.len() {
            Some(format!("page:{}", index + 1))
        } else {
            None
        };

        Ok(Page { items, next })
    }
}

impl CatalogApi for FakeCatalog {
    async fn search_artists(&mut self, query: &str) -> Res<Vec<ArtistRecord>> {
        Ok(self.search_results.get(query).cloned().unwrap_or_default())
    }

    async fn artist_albums_page(
        &mut self,
        artist_uri: &str,
        _groups: &AlbumGroups,
        cursor: Option<String>,
    ) -> Res<Page<AlbumRecord>> {
        let pages = self.album_pages.get(artist_uri).cloned();
        self.page(pages.as_ref(), cursor)
    }

    async fn album_tracks_page(
        &mut self,
        album_id: &str,
        cursor: Option<String>,
    ) -> Res<Page<String>> {
        let pages = self.track_pages.get(album_id).cloned();
        self.page(pages.as_ref(), cursor)
    }

    async fn track_metadata(&mut self, track_id: &str) -> Res<TrackMetadata> {
        let at = self.clock.as_ref().map(|c| c.now());
        self.metadata_requests.push((track_id.to_string(), at));
        if let Some(clock) = &self.clock {
            clock.advance(self.latency);
        }

        if self.reject_token_on.as_deref() == Some(track_id) {
            return Err(Error::Auth("access token rejected".to_string()));
        }
        self.metadata
            .get(track_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(track_id.to_string()))
    }

    async fn track_features(&mut self, track_id: &str) -> Res<TrackFeatures> {
        self.features
            .get(track_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no audio features for track {}", track_id)))
    }
}

pub fn uri(artist_id: &str) -> String {
    format!("spotify:artist:{}", artist_id)
}

pub fn artist(name: &str, id: &str) -> ArtistRecord {
    ArtistRecord {
        id: id.to_string(),
        name: name.to_string(),
        uri: uri(id),
        genres: vec!["rock".to_string()],
    }
}

pub fn album(id: &str, name: &str) -> AlbumRecord {
    AlbumRecord {
        id: id.to_string(),
        name: name.to_string(),
    }
}

pub fn metadata(track_id: &str, name: &str, album: &AlbumRecord, artist_name: &str) -> TrackMetadata {
    TrackMetadata {
        name: name.to_string(),
        id: track_id.to_string(),
        album_name: album.name.clone(),
        album_id: album.id.clone(),
        artist_name: artist_name.to_string(),
        artist_id: format!("{}_id", artist_name.to_lowercase()),
        release_date: "1986-03-03".to_string(),
        duration_ms: 312_000,
        popularity: 64,
    }
}

pub fn features() -> TrackFeatures {
    TrackFeatures {
        acousticness: 0.00262,
        danceability: 0.328,
        energy: 0.944,
        instrumentalness: 0.0113,
        liveness: 0.129,
        loudness: -6.64,
        speechiness: 0.0564,
        tempo: 104.0,
        time_signature: 4,
    }
}
