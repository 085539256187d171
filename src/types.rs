use std::fmt;

use serde::Deserialize;
use tabled::Tabled;

#[derive(Debug, Clone)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// One page of a paginated catalog listing.
#[derive(Debug, Clone, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArtistsResponse {
    pub artists: Paging<ArtistObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FullTrack {
    pub id: String,
    pub name: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub popularity: u32,
    pub album: TrackAlbum,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesObject {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
    pub time_signature: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArtistRecord {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub genres: Vec<String>,
}

impl From<ArtistObject> for ArtistRecord {
    fn from(a: ArtistObject) -> Self {
        ArtistRecord {
            id: a.id,
            name: a.name,
            uri: a.uri,
            genres: a.genres,
        }
    }
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub query: String,
    pub name: String,
    pub uri: String,
    pub genres: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlbumRecord {
    pub id: String,
    pub name: String,
}

impl From<SimplifiedAlbum> for AlbumRecord {
    fn from(a: SimplifiedAlbum) -> Self {
        AlbumRecord {
            id: a.id,
            name: a.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackMetadata {
    pub name: String,
    pub id: String,
    pub album_name: String,
    pub album_id: String,
    pub artist_name: String,
    pub artist_id: String,
    pub release_date: String,
    pub duration_ms: u64,
    pub popularity: u32,
}

impl From<FullTrack> for TrackMetadata {
    fn from(t: FullTrack) -> Self {
        // the dataset credits the album's main artist, not the track's
        let artist = t
            .album
            .artists
            .first()
            .or_else(|| t.artists.first())
            .cloned()
            .unwrap_or(AlbumArtist {
                id: String::new(),
                name: String::new(),
            });

        TrackMetadata {
            name: t.name,
            id: t.id,
            album_name: t.album.name,
            album_id: t.album.id,
            artist_name: artist.name,
            artist_id: artist.id,
            release_date: t.album.release_date,
            duration_ms: t.duration_ms,
            popularity: t.popularity,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackFeatures {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
    pub time_signature: u32,
}

impl From<AudioFeaturesObject> for TrackFeatures {
    fn from(f: AudioFeaturesObject) -> Self {
        TrackFeatures {
            acousticness: f.acousticness,
            danceability: f.danceability,
            energy: f.energy,
            instrumentalness: f.instrumentalness,
            liveness: f.liveness,
            loudness: f.loudness,
            speechiness: f.speechiness,
            tempo: f.tempo,
            time_signature: f.time_signature,
        }
    }
}

/// Number of columns in every dataset line.
pub const TRACK_ROW_FIELDS: usize = 18;

/// Column names of the dataset, in output order.
pub const TRACK_ROW_HEADER: [&str; TRACK_ROW_FIELDS] = [
    "track_name",
    "track_id",
    "album_name",
    "album_id",
    "artist_name",
    "artist_id",
    "release_date",
    "length",
    "popularity",
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "liveness",
    "loudness",
    "speechiness",
    "tempo",
    "time_signature",
];

#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    pub track_name: String,
    pub track_id: String,
    pub album_name: String,
    pub album_id: String,
    pub artist_name: String,
    pub artist_id: String,
    pub release_date: String,
    pub length_ms: u64,
    pub popularity: u32,
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub loudness: f64,
    pub speechiness: f64,
    pub tempo: f64,
    pub time_signature: u32,
}

impl TrackRow {
    pub fn new(meta: TrackMetadata, features: TrackFeatures) -> Self {
        TrackRow {
            track_name: meta.name,
            track_id: meta.id,
            album_name: meta.album_name,
            album_id: meta.album_id,
            artist_name: meta.artist_name,
            artist_id: meta.artist_id,
            release_date: meta.release_date,
            length_ms: meta.duration_ms,
            popularity: meta.popularity,
            acousticness: features.acousticness,
            danceability: features.danceability,
            energy: features.energy,
            instrumentalness: features.instrumentalness,
            liveness: features.liveness,
            loudness: features.loudness,
            speechiness: features.speechiness,
            tempo: features.tempo,
            time_signature: features.time_signature,
        }
    }

    /// Field values rendered as text, in [`TRACK_ROW_HEADER`] order.
    pub fn values(&self) -> [String; TRACK_ROW_FIELDS] {
        [
            self.track_name.clone(),
            self.track_id.clone(),
            self.album_name.clone(),
            self.album_id.clone(),
            self.artist_name.clone(),
            self.artist_id.clone(),
            self.release_date.clone(),
            self.length_ms.to_string(),
            self.popularity.to_string(),
            format_float(self.acousticness),
            format_float(self.danceability),
            format_float(self.energy),
            format_float(self.instrumentalness),
            format_float(self.liveness),
            format_float(self.loudness),
            format_float(self.speechiness),
            format_float(self.tempo),
            self.time_signature.to_string(),
        ]
    }
}

// Same text as the existing datasets: whole numbers keep one decimal
// ("120.0"), magnitudes below 1e-4 or from 1e16 up use exponent form
// with a signed two digit exponent ("1.13e-05", "1e+16").
fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(value);
    }

    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

fn format_exponent(value: f64) -> String {
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => formatted,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumGroup {
    Album,
    Single,
    AppearsOn,
    Compilation,
}

impl fmt::Display for AlbumGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlbumGroup::Album => "album",
            AlbumGroup::Single => "single",
            AlbumGroup::AppearsOn => "appears_on",
            AlbumGroup::Compilation => "compilation",
        };
        f.write_str(s)
    }
}

/// Album groups requested from the artist albums listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumGroups(pub Vec<AlbumGroup>);

impl Default for AlbumGroups {
    fn default() -> Self {
        AlbumGroups(vec![AlbumGroup::Album])
    }
}

impl fmt::Display for AlbumGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// How a search result is picked when several artists match a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Prefer a case-insensitive exact name match, else the first result.
    #[default]
    Exact,
    /// Take the first result unconditionally.
    First,
}
