//! The collection run: artist → albums → tracks → dataset rows.
//!
//! A [`Pipeline`] owns a catalog client, the dataset writer and the pacer and
//! walks the configured artists strictly in order. Errors that only concern
//! one artist, album or track are reported and skipped; fatal errors (see
//! [`Error::is_fatal`]) end the run.

use indicatif::ProgressBar;
use tokio::io::AsyncWrite;

use crate::{
    Res,
    config::Config,
    error::Error,
    info,
    management::{Clock, DatasetWriter, Pacer, SystemClock},
    spotify::CatalogApi,
    types::{AlbumGroups, MatchPolicy, TrackRow},
    utils::Normalizer,
    warning,
};

/// What to collect.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub artist_names: Vec<String>,
    pub match_policy: MatchPolicy,
    pub album_groups: AlbumGroups,
    pub normalize_text: bool,
}

impl From<&Config> for PipelineOptions {
    fn from(config: &Config) -> Self {
        PipelineOptions {
            artist_names: config.artist_names.clone(),
            match_policy: config.match_policy,
            album_groups: config.album_groups.clone(),
            normalize_text: config.normalize_text,
        }
    }
}

/// Counters of a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub artists: usize,
    pub artists_skipped: usize,
    pub albums: usize,
    pub albums_skipped: usize,
    pub rows: usize,
    pub tracks_skipped: usize,
}

pub struct Pipeline<A, W, C = SystemClock> {
    api: A,
    writer: DatasetWriter<W>,
    pacer: Pacer<C>,
    options: PipelineOptions,
    normalizer: Normalizer,
    progress: ProgressBar,
}

impl<A, W, C> Pipeline<A, W, C>
where
    A: CatalogApi,
    W: AsyncWrite + Unpin,
    C: Clock,
{
    pub fn new(api: A, writer: DatasetWriter<W>, pacer: Pacer<C>, options: PipelineOptions) -> Self {
        Pipeline {
            api,
            writer,
            pacer,
            options,
            normalizer: Normalizer::default(),
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports progress on `progress` instead of staying silent.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Writes the header and one row per collected track, then closes the
    /// output and hands it back together with the run counters.
    pub async fn run(mut self) -> Res<(RunSummary, W)> {
        let mut summary = RunSummary::default();
        self.writer.write_header().await?;

        let names = self.options.artist_names.clone();
        for name in &names {
            summary.artists += 1;
            if !self.collect_artist(name, &mut summary).await? {
                summary.artists_skipped += 1;
            }
        }

        let out = self.writer.finish().await?;
        Ok((summary, out))
    }

    // Ok(false) when the artist was skipped.
    async fn collect_artist(&mut self, name: &str, summary: &mut RunSummary) -> Res<bool> {
        self.progress
            .set_message(format!("Searching artist {}...", name));

        let artist = match self
            .api
            .search_artist(name, self.options.match_policy)
            .await
        {
            Ok(artist) => artist,
            Err(e) => {
                self.recover(e, format!("Skipping artist {}", name))?;
                return Ok(false);
            }
        };

        self.progress.suspend(|| {
            info!("Getting albums of {} ({})", artist.name, artist.uri);
        });

        let groups = self.options.album_groups.clone();
        let albums = match self.api.list_artist_albums(&artist.uri, &groups).await {
            Ok(albums) => albums,
            Err(e) => {
                self.recover(e, format!("Skipping artist {}", name))?;
                return Ok(false);
            }
        };

        for album in albums {
            summary.albums += 1;
            let track_ids = match self.api.list_album_tracks(&album.id).await {
                Ok(ids) => ids,
                Err(e) => {
                    self.recover(e, format!("Skipping album {}", album.name))?;
                    summary.albums_skipped += 1;
                    continue;
                }
            };

            for track_id in track_ids {
                match self.fetch_row(&track_id).await {
                    Ok(row) => {
                        self.progress.set_message(format!(
                            "Getting track data: {} - {}",
                            row.artist_name, row.track_name
                        ));
                        self.writer.write_row(&row).await?;
                        summary.rows += 1;
                    }
                    Err(e) => {
                        self.recover(e, format!("Skipping track {}", track_id))?;
                        summary.tracks_skipped += 1;
                    }
                }
            }
        }

        Ok(true)
    }

    async fn fetch_row(&mut self, track_id: &str) -> Res<TrackRow> {
        self.pacer.wait().await;

        let meta = self.api.track_metadata(track_id).await?;
        let features = self.api.track_features(track_id).await?;
        let mut row = TrackRow::new(meta, features);

        if self.options.normalize_text {
            row.track_name = self.normalizer.clean(&row.track_name);
            row.album_name = self.normalizer.clean(&row.album_name);
            row.artist_name = self.normalizer.clean(&row.artist_name);
        }

        Ok(row)
    }

    fn recover(&self, err: Error, context: String) -> Res<()> {
        if err.is_fatal() {
            return Err(err);
        }
        self.progress.suspend(|| {
            warning!("{}: {}", context, err);
        });
        Ok(())
    }
}
