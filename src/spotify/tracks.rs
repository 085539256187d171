use crate::{
    Res,
    error::Error,
    management::Clock,
    spotify::SpotifyClient,
    types::{AudioFeaturesObject, FullTrack, TrackFeatures, TrackMetadata},
};

impl<C: Clock> SpotifyClient<C> {
    /// Retrieves the metadata of a single track.
    pub(crate) async fn get_track(&mut self, track_id: &str) -> Res<TrackMetadata> {
        let url = self.endpoint(&format!("/tracks/{id}", id = track_id));
        let track: FullTrack = self.get_json(&url, &[]).await?;
        Ok(TrackMetadata::from(track))
    }

    /// Retrieves the audio features of a single track.
    ///
    /// Spotify answers `null` for tracks it has not analysed; that is reported
    /// as [`Error::NotFound`] like an unknown id.
    pub(crate) async fn get_audio_features(&mut self, track_id: &str) -> Res<TrackFeatures> {
        let url = self.endpoint(&format!("/audio-features/{id}", id = track_id));
        let features: Option<AudioFeaturesObject> = self.get_json(&url, &[]).await?;
        features
            .map(TrackFeatures::from)
            .ok_or_else(|| Error::NotFound(format!("no audio features for track {}", track_id)))
    }
}
