use crate::{
    Res,
    management::Clock,
    spotify::{SpotifyClient, paging::Page},
    types::{Paging, SimplifiedTrack},
};

/// Page size of the album tracks listing (API maximum).
pub const TRACKS_PAGE_LIMIT: u32 = 50;

impl<C: Clock> SpotifyClient<C> {
    /// Retrieves one page of an album's track ids.
    ///
    /// Tracks without an id (local files) cannot be looked up and are left out.
    pub(crate) async fn get_album_tracks_page(
        &mut self,
        album_id: &str,
        cursor: Option<String>,
    ) -> Res<Page<String>> {
        let res: Paging<SimplifiedTrack> = match cursor {
            Some(next) => self.get_json(&next, &[]).await?,
            None => {
                let url = self.endpoint(&format!("/albums/{id}/tracks", id = album_id));
                let query = [("limit", TRACKS_PAGE_LIMIT.to_string())];
                self.get_json(&url, &query).await?
            }
        };

        Ok(Page {
            items: track_ids(res.items),
            next: res.next,
        })
    }
}

fn track_ids(tracks: Vec<SimplifiedTrack>) -> Vec<String> {
    tracks.into_iter().filter_map(|t| t.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_tracks_are_skipped() {
        let json = r#"{
            "items": [
                {"id": "t1", "name": "One"},
                {"id": null, "name": "Local file"},
                {"id": "t2", "name": "Two"}
            ],
            "next": null,
            "total": 3
        }"#;
        let page: Paging<SimplifiedTrack> = serde_json::from_str(json).unwrap();
        assert_eq!(track_ids(page.items), vec!["t1", "t2"]);
    }
}
