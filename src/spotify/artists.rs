use crate::{
    Res,
    management::Clock,
    spotify::{SpotifyClient, paging::Page},
    types::{AlbumGroups, AlbumRecord, ArtistRecord, Paging, SearchArtistsResponse, SimplifiedAlbum},
    utils,
};

/// Number of search results considered when resolving an artist name.
pub const SEARCH_LIMIT: u32 = 10;

/// Page size of the artist albums listing (API maximum).
pub const ALBUMS_PAGE_LIMIT: u32 = 50;

/// Builds the search query for an artist name.
///
/// The `artist:` field filter restricts matches to artist names, so a track or
/// album sharing the name does not pull unrelated artists into the results.
pub fn artist_query(name: &str) -> String {
    format!("artist:{}", name)
}

impl<C: Clock> SpotifyClient<C> {
    /// Searches artists by name.
    ///
    /// Returns the candidates in the order Spotify ranks them. An empty vector
    /// means the catalog knows no artist of that name; choosing among the
    /// candidates is left to [`crate::utils::choose_artist`].
    pub(crate) async fn search_artist_candidates(&mut self, name: &str) -> Res<Vec<ArtistRecord>> {
        let url = self.endpoint("/search");
        let query = [
            ("q", artist_query(name)),
            ("type", "artist".to_string()),
            ("limit", SEARCH_LIMIT.to_string()),
        ];

        let res: SearchArtistsResponse = self.get_json(&url, &query).await?;
        Ok(res
            .artists
            .items
            .into_iter()
            .map(ArtistRecord::from)
            .collect())
    }

    /// Retrieves one page of an artist's albums.
    ///
    /// # Arguments
    ///
    /// * `artist_uri` - catalog uri (`spotify:artist:<id>`) or bare id
    /// * `groups` - album groups sent as `include_groups`
    /// * `cursor` - `None` for the first page, else the `next` url of the previous page
    pub(crate) async fn get_artist_albums_page(
        &mut self,
        artist_uri: &str,
        groups: &AlbumGroups,
        cursor: Option<String>,
    ) -> Res<Page<AlbumRecord>> {
        let res: Paging<SimplifiedAlbum> = match cursor {
            Some(next) => self.get_json(&next, &[]).await?,
            None => {
                let url = self.endpoint(&format!(
                    "/artists/{id}/albums",
                    id = utils::id_from_uri(artist_uri)
                ));
                let query = [
                    ("include_groups", groups.to_string()),
                    ("limit", ALBUMS_PAGE_LIMIT.to_string()),
                ];
                self.get_json(&url, &query).await?
            }
        };

        Ok(Page {
            items: res.items.into_iter().map(AlbumRecord::from).collect(),
            next: res.next,
        })
    }
}
