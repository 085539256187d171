//! Lazy page sequences over paginated catalog listings.
//!
//! A listing is fetched one page at a time. The first request carries no
//! cursor, every following request carries the `next` cursor of the previous
//! page. The sequence ends when a page has no `next` cursor, when a request
//! fails, or when the provider hands back a cursor it already returned.

use crate::{
    Res,
    spotify::CatalogApi,
    types::{AlbumGroups, AlbumRecord},
};

/// One page of a listing, mapped to domain records.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn last(items: Vec<T>) -> Self {
        Page { items, next: None }
    }
}

/// A paginated listing that can be fetched from a [`CatalogApi`].
#[allow(async_fn_in_trait)]
pub trait Listing<C: CatalogApi> {
    type Item;

    async fn fetch(&self, api: &mut C, cursor: Option<String>) -> Res<Page<Self::Item>>;
}

/// Albums of one artist, restricted to the given album groups.
pub struct ArtistAlbums<'s> {
    pub artist_uri: &'s str,
    pub groups: &'s AlbumGroups,
}

impl<C: CatalogApi> Listing<C> for ArtistAlbums<'_> {
    type Item = AlbumRecord;

    async fn fetch(&self, api: &mut C, cursor: Option<String>) -> Res<Page<AlbumRecord>> {
        api.artist_albums_page(self.artist_uri, self.groups, cursor)
            .await
    }
}

/// Track ids of one album.
pub struct AlbumTracks<'s> {
    pub album_id: &'s str,
}

impl<C: CatalogApi> Listing<C> for AlbumTracks<'_> {
    type Item = String;

    async fn fetch(&self, api: &mut C, cursor: Option<String>) -> Res<Page<String>> {
        api.album_tracks_page(self.album_id, cursor).await
    }
}

enum Cursor {
    Start,
    Next(String),
    Done,
}

/// Pages of a [`Listing`], fetched on demand.
pub struct Pages<'a, C, L> {
    api: &'a mut C,
    listing: L,
    cursor: Cursor,
    seen: Vec<String>,
}

impl<'a, C, L> Pages<'a, C, L>
where
    C: CatalogApi,
    L: Listing<C>,
{
    pub fn new(api: &'a mut C, listing: L) -> Self {
        Pages {
            api,
            listing,
            cursor: Cursor::Start,
            seen: Vec::new(),
        }
    }

    /// Fetches the next page, or returns `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Option<Res<Vec<L::Item>>> {
        let cursor = match std::mem::replace(&mut self.cursor, Cursor::Done) {
            Cursor::Start => None,
            Cursor::Next(next) => Some(next),
            Cursor::Done => return None,
        };

        match self.listing.fetch(self.api, cursor).await {
            Ok(page) => {
                if let Some(next) = page.next {
                    if !self.seen.contains(&next) {
                        self.seen.push(next.clone());
                        self.cursor = Cursor::Next(next);
                    }
                }
                Some(Ok(page.items))
            }
            Err(e) => Some(Err(e)),
        }
    }

    /// Concatenates every remaining page in order.
    pub async fn collect_all(mut self) -> Res<Vec<L::Item>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await {
            items.extend(page?);
        }
        Ok(items)
    }
}
