mod common;

use common::{FakeCatalog, album, uri};
use sporldata::{
    Error,
    spotify::{
        CatalogApi,
        paging::{ArtistAlbums, Pages},
    },
    types::{AlbumGroups, AlbumRecord, MatchPolicy},
};

fn discography(pages: usize, per_page: usize) -> Vec<Vec<AlbumRecord>> {
    (0..pages)
        .map(|p| {
            (0..per_page)
                .map(|i| {
                    let n = p * per_page + i;
                    album(&format!("al{}", n), &format!("Album {}", n))
                })
                .collect()
        })
        .collect()
}

#[tokio::test]
async fn test_albums_are_concatenated_across_pages_in_order() {
    let mut catalog = FakeCatalog::new().with_albums("metallica", discography(3, 2));

    let albums = catalog
        .list_artist_albums(&uri("metallica"), &AlbumGroups::default())
        .await
        .unwrap();

    let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["al0", "al1", "al2", "al3", "al4", "al5"]);
    assert_eq!(
        catalog.page_requests,
        vec![None, Some("page:1".to_string()), Some("page:2".to_string())]
    );
}

#[tokio::test]
async fn test_single_page_needs_one_request() {
    let mut catalog = FakeCatalog::new().with_albums("metallica", discography(1, 4));

    let albums = catalog
        .list_artist_albums(&uri("metallica"), &AlbumGroups::default())
        .await
        .unwrap();

    assert_eq!(albums.len(), 4);
    assert_eq!(catalog.page_requests, vec![None]);
}

#[tokio::test]
async fn test_artist_without_albums_yields_empty_listing() {
    let mut catalog = FakeCatalog::new();

    let albums = catalog
        .list_artist_albums(&uri("nobody"), &AlbumGroups::default())
        .await
        .unwrap();

    assert!(albums.is_empty());
}

#[tokio::test]
async fn test_pages_are_fetched_on_demand() {
    let mut catalog = FakeCatalog::new().with_albums("metallica", discography(3, 2));
    let artist_uri = uri("metallica");
    let groups = AlbumGroups::default();

    {
        let mut pages = Pages::new(
            &mut catalog,
            ArtistAlbums {
                artist_uri: &artist_uri,
                groups: &groups,
            },
        );
        let first = pages.next_page().await.unwrap().unwrap();
        assert_eq!(first.len(), 2);
    }

    assert_eq!(catalog.page_requests, vec![None]);
}

#[tokio::test]
async fn test_repeated_cursor_ends_the_listing() {
    let mut catalog = FakeCatalog::new().with_albums("metallica", discography(3, 2));
    catalog.repeat_cursor = true;

    let albums = catalog
        .list_artist_albums(&uri("metallica"), &AlbumGroups::default())
        .await
        .unwrap();

    assert_eq!(albums.len(), 4);
    assert_eq!(catalog.page_requests.len(), 2);
}

#[tokio::test]
async fn test_failing_page_fails_the_listing() {
    let mut catalog = FakeCatalog::new().with_albums("metallica", discography(2, 2));
    // pages past the stored ones answer NotFound
    catalog.album_pages.get_mut(&uri("metallica")).unwrap().truncate(1);
    catalog.repeat_cursor = true;

    let result = catalog
        .list_artist_albums(&uri("metallica"), &AlbumGroups::default())
        .await;

    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_album_tracks_listing() {
    let record = album("al1", "Master of Puppets");
    let mut catalog = FakeCatalog::new().with_tracks(&record, "Metallica", &["t1", "t2", "t3"]);

    let ids = catalog.list_album_tracks("al1").await.unwrap();
    assert_eq!(ids, vec!["t1", "t2", "t3"]);
}

#[tokio::test]
async fn test_search_artist_prefers_exact_name() {
    let mut catalog = FakeCatalog::new()
        .with_artist("Queen", "Queen Latifah", "latifah")
        .with_artist("Queen", "Queen", "queen");

    let exact = catalog.search_artist("Queen", MatchPolicy::Exact).await.unwrap();
    assert_eq!(exact.id, "queen");

    let first = catalog.search_artist("Queen", MatchPolicy::First).await.unwrap();
    assert_eq!(first.id, "latifah");
}

#[tokio::test]
async fn test_search_artist_without_results_is_not_found() {
    let mut catalog = FakeCatalog::new();

    let result = catalog
        .search_artist("Unknown Artist XYZ", MatchPolicy::Exact)
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}
