use tabled::Table;

use crate::{
    config::Config,
    error,
    spotify::{CatalogApi, SpotifyClient},
    types::ArtistTableRow,
    warning,
};

pub async fn artists(config: Config) {
    let mut client = match SpotifyClient::connect(&config).await {
        Ok(client) => client,
        Err(e) => {
            error!("Cannot connect to Spotify. Err: {}", e);
        }
    };

    let pb = super::spinner("Resolving artists...");
    let mut table_rows: Vec<ArtistTableRow> = Vec::new();

    for name in &config.artist_names {
        pb.set_message(format!("Searching artist {}...", name));

        match client.search_artist(name, config.match_policy).await {
            Ok(artist) => table_rows.push(ArtistTableRow {
                query: name.clone(),
                name: artist.name,
                uri: artist.uri,
                genres: artist
                    .genres
                    .iter()
                    .take(3)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(","),
            }),
            Err(e) if e.is_fatal() => {
                pb.finish_and_clear();
                error!("Cannot resolve artists. Err: {}", e);
            }
            Err(e) => pb.suspend(|| warning!("Skipping artist {}: {}", name, e)),
        }
    }

    pb.finish_and_clear();
    let table = Table::new(table_rows);
    println!("{}", table);
}
