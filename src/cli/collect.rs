use crate::{
    config::Config,
    error,
    management::{DatasetWriter, Pacer},
    pipeline::{Pipeline, PipelineOptions},
    spotify::SpotifyClient,
    success, warning,
};

pub async fn collect(config: Config) {
    if config.artist_names.is_empty() {
        warning!("No artists configured. Nothing to collect.");
        return;
    }

    let client = match SpotifyClient::connect(&config).await {
        Ok(client) => client,
        Err(e) => {
            error!("Cannot connect to Spotify. Err: {}", e);
        }
    };

    let writer = match DatasetWriter::create(&config.output_path).await {
        Ok(writer) => writer,
        Err(e) => {
            error!(
                "Cannot create dataset file {}. Err: {}",
                config.output_path.display(),
                e
            );
        }
    };

    let pb = super::spinner("Collecting tracks...");
    let pipeline = Pipeline::new(
        client,
        writer,
        Pacer::from_millis(config.request_pace_ms),
        PipelineOptions::from(&config),
    )
    .with_progress(pb.clone());

    match pipeline.run().await {
        Ok((summary, _)) => {
            pb.finish_and_clear();
            success!(
                "Wrote {} tracks from {} albums to {}",
                summary.rows,
                summary.albums,
                config.output_path.display()
            );
        }
        Err(e) => {
            pb.finish_and_clear();
            error!(
                "Collection stopped, {} keeps the rows written so far. Err: {}",
                config.output_path.display(),
                e
            );
        }
    }
}
