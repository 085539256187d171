use sporldata::{
    management::{DatasetWriter, split_line},
    types::{TRACK_ROW_FIELDS, TrackFeatures, TrackMetadata, TrackRow},
};

fn row(name: &str) -> TrackRow {
    TrackRow::new(
        TrackMetadata {
            name: name.to_string(),
            id: "t1".to_string(),
            album_name: "Album".to_string(),
            album_id: "a1".to_string(),
            artist_name: "Artist".to_string(),
            artist_id: "r1".to_string(),
            release_date: "2000-01-01".to_string(),
            duration_ms: 200_000,
            popularity: 50,
        },
        TrackFeatures {
            acousticness: 0.5,
            danceability: 0.5,
            energy: 0.5,
            instrumentalness: 0.0,
            liveness: 0.1,
            loudness: -7.25,
            speechiness: 0.03,
            tempo: 98.5,
            time_signature: 4,
        },
    )
}

#[tokio::test]
async fn test_header_and_rows() {
    let mut writer = DatasetWriter::new(Vec::new());
    writer.write_header().await.unwrap();
    writer.write_row(&row("First")).await.unwrap();
    writer.write_row(&row("Second")).await.unwrap();
    assert_eq!(writer.rows(), 2);

    let out = String::from_utf8(writer.finish().await.unwrap()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("track_name; track_id; album_name; "));
    assert!(lines[0].ends_with("tempo; time_signature; "));
    assert!(lines[1].starts_with("First; t1; Album; a1; Artist; r1; 2000-01-01; 200000; 50; "));
    assert!(out.ends_with("; \n"));

    for line in lines {
        assert_eq!(split_line(line).len(), TRACK_ROW_FIELDS);
    }
}

#[tokio::test]
async fn test_delimiters_and_line_breaks_in_values_are_escaped() {
    let mut writer = DatasetWriter::new(Vec::new());
    writer.write_header().await.unwrap();
    writer.write_row(&row("Part 1; Part 2\nReprise")).await.unwrap();
    writer.write_row(&row("Windows\r\nline")).await.unwrap();

    let out = String::from_utf8(writer.finish().await.unwrap()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);

    let fields = split_line(lines[1]);
    assert_eq!(fields.len(), TRACK_ROW_FIELDS);
    assert_eq!(fields[0], "Part 1, Part 2 Reprise");
    assert_eq!(split_line(lines[2])[0], "Windows line");
}

#[tokio::test]
async fn test_create_makes_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out/nested/Dataset.csv");

    let mut writer = DatasetWriter::create(&path).await.unwrap();
    writer.write_header().await.unwrap();
    writer.write_row(&row("Only")).await.unwrap();
    writer.finish().await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[tokio::test]
async fn test_rows_are_on_disk_before_finish() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Dataset.csv");

    let mut writer = DatasetWriter::create(&path).await.unwrap();
    writer.write_header().await.unwrap();
    writer.write_row(&row("Flushed")).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("Flushed; "));

    writer.finish().await.unwrap();
}
