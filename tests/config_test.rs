use std::{collections::HashMap, path::PathBuf};

use sporldata::{
    Error,
    config::*,
    types::{AlbumGroup, AlbumGroups, MatchPolicy},
};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| vars.get(key).cloned()
}

#[test]
fn test_defaults_when_nothing_is_set() {
    let config = Config::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.artist_names.len(), DEFAULT_ARTISTS.len());
    assert_eq!(config.artist_names[0], DEFAULT_ARTISTS[0]);
    assert_eq!(config.output_path, PathBuf::from("Dataset.csv"));
    assert_eq!(config.request_pace_ms, 500);
    assert_eq!(config.match_policy, MatchPolicy::Exact);
    assert_eq!(config.album_groups, AlbumGroups(vec![AlbumGroup::Album]));
    assert!(!config.normalize_text);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
}

#[test]
fn test_values_override_defaults() {
    let config = Config::from_lookup(lookup(&[
        (ENV_CLIENT_ID, "id"),
        (ENV_CLIENT_SECRET, "secret"),
        (ENV_ARTISTS, "Metallica, Slayer ,,Megadeth"),
        (ENV_OUTPUT, "out/thrash.csv"),
        (ENV_REQUEST_PACE_MS, "0"),
        (ENV_ARTIST_MATCH, "first"),
        (ENV_ALBUM_GROUPS, "album,single"),
        (ENV_NORMALIZE, "yes"),
        (ENV_API_URL, "http://localhost:8080/v1/"),
    ]))
    .unwrap();

    assert_eq!(config.artist_names, vec!["Metallica", "Slayer", "Megadeth"]);
    assert_eq!(config.output_path, PathBuf::from("out/thrash.csv"));
    assert_eq!(config.request_pace_ms, 0);
    assert_eq!(config.match_policy, MatchPolicy::First);
    assert_eq!(
        config.album_groups,
        AlbumGroups(vec![AlbumGroup::Album, AlbumGroup::Single])
    );
    assert!(config.normalize_text);
    assert_eq!(config.api_url, "http://localhost:8080/v1");

    let creds = config.credentials().unwrap();
    assert_eq!(creds.client_id, "id");
    assert_eq!(creds.client_secret, "secret");
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = Config::from_lookup(lookup(&[
        (ENV_OUTPUT, "  "),
        (ENV_REQUEST_PACE_MS, ""),
    ]))
    .unwrap();

    assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT));
    assert_eq!(config.request_pace_ms, DEFAULT_REQUEST_PACE_MS);
}

#[test]
fn test_all_album_groups() {
    let config = Config::from_lookup(lookup(&[(ENV_ALBUM_GROUPS, "all")])).unwrap();
    assert_eq!(config.album_groups.0.len(), 4);
    assert_eq!(
        config.album_groups.to_string(),
        "album,single,appears_on,compilation"
    );
}

#[test]
fn test_invalid_values_are_config_errors() {
    let cases = [
        (ENV_REQUEST_PACE_MS, "fast"),
        (ENV_REQUEST_PACE_MS, "-5"),
        (ENV_ARTIST_MATCH, "fuzzy"),
        (ENV_ALBUM_GROUPS, "album,ep"),
        (ENV_NORMALIZE, "maybe"),
    ];

    for (key, value) in cases {
        let result = Config::from_lookup(lookup(&[(key, value)]));
        assert!(
            matches!(result, Err(Error::Config(_))),
            "{}={} should be rejected",
            key,
            value
        );
    }
}

#[test]
fn test_missing_credentials_are_auth_errors() {
    let config = Config::from_lookup(lookup(&[(ENV_CLIENT_ID, "id")])).unwrap();

    let err = config.credentials().unwrap_err();
    assert!(matches!(err, Error::Auth(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_env_file_lives_in_data_dir() {
    let path = env_file_path();
    assert!(path.ends_with("sporldata/.env"));
}
