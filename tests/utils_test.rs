use base64::{Engine, engine::general_purpose::STANDARD};
use spotilink::types::{ArtistRef, Playlist, PlaylistOwner, PlaylistTracksRef, Track};
use spotilink::utils::*;
use tempfile::TempDir;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artists: &[&str]) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        duration_ms: Some(200_000),
        preview_url: None,
        artists: artists
            .iter()
            .map(|a| ArtistRef {
                id: None,
                name: a.to_string(),
            })
            .collect(),
        album: None,
    }
}

#[test]
fn test_extract_error_message_web_api_shape() {
    let body = r#"{"error":{"status":401,"message":"The access token expired"}}"#;
    assert_eq!(
        extract_error_message(body),
        Some("The access token expired".to_string())
    );
}

#[test]
fn test_extract_error_message_accounts_shape() {
    let body = r#"{"error":"invalid_grant","error_description":"Authorization code expired"}"#;
    assert_eq!(
        extract_error_message(body),
        Some("invalid_grant: Authorization code expired".to_string())
    );

    let body = r#"{"error":"invalid_client"}"#;
    assert_eq!(extract_error_message(body), Some("invalid_client".to_string()));
}

#[test]
fn test_extract_error_message_unknown_bodies() {
    assert_eq!(extract_error_message(""), None);
    assert_eq!(extract_error_message("<html>Bad Gateway</html>"), None);
    assert_eq!(extract_error_message(r#"{"status":500}"#), None);
}

#[test]
fn test_strip_data_url_prefix() {
    assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,QUJD"), "QUJD");
    assert_eq!(strip_data_url_prefix("QUJD"), "QUJD");
    assert_eq!(strip_data_url_prefix("  QUJD\n"), "QUJD");
    assert_eq!(strip_data_url_prefix("data:image/jpeg;base64,"), "");
}

#[tokio::test]
async fn test_encode_image_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cover.jpg");
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

    let encoded = encode_image_file(&path).await.unwrap();

    assert_eq!(STANDARD.decode(encoded).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
}

#[tokio::test]
async fn test_encode_missing_image_file() {
    let dir = TempDir::new().unwrap();
    assert!(encode_image_file(&dir.path().join("nope.jpg")).await.is_err());
}

#[test]
fn test_join_artists() {
    let track = create_test_track("1", "Get Lucky", &["Daft Punk", "Pharrell Williams"]);
    assert_eq!(join_artists(&track.artists), "Daft Punk, Pharrell Williams");
    assert_eq!(join_artists(&[]), "");
}

#[test]
fn test_track_rows() {
    let tracks = vec![
        create_test_track("1", "One More Time", &["Daft Punk"]),
        create_test_track("2", "Kelly Watch the Stars", &["Air"]),
    ];

    let rows = track_rows(&tracks);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "One More Time");
    assert_eq!(rows[1].artists, "Air");
    assert_eq!(rows[1].uri, "spotify:track:2");
    assert_eq!(rows[0].album, "");
}

#[test]
fn test_playlist_rows() {
    let playlists = vec![
        Playlist {
            id: "pl-1".to_string(),
            name: "Focus".to_string(),
            description: None,
            public: Some(false),
            collaborative: false,
            snapshot_id: None,
            owner: Some(PlaylistOwner {
                id: "user-1".to_string(),
                display_name: None,
            }),
            tracks: Some(PlaylistTracksRef { total: Some(12) }),
        },
        Playlist {
            id: "pl-2".to_string(),
            name: "Mix".to_string(),
            description: None,
            public: None,
            collaborative: false,
            snapshot_id: None,
            owner: None,
            tracks: None,
        },
    ];

    let rows = playlist_rows(&playlists);

    assert_eq!(rows[0].owner, "user-1");
    assert_eq!(rows[0].tracks, "12");
    assert_eq!(rows[0].public, "no");
    assert_eq!(rows[1].owner, "");
    assert_eq!(rows[1].public, "-");
}

#[test]
fn test_queue_rows_mark_current() {
    let tracks = vec![
        create_test_track("1", "A", &["X"]),
        create_test_track("2", "B", &["Y"]),
    ];

    let rows = queue_rows(&tracks, 1);

    assert_eq!(rows[0].position, "  1");
    assert_eq!(rows[1].position, "> 2");
}
