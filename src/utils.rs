use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::{
    Res,
    types::{
        Album, AlbumTableRow, Artist, ArtistRef, ArtistTableRow, Playlist, PlaylistTableRow,
        QueueTableRow, Track, TrackTableRow,
    },
};

/// Pulls a human readable message out of a Spotify error body.
///
/// Web API errors look like `{"error": {"status": 401, "message": ".."}}`,
/// the accounts service answers `{"error": "invalid_grant",
/// "error_description": ".."}`.
pub fn extract_error_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    let error = json.get("error")?;

    if let Some(message) = error.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    match (
        error.as_str(),
        json.get("error_description").and_then(Value::as_str),
    ) {
        (Some(code), Some(description)) => Some(format!("{}: {}", code, description)),
        (Some(code), None) => Some(code.to_string()),
        _ => None,
    }
}

/// Drops a `data:<mime>;base64,` prefix, leaving bare base64 untouched.
pub fn strip_data_url_prefix(image: &str) -> &str {
    match image.split_once("base64,") {
        Some((_, data)) => data.trim(),
        None => image.trim(),
    }
}

/// Reads an image file and returns its content base64 encoded.
pub async fn encode_image_file(path: &Path) -> Res<String> {
    let bytes = async_fs::read(path).await?;
    Ok(STANDARD.encode(bytes))
}

pub fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn track_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .map(|t| TrackTableRow {
            name: t.name.clone(),
            artists: join_artists(&t.artists),
            album: t.album.as_ref().map(|a| a.name.clone()).unwrap_or_default(),
            uri: t.uri.clone(),
        })
        .collect()
}

pub fn artist_rows(artists: &[Artist]) -> Vec<ArtistTableRow> {
    artists
        .iter()
        .map(|a| ArtistTableRow {
            name: a.name.clone(),
            genres: a.genres.join(", "),
        })
        .collect()
}

pub fn album_rows(albums: &[Album]) -> Vec<AlbumTableRow> {
    albums
        .iter()
        .map(|a| AlbumTableRow {
            name: a.name.clone(),
            artists: join_artists(&a.artists),
            released: a.release_date.clone().unwrap_or_default(),
        })
        .collect()
}

pub fn playlist_rows<'a>(playlists: impl IntoIterator<Item = &'a Playlist>) -> Vec<PlaylistTableRow> {
    playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id.clone(),
            name: p.name.clone(),
            owner: p
                .owner
                .as_ref()
                .map(|o| o.display_name.clone().unwrap_or_else(|| o.id.clone()))
                .unwrap_or_default(),
            tracks: p
                .tracks
                .as_ref()
                .and_then(|t| t.total)
                .map(|n| n.to_string())
                .unwrap_or_default(),
            public: match p.public {
                Some(true) => "yes".to_string(),
                Some(false) => "no".to_string(),
                None => "-".to_string(),
            },
        })
        .collect()
}

/// Table of the queue, the current position marked with `>`.
pub fn queue_rows(tracks: &[Track], current: usize) -> Vec<QueueTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| QueueTableRow {
            position: if i == current {
                format!("> {}", i + 1)
            } else {
                format!("  {}", i + 1)
            },
            name: t.name.clone(),
            artists: join_artists(&t.artists),
        })
        .collect()
}
