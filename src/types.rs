use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenExchangeResult {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub product: Option<String>,
    #[serde(default)]
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
}

/// One page of a Spotify list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub album_type: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
    #[serde(default)]
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumRef {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

/// An entry of a track list.
///
/// Search results list bare tracks while playlist contents wrap each track in
/// an item carrying `added_at` and friends. Both shapes are resolved here so
/// callers only ever see a [`Track`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackItem {
    Wrapped {
        track: Track,
        #[serde(default)]
        added_at: Option<String>,
    },
    Bare(Track),
}

impl TrackItem {
    pub fn track(&self) -> &Track {
        match self {
            TrackItem::Wrapped { track, .. } | TrackItem::Bare(track) => track,
        }
    }

    pub fn into_track(self) -> Track {
        match self {
            TrackItem::Wrapped { track, .. } | TrackItem::Bare(track) => track,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksRef {
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    #[serde(default)]
    pub snapshot_id: Option<String>,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
    #[serde(default)]
    pub tracks: Option<PlaylistTracksRef>,
}

/// A playlist fetched by id, including its first page of tracks.
///
/// Spotify sends `null` for tracks that are no longer available, those entries
/// are kept as `None` so positions in the list stay stable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: Option<bool>,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub tracks: Paging<PlaylistEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    #[serde(default)]
    pub added_at: Option<String>,
    #[serde(default)]
    pub track: Option<Track>,
}

impl PlaylistDetail {
    /// Playable tracks of the playlist, wrapped as they arrived.
    pub fn track_items(&self) -> Vec<TrackItem> {
        self.tracks
            .items
            .iter()
            .filter_map(|entry| {
                entry.track.clone().map(|track| TrackItem::Wrapped {
                    track,
                    added_at: entry.added_at.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub tracks: Option<Paging<Track>>,
    #[serde(default)]
    pub artists: Option<Paging<Artist>>,
    #[serde(default)]
    pub albums: Option<Paging<Album>>,
    /// Spotify occasionally returns `null` entries in playlist search results.
    #[serde(default)]
    pub playlists: Option<Paging<Option<Playlist>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePlaylistRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUrisRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

/// A song picked for a playlist, only its URI matters to the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub uri: String,
}

impl From<&Track> for Song {
    fn from(track: &Track) -> Self {
        Song {
            uri: track.uri.clone(),
        }
    }
}

/// Input of a complete playlist creation.
///
/// `image` holds base64 JPEG data, optionally as a `data:` URL.
#[derive(Debug, Clone, Default)]
pub struct PlaylistDraft {
    pub title: String,
    pub is_public: bool,
    pub description: Option<String>,
    pub songs: Vec<Song>,
    pub image: Option<String>,
}

/// Input of a playlist update. Fields left as `None` are not touched.
#[derive(Debug, Clone, Default)]
pub struct PlaylistChanges {
    pub id: String,
    pub title: Option<String>,
    pub is_public: Option<bool>,
    pub description: Option<String>,
    pub songs: Option<Vec<Song>>,
    pub image: Option<String>,
}

/// Outcome of a cover upload. Uploading never fails the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverUpload {
    pub uploaded: bool,
    pub diagnostic: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Skipped,
    Done,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub details: StepOutcome,
    pub tracks: StepOutcome,
    pub cover: StepOutcome,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
    pub uri: String,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub name: String,
    pub genres: String,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub name: String,
    pub artists: String,
    pub released: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub tracks: String,
    pub public: String,
}

#[derive(Tabled)]
pub struct QueueTableRow {
    pub position: String,
    pub name: String,
    pub artists: String,
}

/// What the local server learned from the OAuth redirect, shared with the
/// command waiting for it.
#[derive(Debug, Clone, Default)]
pub struct CallbackState {
    pub authorize_url: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
    pub authenticated: bool,
    pub user: Option<String>,
}
