use std::fmt;

use clap::ValueEnum;

use crate::{
    Error, Res,
    spotify::{SpotifyApi, bearer},
    types::{Paging, Playlist, PlaylistDetail, SearchResults, Session},
};

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;

/// Number of suggestions offered while picking songs for a playlist.
pub const TRACK_PICKER_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    Track,
    Artist,
    Album,
    Playlist,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Track => "track",
            SearchKind::Artist => "artist",
            SearchKind::Album => "album",
            SearchKind::Playlist => "playlist",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Searches the catalog (`GET /search?q=..&type=..&limit=..`).
///
/// Only the container matching `kind` is filled in the returned
/// [`SearchResults`]. The query is URL-encoded by the HTTP client.
pub async fn search(
    api: &SpotifyApi,
    session: &Session,
    kind: SearchKind,
    query: &str,
    limit: u32,
) -> Res<SearchResults> {
    api.get(
        session,
        &["search"],
        &[
            ("q", query.to_string()),
            ("type", kind.as_str().to_string()),
            ("limit", limit.to_string()),
        ],
    )
    .await
}

pub async fn search_tracks(api: &SpotifyApi, session: &Session, query: &str) -> Res<SearchResults> {
    search(api, session, SearchKind::Track, query, DEFAULT_SEARCH_LIMIT).await
}

pub async fn search_artists(
    api: &SpotifyApi,
    session: &Session,
    query: &str,
) -> Res<SearchResults> {
    search(api, session, SearchKind::Artist, query, DEFAULT_SEARCH_LIMIT).await
}

pub async fn search_playlists(
    api: &SpotifyApi,
    session: &Session,
    query: &str,
) -> Res<SearchResults> {
    search(api, session, SearchKind::Playlist, query, DEFAULT_SEARCH_LIMIT).await
}

pub async fn search_albums(api: &SpotifyApi, session: &Session, query: &str) -> Res<SearchResults> {
    search(api, session, SearchKind::Album, query, DEFAULT_SEARCH_LIMIT).await
}

/// A short track search used to suggest songs while assembling a playlist.
pub async fn search_track_playlist(
    api: &SpotifyApi,
    session: &Session,
    query: &str,
) -> Res<SearchResults> {
    search(api, session, SearchKind::Track, query, TRACK_PICKER_LIMIT).await
}

/// Fetches one playlist with its first page of tracks (`GET /playlists/{id}`).
pub async fn search_playlist_by_id(
    api: &SpotifyApi,
    session: &Session,
    id: &str,
) -> Res<PlaylistDetail> {
    api.get(session, &["playlists", id], &[]).await
}

/// Playlists of the signed-in user (`GET /users/{user_id}/playlists`).
///
/// Needs the profile stored in the session to know the user id.
pub async fn search_owned_playlists(
    api: &SpotifyApi,
    session: &Session,
) -> Res<Paging<Playlist>> {
    bearer(session)?;
    let user = session.user.as_ref().ok_or(Error::MissingProfile)?;
    api.get(session, &["users", user.id.as_str(), "playlists"], &[])
        .await
}
