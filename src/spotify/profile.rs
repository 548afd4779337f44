use crate::{
    Res,
    spotify::SpotifyApi,
    types::{Artist, Paging, Playlist, Session, Track, UserProfile},
};

/// Retrieves the profile of the signed-in user (`GET /me`).
///
/// # Errors
///
/// - [`crate::Error::MissingToken`] when the session holds no token
/// - [`crate::Error::ApiRequest`] when Spotify answers with a non-success
///   status, typically 401 for an expired token
pub async fn fetch_profile(api: &SpotifyApi, session: &Session) -> Res<UserProfile> {
    api.get(session, &["me"], &[]).await
}

/// The user's most listened artists (`GET /me/top/artists`).
pub async fn fetch_top_artists(api: &SpotifyApi, session: &Session) -> Res<Paging<Artist>> {
    api.get(session, &["me", "top", "artists"], &[]).await
}

/// The user's most listened tracks (`GET /me/top/tracks`).
pub async fn fetch_top_tracks(api: &SpotifyApi, session: &Session) -> Res<Paging<Track>> {
    api.get(session, &["me", "top", "tracks"], &[]).await
}

/// Playlists the user owns or follows (`GET /me/playlists`).
pub async fn fetch_playlists(api: &SpotifyApi, session: &Session) -> Res<Paging<Playlist>> {
    api.get(session, &["me", "playlists"], &[]).await
}
