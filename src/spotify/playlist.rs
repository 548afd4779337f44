use reqwest::{Method, StatusCode, header::CONTENT_TYPE};

use crate::{
    Error, Res, info,
    spotify::{SpotifyApi, bearer, client::ensure_success},
    success,
    types::{
        CoverUpload, CreatePlaylistRequest, Playlist, PlaylistChanges, PlaylistDraft, Session,
        SnapshotResponse, StepOutcome, TrackUrisRequest, UpdatePlaylistRequest, UpdateReport,
    },
    utils, warning,
};

/// Creates an empty playlist owned by the signed-in user.
///
/// Sends `POST /users/{user_id}/playlists` with `{name, public, description}`.
/// A missing description is sent as an empty string.
///
/// # Errors
///
/// - [`Error::MissingToken`] / [`Error::MissingProfile`] when the session is
///   incomplete
/// - [`Error::ApiRequest`] when Spotify rejects the request
pub async fn create_playlist(
    api: &SpotifyApi,
    session: &Session,
    draft: &PlaylistDraft,
) -> Res<Playlist> {
    bearer(session)?;
    let user = session.user.as_ref().ok_or(Error::MissingProfile)?;

    let body = CreatePlaylistRequest {
        name: draft.title.clone(),
        public: draft.is_public,
        description: draft.description.clone().unwrap_or_default(),
    };

    api.send_json(
        Method::POST,
        session,
        &["users", user.id.as_str(), "playlists"],
        &body,
    )
    .await
}

/// Appends tracks to a playlist (`POST /playlists/{id}/tracks`).
///
/// Returns `Ok(None)` without touching the network when `uris` is empty.
pub async fn add_songs(
    api: &SpotifyApi,
    session: &Session,
    playlist_id: &str,
    uris: &[String],
) -> Res<Option<SnapshotResponse>> {
    bearer(session)?;
    if uris.is_empty() {
        return Ok(None);
    }

    let body = TrackUrisRequest {
        uris: uris.to_vec(),
    };
    let snapshot = api
        .send_json(
            Method::POST,
            session,
            &["playlists", playlist_id, "tracks"],
            &body,
        )
        .await?;
    Ok(Some(snapshot))
}

/// Replaces every track of a playlist (`PUT /playlists/{id}/tracks`).
///
/// An empty `uris` list empties the playlist.
pub async fn replace_songs(
    api: &SpotifyApi,
    session: &Session,
    playlist_id: &str,
    uris: &[String],
) -> Res<SnapshotResponse> {
    let body = TrackUrisRequest {
        uris: uris.to_vec(),
    };
    api.send_json(
        Method::PUT,
        session,
        &["playlists", playlist_id, "tracks"],
        &body,
    )
    .await
}

/// Changes name, visibility or description (`PUT /playlists/{id}`).
pub async fn update_details(
    api: &SpotifyApi,
    session: &Session,
    playlist_id: &str,
    details: &UpdatePlaylistRequest,
) -> Res<()> {
    api.send_json_empty(
        Method::PUT,
        session,
        &["playlists", playlist_id],
        details,
    )
    .await
}

/// Uploads a JPEG cover (`PUT /playlists/{id}/images`).
///
/// `image` is base64 data, a `data:image/jpeg;base64,` prefix is stripped
/// before sending. This never fails: problems are reported through the
/// returned [`CoverUpload`] so a playlist is never held back by its cover.
/// Uploading requires the `ugc-image-upload` scope; a 401 therefore usually
/// means the session predates that scope.
pub async fn upload_cover(
    api: &SpotifyApi,
    session: &Session,
    playlist_id: &str,
    image: &str,
) -> CoverUpload {
    let data = utils::strip_data_url_prefix(image);
    if data.is_empty() {
        return CoverUpload {
            uploaded: false,
            diagnostic: Some("no image data".to_string()),
        };
    }

    let request = match api.request(
        Method::PUT,
        session,
        &["playlists", playlist_id, "images"],
    ) {
        Ok(request) => request,
        Err(e) => {
            return CoverUpload {
                uploaded: false,
                diagnostic: Some(e.to_string()),
            };
        }
    };

    let response = request
        .header(CONTENT_TYPE, "image/jpeg")
        .body(data.to_string())
        .send()
        .await;

    let outcome = match response {
        Ok(resp) => ensure_success(resp).await.map(|_| ()),
        Err(e) => Err(e.into()),
    };

    match outcome {
        Ok(()) => CoverUpload {
            uploaded: true,
            diagnostic: None,
        },
        Err(e) if e.status() == Some(StatusCode::UNAUTHORIZED) => CoverUpload {
            uploaded: false,
            diagnostic: Some(format!(
                "{}. Uploading covers needs the ugc-image-upload permission, log out and sign in again.",
                e
            )),
        },
        Err(e) => CoverUpload {
            uploaded: false,
            diagnostic: Some(e.to_string()),
        },
    }
}

/// Creates a playlist, then adds its songs and cover.
///
/// Only the creation itself can fail the call. Adding songs and uploading the
/// cover are best effort: their failures are reported as warnings and the
/// created playlist is returned regardless. No songs means no track request,
/// no image means no upload request.
pub async fn create_playlist_complete(
    api: &SpotifyApi,
    session: &Session,
    draft: &PlaylistDraft,
) -> Res<Playlist> {
    let playlist = create_playlist(api, session, draft).await?;
    info!("Playlist {} created with id {}", playlist.name, playlist.id);

    if !draft.songs.is_empty() {
        let uris: Vec<String> = draft.songs.iter().map(|s| s.uri.clone()).collect();
        match add_songs(api, session, &playlist.id, &uris).await {
            Ok(_) => success!("Added {} songs to playlist {}", uris.len(), playlist.name),
            Err(e) => warning!("Failed to add songs to playlist {}: {}", playlist.name, e),
        }
    }

    if let Some(image) = &draft.image {
        let cover = upload_cover(api, session, &playlist.id, image).await;
        if cover.uploaded {
            success!("Cover image added to playlist {}", playlist.name);
        } else {
            warning!(
                "Cover image could not be added, but playlist was created: {}",
                cover.diagnostic.unwrap_or_default()
            );
        }
    }

    Ok(playlist)
}

/// Applies `changes` to an existing playlist.
///
/// Details (name, visibility, description) are updated first and a failure
/// there is returned as an error. Tracks are then replaced and the cover
/// uploaded, each only when requested and each best effort. Fields left as
/// `None` cause no request at all.
pub async fn update_playlist(
    api: &SpotifyApi,
    session: &Session,
    changes: &PlaylistChanges,
) -> Res<UpdateReport> {
    bearer(session)?;

    let details = UpdatePlaylistRequest {
        name: changes.title.clone(),
        public: changes.is_public,
        description: changes.description.clone(),
    };

    let details_outcome =
        if details.name.is_none() && details.public.is_none() && details.description.is_none() {
            StepOutcome::Skipped
        } else {
            update_details(api, session, &changes.id, &details).await?;
            StepOutcome::Done
        };

    let tracks_outcome = match &changes.songs {
        None => StepOutcome::Skipped,
        Some(songs) => {
            let uris: Vec<String> = songs.iter().map(|s| s.uri.clone()).collect();
            match replace_songs(api, session, &changes.id, &uris).await {
                Ok(_) => StepOutcome::Done,
                Err(e) => {
                    warning!("Failed to replace songs of playlist {}: {}", changes.id, e);
                    StepOutcome::Failed(e.to_string())
                }
            }
        }
    };

    let cover_outcome = match &changes.image {
        None => StepOutcome::Skipped,
        Some(image) => {
            let cover = upload_cover(api, session, &changes.id, image).await;
            if cover.uploaded {
                StepOutcome::Done
            } else {
                let reason = cover.diagnostic.unwrap_or_default();
                warning!("Cover image of playlist {} not updated: {}", changes.id, reason);
                StepOutcome::Failed(reason)
            }
        }
    };

    Ok(UpdateReport {
        details: details_outcome,
        tracks: tracks_outcome,
        cover: cover_outcome,
    })
}
