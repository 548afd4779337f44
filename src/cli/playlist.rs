use std::path::PathBuf;

use tabled::Table;

use crate::{
    cli::{auth::spinner, session::{login_hint, open_session}},
    error, info,
    spotify::{SpotifyApi, playlist, search},
    success,
    types::{PlaylistChanges, PlaylistDraft, Session, Song, StepOutcome},
    utils, warning,
};

pub struct PlaylistInput {
    pub title: Option<String>,
    pub public: Option<bool>,
    pub description: Option<String>,
    pub songs: Vec<String>,
    pub find: Vec<String>,
    pub image: Option<PathBuf>,
}

pub async fn show(id: String) {
    let (api, session) = open_session("/playlist").await;

    match search::search_playlist_by_id(&api, &session, &id).await {
        Ok(detail) => {
            info!(
                "{} ({} tracks) by {}",
                detail.name,
                detail.tracks.total.unwrap_or(detail.tracks.items.len() as u64),
                detail
                    .owner
                    .as_ref()
                    .map(|o| o.display_name.clone().unwrap_or_else(|| o.id.clone()))
                    .unwrap_or_default()
            );
            if let Some(description) = detail.description.as_ref().filter(|d| !d.is_empty()) {
                info!("{}", description);
            }

            let tracks: Vec<_> = detail
                .track_items()
                .into_iter()
                .map(|item| item.into_track())
                .collect();
            if !tracks.is_empty() {
                println!("{}", Table::new(utils::track_rows(&tracks)));
            }
        }
        Err(e) => error!("Failed to fetch playlist {}: {}{}", id, e, login_hint(&e)),
    }
}

pub async fn create(input: PlaylistInput) {
    let (api, session) = open_session("/playlist").await;

    let title = match input.title {
        Some(title) if !title.trim().is_empty() => title,
        _ => error!("A playlist needs a title"),
    };

    let mut songs: Vec<Song> = input.songs.into_iter().map(|uri| Song { uri }).collect();
    songs.extend(find_songs(&api, &session, &input.find).await);

    let draft = PlaylistDraft {
        title,
        is_public: input.public.unwrap_or(false),
        description: input.description,
        songs,
        image: load_image(input.image).await,
    };

    let pb = spinner("Creating playlist...");
    let result = playlist::create_playlist_complete(&api, &session, &draft).await;
    pb.finish_and_clear();

    match result {
        Ok(created) => success!("Playlist {} is ready (id {})", created.name, created.id),
        Err(e) => error!("Failed to create playlist: {}{}", e, login_hint(&e)),
    }
}

pub async fn update(id: String, input: PlaylistInput) {
    let (api, session) = open_session("/playlist").await;

    let songs = if input.songs.is_empty() && input.find.is_empty() {
        None
    } else {
        let mut songs: Vec<Song> = input.songs.into_iter().map(|uri| Song { uri }).collect();
        songs.extend(find_songs(&api, &session, &input.find).await);
        Some(songs)
    };

    let changes = PlaylistChanges {
        id,
        title: input.title,
        is_public: input.public,
        description: input.description,
        songs,
        image: load_image(input.image).await,
    };

    let pb = spinner("Updating playlist...");
    let result = playlist::update_playlist(&api, &session, &changes).await;
    pb.finish_and_clear();

    match result {
        Ok(report) => {
            report_step("details", &report.details);
            report_step("tracks", &report.tracks);
            report_step("cover", &report.cover);
            success!("Playlist {} updated", changes.id);
        }
        Err(e) => error!("Failed to update playlist {}: {}{}", changes.id, e, login_hint(&e)),
    }
}

/// Resolves each query to its best matching track.
async fn find_songs(api: &SpotifyApi, session: &Session, queries: &[String]) -> Vec<Song> {
    let mut songs = Vec::new();
    for query in queries {
        match search::search_track_playlist(api, session, query).await {
            Ok(results) => match results.tracks.and_then(|p| p.items.into_iter().next()) {
                Some(track) => {
                    info!(
                        "\"{}\" -> {} by {}",
                        query,
                        track.name,
                        utils::join_artists(&track.artists)
                    );
                    songs.push(Song::from(&track));
                }
                None => warning!("No track found for \"{}\"", query),
            },
            Err(e) => warning!("Track search for \"{}\" failed: {}", query, e),
        }
    }
    songs
}

async fn load_image(path: Option<PathBuf>) -> Option<String> {
    let path = path?;
    match utils::encode_image_file(&path).await {
        Ok(data) => Some(data),
        Err(e) => {
            warning!("Cannot read cover image {}: {}", path.display(), e);
            None
        }
    }
}

fn report_step(step: &str, outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Skipped => {}
        StepOutcome::Done => success!("Updated {}", step),
        StepOutcome::Failed(reason) => warning!("Could not update {}: {}", step, reason),
    }
}
