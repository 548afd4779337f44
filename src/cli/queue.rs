use tabled::Table;

use crate::{
    cli::session::{login_hint, open_session},
    error, info,
    management::PlayerQueue,
    spotify::search,
    utils,
};

/// Loads a playlist into the player queue and shows where it stands.
///
/// `start` picks the first track (1-based), `skip` then steps forward,
/// negative values step back. Both wrap around the end of the list.
pub async fn queue(playlist_id: String, start: usize, skip: i64) {
    let (api, session) = open_session("/queue").await;

    let detail = match search::search_playlist_by_id(&api, &session, &playlist_id).await {
        Ok(detail) => detail,
        Err(e) => error!("Failed to fetch playlist {}: {}{}", playlist_id, e, login_hint(&e)),
    };

    let mut player = PlayerQueue::new();
    player.set_queue(detail.track_items(), start.saturating_sub(1));

    player.skip(skip);

    let Some(current) = player.current() else {
        info!("Playlist {} has no playable tracks", detail.name);
        return;
    };

    info!(
        "Now playing: {} by {} ({}/{})",
        current.name,
        utils::join_artists(&current.artists),
        player.index() + 1,
        player.queue().len()
    );
    if let Some(preview) = &current.preview_url {
        info!("Preview: {}", preview);
    }

    println!(
        "{}",
        Table::new(utils::queue_rows(player.queue(), player.index()))
    );
}
