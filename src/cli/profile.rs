use tabled::Table;

use crate::{
    cli::{auth::spinner, session::{login_hint, open_session}},
    error, info,
    spotify::{profile, search},
    utils,
};

pub async fn whoami() {
    let (api, session) = open_session("/profile").await;

    let pb = spinner("Fetching profile...");
    let result = profile::fetch_profile(&api, &session).await;
    pb.finish_and_clear();

    match result {
        Ok(me) => {
            info!("id:        {}", me.id);
            info!(
                "name:      {}",
                me.display_name.unwrap_or_else(|| "-".to_string())
            );
            info!("email:     {}", me.email.unwrap_or_else(|| "-".to_string()));
            info!("country:   {}", me.country.unwrap_or_else(|| "-".to_string()));
            info!("product:   {}", me.product.unwrap_or_else(|| "-".to_string()));
            info!(
                "followers: {}",
                me.followers.map(|f| f.total).unwrap_or_default()
            );
        }
        Err(e) => error!("Failed to fetch profile: {}{}", e, login_hint(&e)),
    }
}

pub async fn top_artists() {
    let (api, session) = open_session("/top").await;

    match profile::fetch_top_artists(&api, &session).await {
        Ok(page) if page.items.is_empty() => info!("No top artists yet"),
        Ok(page) => println!("{}", Table::new(utils::artist_rows(&page.items))),
        Err(e) => error!("Failed to fetch top artists: {}{}", e, login_hint(&e)),
    }
}

pub async fn top_tracks() {
    let (api, session) = open_session("/top").await;

    match profile::fetch_top_tracks(&api, &session).await {
        Ok(page) if page.items.is_empty() => info!("No top tracks yet"),
        Ok(page) => println!("{}", Table::new(utils::track_rows(&page.items))),
        Err(e) => error!("Failed to fetch top tracks: {}{}", e, login_hint(&e)),
    }
}

/// Lists followed playlists, or only the ones the user owns.
pub async fn playlists(owned: bool) {
    let (api, session) = open_session("/playlists").await;

    let result = if owned {
        search::search_owned_playlists(&api, &session).await
    } else {
        profile::fetch_playlists(&api, &session).await
    };

    match result {
        Ok(page) if page.items.is_empty() => info!("No playlists found"),
        Ok(page) => println!("{}", Table::new(utils::playlist_rows(&page.items))),
        Err(e) => error!("Failed to fetch playlists: {}{}", e, login_hint(&e)),
    }
}
