use tabled::Table;

use crate::{
    cli::{auth::spinner, session::{login_hint, open_session}},
    error, info,
    spotify::search::{self, SearchKind},
    utils,
};

pub async fn search(kind: SearchKind, query: String, limit: Option<u32>) {
    let (api, session) = open_session("/search").await;

    let pb = spinner("Searching...");
    let result = match limit {
        Some(limit) => search::search(&api, &session, kind, &query, limit).await,
        None => match kind {
            SearchKind::Track => search::search_tracks(&api, &session, &query).await,
            SearchKind::Artist => search::search_artists(&api, &session, &query).await,
            SearchKind::Album => search::search_albums(&api, &session, &query).await,
            SearchKind::Playlist => search::search_playlists(&api, &session, &query).await,
        },
    };
    pb.finish_and_clear();

    let results = match result {
        Ok(results) => results,
        Err(e) => error!("Search for {} failed: {}{}", kind, e, login_hint(&e)),
    };

    let table = match kind {
        SearchKind::Track => results
            .tracks
            .filter(|p| !p.items.is_empty())
            .map(|p| Table::new(utils::track_rows(&p.items))),
        SearchKind::Artist => results
            .artists
            .filter(|p| !p.items.is_empty())
            .map(|p| Table::new(utils::artist_rows(&p.items))),
        SearchKind::Album => results
            .albums
            .filter(|p| !p.items.is_empty())
            .map(|p| Table::new(utils::album_rows(&p.items))),
        SearchKind::Playlist => results
            .playlists
            .map(|p| utils::playlist_rows(p.items.iter().flatten()))
            .filter(|rows| !rows.is_empty())
            .map(Table::new),
    };

    match table {
        Some(table) => println!("{}", table),
        None => info!("No {} found for \"{}\"", kind, query),
    }
}
