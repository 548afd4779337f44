use crate::{
    Error, config, error,
    guard::{Navigation, guard},
    management::SessionStore,
    spotify::SpotifyApi,
    types::Session,
};

/// Loads the stored session for a command reachable at `route`.
///
/// Commands are run through the same navigation guard as the callback
/// server's pages. Without a session the guard sends the user to the login
/// step, which on the command line means `spotilink auth`.
pub(crate) async fn open_session(route: &str) -> (SpotifyApi, Session) {
    let store = match SessionStore::load().await {
        Ok(store) => store,
        Err(e) => error!("Failed to load session. Please run spotilink auth\n Error: {}", e),
    };

    if let Navigation::Redirect(to) = guard(route, store.is_authenticated()) {
        error!(
            "Not signed in ({} requires {}). Please run spotilink auth",
            route, to
        );
    }

    (
        SpotifyApi::new(config::spotify_apiurl()),
        store.session().clone(),
    )
}

/// Suffix for command failures caused by a token Spotify no longer accepts.
pub(crate) fn login_hint(e: &Error) -> &'static str {
    if matches!(e, Error::ApiRequest { .. }) && e.needs_login() {
        "\n Your session is no longer valid. Please run spotilink auth"
    } else {
        ""
    }
}
