use axum::{Extension, Router, middleware, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    Error, Res, api,
    guard::{CALLBACK_PATH, LOGIN_PATH},
    types::CallbackState,
};

pub fn router(state: Arc<Mutex<CallbackState>>) -> Router {
    Router::new()
        .route("/", get(api::home))
        .route(LOGIN_PATH, get(api::login))
        .route(CALLBACK_PATH, get(api::callback))
        .route_layer(middleware::from_fn(api::require_session))
        .route("/health", get(api::health))
        .layer(Extension(state))
}

/// Binds the callback server's listening socket.
///
/// Binding happens before anything waits on the server, so a taken port is
/// reported right away instead of surfacing as a callback that never comes.
pub async fn bind(addr: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::Config(format!("Failed to parse server address {}: {}", addr, e)))?;

    Ok(TcpListener::bind(&addr).await?)
}

pub async fn serve(listener: TcpListener, state: Arc<Mutex<CallbackState>>) -> Res<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Waits for the callback to deliver a code or an error.
///
/// Takes the code out of the shared state so it is redeemed only once.
/// Returns `None` when `max_wait` elapses first, no limit means waiting
/// forever.
pub async fn wait_for_code(
    shared_state: Arc<Mutex<CallbackState>>,
    max_wait: Option<Duration>,
) -> Option<Result<String, String>> {
    use std::time::Instant;

    let start = Instant::now();

    while max_wait.is_none_or(|max| start.elapsed() < max) {
        let mut lock = shared_state.lock().await;
        if let Some(code) = lock.code.take() {
            return Some(Ok(code));
        }
        if let Some(error) = lock.error.take() {
            return Some(Err(error));
        }
        drop(lock);
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    None
}
