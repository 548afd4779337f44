use std::sync::Arc;

use axum::{
    Extension,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use tokio::sync::Mutex;

use crate::{
    guard::{Navigation, guard},
    types::CallbackState,
};

/// Runs every request through the navigation guard.
pub async fn require_session(
    Extension(shared_state): Extension<Arc<Mutex<CallbackState>>>,
    request: Request,
    next: Next,
) -> Response {
    let authenticated = shared_state.lock().await.authenticated;

    match guard(request.uri().path(), authenticated) {
        Navigation::Allow => next.run(request).await,
        Navigation::Redirect(to) => Redirect::to(to).into_response(),
    }
}

/// Sends the browser on to Spotify's consent page.
pub async fn login(Extension(shared_state): Extension<Arc<Mutex<CallbackState>>>) -> Response {
    match shared_state.lock().await.authorize_url.clone() {
        Some(url) => Redirect::to(&url).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Html("<h4>Login is not configured.</h4>"),
        )
            .into_response(),
    }
}

pub async fn home(Extension(shared_state): Extension<Arc<Mutex<CallbackState>>>) -> Html<String> {
    let state = shared_state.lock().await;
    let who = state.user.clone().unwrap_or_else(|| "unknown user".to_string());
    Html(format!(
        "<h2>Signed in as {}.</h2><p>Use the terminal to continue.</p>",
        escape(&who)
    ))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
