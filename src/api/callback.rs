use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{types::CallbackState, warning};

/// Receives the redirect from the authorization endpoint.
///
/// The code is only captured here. Redeeming it is left to the command
/// owning the session, which picks it up from the shared state.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<CallbackState>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;

    if let Some(code) = params.get("code").filter(|c| !c.is_empty()) {
        state.code = Some(code.clone());
        state.error = None;
        return Html(
            "<h2>Authorization received.</h2><p>Finishing sign-in, you can close this window.</p>",
        );
    }

    match params.get("error") {
        Some(reason) => {
            warning!("Authorization was not granted: {}", reason);
            state.error = Some(reason.clone());
            Html("<h4>Login failed.</h4>")
        }
        None => Html("<h4>Missing authorization code.</h4>"),
    }
}
